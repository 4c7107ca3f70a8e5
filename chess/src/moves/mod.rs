mod base;
mod make;

pub use base::*;
