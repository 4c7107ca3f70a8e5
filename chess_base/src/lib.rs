//! # Base types for caissa
//!
//! This is an auxiliary crate for `caissa`, which contains board coordinates, colors, piece kinds
//! and directions. None of these types know anything about the rules of chess.
//!
//! Normally you don't want to use this crate directly. Use `caissa` instead, which re-exports
//! everything from here.

pub mod geometry;
pub mod types;
