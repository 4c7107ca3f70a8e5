//! # Caissa
//!
//! Rule-correct chess engine core. It knows which moves are legal, how to make and undo them,
//! and whether a side is in check or checkmated. It doesn't render boards, parse user input
//! or drive a game loop: front ends do that through [`Match`].
//!
//! # Example
//!
//! ```
//! # use caissa::{Match, Position};
//! #
//! let mut game = Match::initial();
//! let e2 = Position::new('e', 2).unwrap();
//! let e4 = Position::new('e', 4).unwrap();
//!
//! let mut targets = game.legal_moves_for(e2).unwrap();
//! targets.sort();
//! assert_eq!(targets, vec![e4, Position::new('e', 3).unwrap()]);
//!
//! assert_eq!(game.perform_move(e2, e4).unwrap(), None);
//! assert_eq!(game.turn_number(), 2);
//! assert!(!game.is_in_check());
//! ```

pub mod attack;
pub mod castling;
pub mod game;
pub mod grid;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod piece;

pub use caissa_base::{geometry, types};

pub use game::{CastlingRule, Match, Rules};
pub use geometry::{Delta, Direction};
pub use grid::{Grid, LayoutParseError, SetupError};
pub use legal::IllegalMove;
pub use movegen::MoveList;
pub use moves::{DirectionError, Movement, MovementKind};
pub use piece::{KingStatus, Piece};
pub use types::{CastlingSide, Color, File, PieceKind, Position, PositionError, Rank};
