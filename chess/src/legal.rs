//! Resolving requested moves into legal movements

use crate::grid::Grid;
use crate::moves::{DirectionError, Movement};
use crate::piece::Piece;
use crate::types::{Color, Position};

use thiserror::Error;

/// Error indicating that a requested move cannot be made
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum IllegalMove {
    /// No piece stands on the source square
    #[error("no piece on {0}")]
    EmptySource(Position),
    /// The piece on the source square belongs to the side which doesn't move now
    #[error("piece on {0} belongs to the opponent")]
    NotYourPiece(Position),
    /// The piece on the source square has nowhere to go
    #[error("piece on {0} cannot move")]
    Immobile(Position),
    /// The piece cannot reach the target square
    #[error("piece on {src} cannot move to {dst}")]
    UnreachableTarget { src: Position, dst: Position },
    /// A movement was built with an unsuitable direction
    #[error("invalid direction: {0}")]
    InvalidDirection(#[from] DirectionError),
    /// The move would leave the own king under attack
    #[error("move {src}{dst} leaves the king in check")]
    SelfCheck { src: Position, dst: Position },
    /// Castling out of check or through an attacked square
    #[error("king on {0} cannot castle out of or through check")]
    CastlingUnderAttack(Position),
}

/// Returns the piece on `src` if it may start a move of side `side`
pub fn origin(grid: &Grid, side: Color, src: Position) -> Result<&Piece, IllegalMove> {
    let piece = grid.get(src).ok_or(IllegalMove::EmptySource(src))?;
    if !piece.is_from_player(side) {
        return Err(IllegalMove::NotYourPiece(src));
    }
    if !piece.is_mobile() {
        return Err(IllegalMove::Immobile(src));
    }
    Ok(piece)
}

/// Finds the legal movement of side `side` going from `src` to `dst`
pub fn resolve(grid: &Grid, side: Color, src: Position, dst: Position) -> Result<Movement, IllegalMove> {
    origin(grid, side, src)?
        .movement_to(dst)
        .ok_or(IllegalMove::UnreachableTarget { src, dst })
}
