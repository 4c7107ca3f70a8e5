use crate::castling;
use crate::geometry::{self, Delta, Direction};
use crate::grid::Grid;
use crate::types::{CastlingSide, Color, Position};

use std::fmt;

use thiserror::Error;

/// Movement kind
///
/// The kind fixes the geometry of the movement (which way the ray goes, or which pattern
/// a jump follows) and the rules deciding whether it is available on a given board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MovementKind {
    /// Rook-like step along a rank or a file
    Line(Direction),
    /// Bishop-like step along a diagonal
    Diagonal(Direction),
    /// Knight jump: two squares towards `primary`, then one square towards `secondary`
    KnightEl {
        primary: Direction,
        secondary: Direction,
    },
    /// Pawn step forward, never a capture
    PawnWalk(Direction),
    /// Pawn capture along a forward diagonal
    PawnTake(Direction),
    /// King move of the castling, the rook follows it
    Castling(CastlingSide),
}

/// Error indicating that a movement was built with a direction it cannot go in
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum DirectionError {
    #[error("direction {0:?} is not along a rank or a file")]
    NotCardinal(Direction),
    #[error("direction {0:?} is not diagonal")]
    NotDiagonal(Direction),
    #[error("directions {0:?} and {1:?} do not form a knight jump")]
    NotPerpendicular(Direction, Direction),
}

impl MovementKind {
    /// Verifies that the directions stored in the kind make sense for it
    pub fn validate(&self) -> Result<(), DirectionError> {
        match *self {
            MovementKind::Line(d) | MovementKind::PawnWalk(d) => {
                if !d.is_cardinal() {
                    return Err(DirectionError::NotCardinal(d));
                }
            }
            MovementKind::Diagonal(d) | MovementKind::PawnTake(d) => {
                if !d.is_diagonal() {
                    return Err(DirectionError::NotDiagonal(d));
                }
            }
            MovementKind::KnightEl { primary, secondary } => {
                if !primary.is_perpendicular(secondary) {
                    return Err(DirectionError::NotPerpendicular(primary, secondary));
                }
            }
            MovementKind::Castling(_) => {}
        }
        Ok(())
    }

    /// Offset between the targets of two consecutive movements of the same ray
    pub fn step(&self) -> Delta {
        match *self {
            MovementKind::Line(d)
            | MovementKind::Diagonal(d)
            | MovementKind::PawnWalk(d)
            | MovementKind::PawnTake(d) => d.delta(),
            MovementKind::KnightEl { primary, secondary } => {
                primary.delta() * 2_i8 + secondary.delta()
            }
            MovementKind::Castling(side) => geometry::castling_direction(side).delta() * 2_i8,
        }
    }

    /// Returns `true` if movements of this kind can continue along a ray
    ///
    /// Castling is a single composite jump, everything else can be extended (how far is decided
    /// by the generator).
    pub fn is_ray(&self) -> bool {
        !matches!(*self, MovementKind::Castling(_))
    }
}

/// Candidate movement of a piece
///
/// A movement goes from `src` (where the moving piece stands) to `dst`. It is a plain value:
/// it doesn't borrow the board, so the piece is looked up in the [`Grid`] when the movement is
/// checked or executed. Movements are rebuilt every time legality is computed, and are
/// discarded after use.
///
/// Along a ray, the movement to the next square is obtained via [`Movement::next()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Movement {
    kind: MovementKind,
    side: Color,
    src: Position,
    dst: Position,
}

impl Movement {
    /// Creates the first movement of kind `kind` made by a piece of color `side` standing on `src`
    ///
    /// Returns `Ok(None)` if the target square lies outside the board, and an error if the
    /// directions are not suitable for the kind.
    pub fn new(
        kind: MovementKind,
        side: Color,
        src: Position,
    ) -> Result<Option<Movement>, DirectionError> {
        kind.validate()?;
        Ok(shifted(src, kind.step()).map(|dst| Movement {
            kind,
            side,
            src,
            dst,
        }))
    }

    /// Creates a movement with arbitrary source and destination
    ///
    /// It's used for the parts of composite moves, where the piece doesn't follow one step
    /// of its ray.
    pub(crate) fn from_parts(
        kind: MovementKind,
        side: Color,
        src: Position,
        dst: Position,
    ) -> Movement {
        Movement {
            kind,
            side,
            src,
            dst,
        }
    }

    #[inline]
    pub const fn kind(&self) -> MovementKind {
        self.kind
    }

    /// Returns the color of the moving piece
    #[inline]
    pub const fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub const fn src(&self) -> Position {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Position {
        self.dst
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MovementKind::Castling(_))
    }

    /// Returns the movement one step further along the same ray
    ///
    /// Returns `None` if the next square is outside of the board, or if the movement doesn't
    /// form a ray at all.
    pub fn next(&self) -> Option<Movement> {
        if !self.kind.is_ray() {
            return None;
        }
        let dst = shifted(self.dst, self.kind.step())?;
        Some(Movement { dst, ..*self })
    }

    /// Returns `true` if the target square holds an opponent of the moving piece
    pub fn is_capture(&self, grid: &Grid) -> bool {
        grid.get(self.src)
            .map_or(false, |p| p.is_opponent_of(grid.get(self.dst)))
    }

    /// Returns `true` if the movement can be made on `grid`
    ///
    /// By default, the target must be either empty or hold an opponent's piece. Pawn walks
    /// need an empty target, pawn captures need an opponent on a forward diagonal, and
    /// castling has its own rules (see [`castling::is_available()`]). The moving piece must stand
    /// on the source square.
    pub fn is_available(&self, grid: &Grid) -> bool {
        let target = grid.get(self.dst);
        match self.kind {
            MovementKind::PawnWalk(d) => d == geometry::pawn_forward(self.side) && target.is_none(),
            MovementKind::PawnTake(d) => {
                geometry::pawn_captures(self.side).contains(&d) && self.is_capture(grid)
            }
            MovementKind::Castling(side) => castling::is_available(grid, self.side, self.src, side),
            MovementKind::Line(_) | MovementKind::Diagonal(_) | MovementKind::KnightEl { .. } => {
                grid.get(self.src)
                    .map_or(false, |p| !p.is_companion_of(target))
            }
        }
    }

    /// Returns the rook part of the move if this movement is composite
    pub fn composite(&self) -> Option<Movement> {
        match self.kind {
            MovementKind::Castling(side) => castling::rook_movement(self.side, self.src, side),
            _ => None,
        }
    }
}

/// Returns the square `step` away from `from`, or `None` if it's outside of the board
fn shifted(from: Position, step: Delta) -> Option<Position> {
    let row = from.row() as isize - step.rank as isize;
    let col = from.col() as isize + step.file as isize;
    if !Grid::exists(row, col) {
        return None;
    }
    Position::from_row_col(row as usize, col as usize).ok()
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}
