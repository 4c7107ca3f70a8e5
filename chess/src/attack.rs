//! Attack detection based on the cached legal movements

use crate::grid::Grid;
use crate::types::{Color, Position};

/// Returns `true` if some piece of color `by` has a legal movement ending on `pos`
///
/// The answer is only meaningful for squares holding a piece of the other color (e.g. a king),
/// since pawns walk onto empty squares they don't attack.
pub fn is_attacked(grid: &Grid, pos: Position, by: Color) -> bool {
    grid.pieces_of(by).any(|p| p.can_target(pos))
}

/// Returns the positions of all the pieces of color `by` which can move onto `pos`
pub fn attackers(grid: &Grid, pos: Position, by: Color) -> Vec<Position> {
    grid.pieces_of(by)
        .filter(|p| p.can_target(pos))
        .filter_map(|p| p.position())
        .collect()
}

/// Returns `true` if the king of color `c` is under attack
///
/// A side without a king is never under attack.
pub fn is_king_attacked(grid: &Grid, c: Color) -> bool {
    grid.king(c)
        .and_then(|k| k.position())
        .map_or(false, |pos| is_attacked(grid, pos, c.inv()))
}
