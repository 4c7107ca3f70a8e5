//! Castling: the composite king and rook move

use crate::geometry::{self, Direction};
use crate::grid::Grid;
use crate::moves::{Movement, MovementKind};
use crate::types::{CastlingSide, Color, File, PieceKind, Position};

/// Square where the king of color `c` must stand to castle
#[inline]
pub const fn king_src(c: Color) -> Position {
    Position::from_parts(File::E, geometry::home_rank(c))
}

/// Square where the rook taking part in castling of color `c` on side `s` stands
#[inline]
pub const fn rook_src(c: Color, s: CastlingSide) -> Position {
    Position::from_parts(geometry::castling_rook_file(s), geometry::home_rank(c))
}

/// Returns `true` if all the squares strictly between `from` and `until` are empty
///
/// The path is walked with one probe movement per square, as if an empty placeholder
/// were moving along it.
fn is_path_vacant(grid: &Grid, side: Color, from: Position, dir: Direction, until: Position) -> bool {
    let probe = match Movement::new(MovementKind::Line(dir), side, from) {
        Ok(Some(probe)) => probe,
        _ => return false,
    };
    if probe.dst() == until {
        return true;
    }
    !grid.is_occupied(probe.dst()) && is_path_vacant(grid, side, probe.dst(), dir, until)
}

/// Returns `true` if the king of color `side` standing on `src` can castle on side `s`
///
/// The king must stand on its initial square and never have moved, the rook must stand in
/// its corner and never have moved, and all the squares between them must be empty.
///
/// Note that this function doesn't check whether the king passes through an attacked square.
/// Whether it matters is decided by [`Rules`](crate::game::Rules).
pub fn is_available(grid: &Grid, side: Color, src: Position, s: CastlingSide) -> bool {
    if src != king_src(side) {
        return false;
    }
    let king_ok = grid
        .get(src)
        .map_or(false, |k| k.kind() == PieceKind::King && k.color() == side && k.has_not_moved());
    if !king_ok {
        return false;
    }
    let rook = rook_src(side, s);
    let rook_ok = grid
        .get(rook)
        .map_or(false, |r| r.kind() == PieceKind::Rook && r.color() == side && r.has_not_moved());
    rook_ok && is_path_vacant(grid, side, src, geometry::castling_direction(s), rook)
}

/// Returns the movement of the rook accompanying the castling of the king standing on `king`
///
/// The rook jumps over the king and lands on the square the king crosses.
pub fn rook_movement(side: Color, king: Position, s: CastlingSide) -> Option<Movement> {
    let dir = geometry::castling_direction(s);
    let dst = dir.delta().apply(king)?;
    Some(Movement::from_parts(
        MovementKind::Line(dir.inv()),
        side,
        rook_src(side, s),
        dst,
    ))
}

/// Returns the single king step onto the square crossed during castling
///
/// Used to verify that the king doesn't pass through an attacked square.
pub fn king_transit(mv: &Movement) -> Option<Movement> {
    match mv.kind() {
        MovementKind::Castling(s) => {
            let dir = geometry::castling_direction(s);
            Movement::new(MovementKind::Line(dir), mv.side(), mv.src()).ok()?
        }
        _ => None,
    }
}
