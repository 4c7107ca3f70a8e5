//! Generation of legal movements
//!
//! Every piece kind is wired to a set of movement rays. A ray is walked by [`generate()`],
//! which adds movements one by one until the ray is blocked, runs off the board or exhausts
//! its slots.

use crate::geometry::{self, Direction};
use crate::grid::Grid;
use crate::moves::{Movement, MovementKind};
use crate::piece::Piece;
use crate::types::{CastlingSide, Color, PieceKind, Position};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Maximum number of movements a single piece can have
///
/// A queen in the middle of an empty board has 27 of them.
pub const MAX_MOVEMENTS: usize = 32;

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Movement, MAX_MOVEMENTS>);

impl Deref for MoveList {
    type Target = ArrayVec<Movement, MAX_MOVEMENTS>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Movement;
    type IntoIter = slice::Iter<'a, Movement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Walks the ray starting with `mv` and pushes every available movement into `res`
///
/// The walk stops on the first unavailable movement, right after a capture, or when the
/// next square is outside of the board. If `slots` is `Some(n)`, at most `n` movements
/// are taken from the ray, otherwise the ray is unlimited.
pub fn generate(grid: &Grid, mv: Option<Movement>, slots: Option<usize>, res: &mut MoveList) {
    let mv = match mv {
        Some(mv) if mv.is_available(grid) => mv,
        _ => return,
    };
    res.push(mv);
    if mv.is_capture(grid) {
        return;
    }
    let slots = match slots {
        None => None,
        Some(n) if n > 1 => Some(n - 1),
        Some(_) => return,
    };
    generate(grid, mv.next(), slots, res);
}

/// Walks a sliding ray until it's blocked
#[inline]
pub fn gen_unlimited(grid: &Grid, mv: Option<Movement>, res: &mut MoveList) {
    generate(grid, mv, None, res);
}

/// Walks a ray taking at most `n` movements from it
#[inline]
pub fn gen_limited(grid: &Grid, mv: Option<Movement>, n: usize, res: &mut MoveList) {
    generate(grid, mv, Some(n), res);
}

fn first(kind: MovementKind, side: Color, src: Position) -> Option<Movement> {
    match Movement::new(kind, side, src) {
        Ok(mv) => mv,
        Err(e) => unreachable!("generator built a bad movement {:?}: {}", kind, e),
    }
}

fn straight(d: Direction) -> MovementKind {
    if d.is_cardinal() {
        MovementKind::Line(d)
    } else {
        MovementKind::Diagonal(d)
    }
}

fn gen_rays(
    grid: &Grid,
    side: Color,
    src: Position,
    dirs: &[Direction],
    slots: Option<usize>,
    res: &mut MoveList,
) {
    for &d in dirs {
        generate(grid, first(straight(d), side, src), slots, res);
    }
}

fn gen_pawn(grid: &Grid, piece: &Piece, src: Position, res: &mut MoveList) {
    let side = piece.color();
    let walk = first(
        MovementKind::PawnWalk(geometry::pawn_forward(side)),
        side,
        src,
    );
    let steps = if piece.has_not_moved() && src.rank() == geometry::pawn_start_rank(side) {
        2
    } else {
        1
    };
    gen_limited(grid, walk, steps, res);
    for d in geometry::pawn_captures(side) {
        gen_limited(grid, first(MovementKind::PawnTake(d), side, src), 1, res);
    }
}

fn gen_knight(grid: &Grid, side: Color, src: Position, res: &mut MoveList) {
    for primary in Direction::CARDINAL {
        for secondary in Direction::CARDINAL {
            if primary.is_perpendicular(secondary) {
                let kind = MovementKind::KnightEl { primary, secondary };
                gen_limited(grid, first(kind, side, src), 1, res);
            }
        }
    }
}

fn gen_king(grid: &Grid, side: Color, src: Position, res: &mut MoveList) {
    gen_rays(grid, side, src, &Direction::ALL, Some(1), res);
    for s in [CastlingSide::King, CastlingSide::Queen] {
        gen_limited(grid, first(MovementKind::Castling(s), side, src), 1, res);
    }
}

/// Computes the movements of `piece` which are currently legal on `grid`
///
/// The piece must stand on the grid. Note that the movements are not checked for leaving the
/// own king under attack, this is done when the move is actually performed.
pub fn legal_movements(grid: &Grid, piece: &Piece) -> MoveList {
    let mut res = MoveList::new();
    let src = match piece.position() {
        Some(src) => src,
        None => return res,
    };
    let side = piece.color();
    match piece.kind() {
        PieceKind::Pawn => gen_pawn(grid, piece, src, &mut res),
        PieceKind::Knight => gen_knight(grid, side, src, &mut res),
        PieceKind::Bishop => gen_rays(grid, side, src, &Direction::DIAGONAL, None, &mut res),
        PieceKind::Rook => gen_rays(grid, side, src, &Direction::CARDINAL, None, &mut res),
        PieceKind::Queen => gen_rays(grid, side, src, &Direction::ALL, None, &mut res),
        PieceKind::King => gen_king(grid, side, src, &mut res),
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn targets(grid: &Grid, at: &str) -> BTreeSet<String> {
        grid.get(pos(at))
            .unwrap()
            .legal_targets()
            .map(|p| p.to_string())
            .collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rook_on_empty_board() {
        let grid = Grid::from_layout("8/8/8/8/3R4/8/8/8").unwrap();
        let rook = grid.get(pos("d4")).unwrap();
        assert_eq!(rook.legal_movements().len(), 14);

        let mut ray = MoveList::new();
        let north = first(MovementKind::Line(Direction::North), Color::White, pos("d4"));
        gen_unlimited(&grid, north, &mut ray);
        assert_eq!(
            ray.iter().map(|mv| mv.dst().to_string()).collect::<Vec<_>>(),
            ["d5", "d6", "d7", "d8"]
        );

        for (d, count) in [
            (Direction::East, 4),
            (Direction::South, 3),
            (Direction::West, 3),
        ] {
            let mut ray = MoveList::new();
            gen_unlimited(&grid, first(MovementKind::Line(d), Color::White, pos("d4")), &mut ray);
            assert_eq!(ray.len(), count, "{:?}", d);
        }
    }

    #[test]
    fn test_ray_blocking() {
        // Opponent on d7 ends the ray inclusively, companion on f4 exclusively
        let grid = Grid::from_layout("8/3p4/8/8/3R1N2/8/8/8").unwrap();
        assert_eq!(
            targets(&grid, "d4"),
            set(&["d5", "d6", "d7", "e4", "d3", "d2", "d1", "c4", "b4", "a4"])
        );
    }

    #[test]
    fn test_slots() {
        let grid = Grid::from_layout("8/8/8/8/3Q4/8/8/8").unwrap();
        for n in 1..=4 {
            let mut ray = MoveList::new();
            let mv = first(MovementKind::Diagonal(Direction::NorthEast), Color::White, pos("d4"));
            gen_limited(&grid, mv, n, &mut ray);
            assert_eq!(ray.len(), n.min(4));
        }
        let mut ray = MoveList::new();
        gen_limited(&grid, None, 3, &mut ray);
        assert!(ray.is_empty());
    }

    #[test]
    fn test_queen_max() {
        let grid = Grid::from_layout("8/8/8/8/3Q4/8/8/8").unwrap();
        assert_eq!(grid.get(pos("d4")).unwrap().legal_movements().len(), 27);
    }

    #[test]
    fn test_bishop_and_knight() {
        let grid = Grid::from_layout("8/8/8/8/8/2p5/1B6/N7").unwrap();
        assert_eq!(targets(&grid, "b2"), set(&["c3", "c1", "a3"]));
        assert_eq!(targets(&grid, "a1"), set(&["c2", "b3"]));

        let grid = Grid::from_layout("8/8/8/8/3N4/8/8/8").unwrap();
        assert_eq!(
            targets(&grid, "d4"),
            set(&["e6", "c6", "f5", "f3", "e2", "c2", "b3", "b5"])
        );
    }

    #[test]
    fn test_pawn_walk() {
        let grid = Grid::from_layout("8/8/8/8/8/8/4P3/8").unwrap();
        assert_eq!(targets(&grid, "e2"), set(&["e3", "e4"]));

        let grid = Grid::from_layout("8/8/8/8/4p3/8/4P3/8").unwrap();
        assert_eq!(targets(&grid, "e2"), set(&["e3"]));

        let grid = Grid::from_layout("8/8/8/8/8/4n3/4P3/8").unwrap();
        assert_eq!(targets(&grid, "e2"), set(&[]));

        let grid = Grid::from_layout("8/4p3/8/8/8/8/8/8").unwrap();
        assert_eq!(targets(&grid, "e7"), set(&["e6", "e5"]));

        // Off the start rank, only single steps
        let grid = Grid::from_layout("8/8/8/8/8/4P3/8/8").unwrap();
        assert_eq!(targets(&grid, "e3"), set(&["e4"]));
    }

    #[test]
    fn test_pawn_take() {
        let grid = Grid::from_layout("8/8/8/8/8/3p1B2/4P3/8").unwrap();
        assert_eq!(targets(&grid, "e2"), set(&["e3", "e4", "d3"]));

        let grid = Grid::from_layout("8/8/8/8/8/8/3p4/2P1P3").unwrap();
        assert_eq!(targets(&grid, "d2"), set(&["d1", "c1", "e1"]));
    }

    #[test]
    fn test_king() {
        let grid = Grid::from_layout("8/8/8/8/8/8/3p4/4K3").unwrap();
        assert_eq!(targets(&grid, "e1"), set(&["d1", "f1", "d2", "e2", "f2"]));

        let grid = Grid::from_layout("8/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(
            targets(&grid, "e1"),
            set(&["d1", "f1", "d2", "e2", "f2", "g1", "c1"])
        );
    }
}
