use super::base::Movement;
use crate::grid::Grid;
use crate::piece::Piece;

impl Movement {
    /// Makes the movement on `grid` and returns the captured piece, if any
    ///
    /// The moving piece is relocated and its move counter is incremented. For composite
    /// movements, the companion piece is relocated as well. After that, the legal movements
    /// of every piece on the board are recomputed.
    ///
    /// The movement is not validated, call it only for movements available on `grid`.
    pub fn make(&self, grid: &mut Grid) -> Option<Piece> {
        let captured = self.apply(grid);
        grid.refresh();
        captured
    }

    /// Reverts the movement previously made with [`Movement::make()`]
    ///
    /// `captured` must be the value returned by `make()`. After undoing, the board, the move
    /// counters and the legal movements of all the pieces are the same as before `make()`.
    pub fn unmake(&self, grid: &mut Grid, captured: Option<Piece>) {
        self.revert(grid, captured);
        grid.refresh();
    }

    fn apply(&self, grid: &mut Grid) -> Option<Piece> {
        let mut piece = grid.take(self.src());
        let captured = grid.remove(self.dst());
        piece.inc_moves();
        grid.put(self.dst(), piece);
        if let Some(part) = self.composite() {
            let taken = part.apply(grid);
            debug_assert!(taken.is_none(), "composite movement {} captured a piece", part);
        }
        captured
    }

    fn revert(&self, grid: &mut Grid, captured: Option<Piece>) {
        let mut piece = grid.take(self.dst());
        piece.dec_moves();
        grid.put(self.src(), piece);
        if let Some(captured) = captured {
            grid.put(self.dst(), captured);
        }
        if let Some(part) = self.composite() {
            part.revert(grid, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;
    use crate::moves::{Movement, MovementKind};
    use crate::types::{CastlingSide, Color, PieceKind, Position};
    use crate::geometry::Direction;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_capture_and_undo() {
        let mut grid = Grid::from_layout("4k3/8/8/3p4/8/8/8/3RK3").unwrap();
        let before = grid.to_string();
        let mv = grid.get(pos("d1")).unwrap().movement_to(pos("d5")).unwrap();

        let captured = mv.make(&mut grid);
        let captured_piece = captured.as_ref().unwrap();
        assert_eq!(captured_piece.kind(), PieceKind::Pawn);
        assert_eq!(captured_piece.color(), Color::Black);
        assert_eq!(captured_piece.position(), None);
        assert_eq!(grid.to_string(), "4k3/8/8/3R4/8/8/8/4K3");
        assert_eq!(grid.get(pos("d5")).unwrap().move_count(), 1);
        assert!(grid.get(pos("e8")).unwrap().can_target(pos("d8")));
        assert!(!grid.get(pos("e1")).unwrap().can_target(pos("d5")));

        mv.unmake(&mut grid, captured);
        assert_eq!(grid.to_string(), before);
        assert_eq!(grid.get(pos("d1")).unwrap().move_count(), 0);
        assert_eq!(grid.get(pos("d5")).unwrap().position(), Some(pos("d5")));
        assert!(grid.get(pos("d5")).unwrap().can_target(pos("d4")));
    }

    type Snapshot = Vec<(Position, Color, PieceKind, u32, Vec<Movement>)>;

    fn snapshot(grid: &Grid) -> Snapshot {
        grid.all_placed()
            .map(|p| {
                (
                    p.position().unwrap(),
                    p.color(),
                    p.kind(),
                    p.move_count(),
                    p.legal_movements().to_vec(),
                )
            })
            .collect()
    }

    #[test]
    fn test_castling_relocates_rook() {
        let mut grid = Grid::from_layout("4k3/8/8/8/8/8/8/R3K2R").unwrap();
        let king = grid.get(pos("e1")).unwrap();
        let short = king.movement_to(pos("g1")).unwrap();
        assert_eq!(short.kind(), MovementKind::Castling(CastlingSide::King));

        let before = snapshot(&grid);
        let captured = short.make(&mut grid);
        assert!(captured.is_none());
        assert_eq!(grid.to_string(), "4k3/8/8/8/8/8/8/R4RK1");
        assert_eq!(grid.get(pos("f1")).unwrap().move_count(), 1);
        assert_eq!(grid.get(pos("g1")).unwrap().move_count(), 1);

        short.unmake(&mut grid, captured);
        assert_eq!(grid.to_string(), "4k3/8/8/8/8/8/8/R3K2R");
        assert_eq!(snapshot(&grid), before);
        assert!(grid.get(pos("e1")).unwrap().can_target(pos("c1")));
    }

    #[test]
    fn test_castling_undo_restores_everything() {
        let mut grid = Grid::from_layout("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R").unwrap();
        for (src, dst) in [("e1", "g1"), ("e1", "c1"), ("e8", "g8"), ("e8", "c8")] {
            let mv = grid.get(pos(src)).unwrap().movement_to(pos(dst)).unwrap();
            assert!(mv.is_castling());

            let before = snapshot(&grid);
            let captured = mv.make(&mut grid);
            assert!(captured.is_none());
            assert_ne!(snapshot(&grid), before);
            mv.unmake(&mut grid, captured);
            assert_eq!(snapshot(&grid), before, "castling {}", mv);
        }
    }

    #[test]
    fn test_walk_does_not_capture() {
        let mut grid = Grid::from_layout("8/8/8/8/8/8/4P3/8").unwrap();
        let mv = Movement::new(MovementKind::PawnWalk(Direction::North), Color::White, pos("e2"))
            .unwrap()
            .unwrap();
        assert!(mv.make(&mut grid).is_none());
        assert_eq!(grid.to_string(), "8/8/8/8/8/4P3/8/8");
        assert_eq!(
            grid.get(pos("e3")).unwrap().legal_targets().collect::<Vec<_>>(),
            vec![pos("e4")]
        );
    }
}
