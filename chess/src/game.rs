//! Match: turns, check and checkmate

use crate::attack;
use crate::castling;
use crate::grid::{Grid, LayoutParseError, SetupError};
use crate::legal::{self, IllegalMove};
use crate::moves::Movement;
use crate::piece::{KingStatus, Piece};
use crate::types::{Color, PieceKind, Position};

/// How castling treats attacked squares
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastlingRule {
    /// Only the history of the king and the rook and the vacancy of the path matter
    #[default]
    Permissive,
    /// Additionally, the king must not be in check and must not cross an attacked square
    Strict,
}

/// Rules of a match
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rules {
    pub castling: CastlingRule,
}

/// Chess match
///
/// The match owns the board and knows whose turn it is. All the moves go through
/// [`Match::perform_move()`], which validates them, makes them and updates the check and
/// checkmate state.
///
/// Cloning a match produces a fully independent copy, which is used to try moves without
/// affecting the original.
///
/// # Example
///
/// ```
/// # use caissa::{Color, Match};
/// #
/// let mut game = Match::initial();
/// for (src, dst) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
///     game.perform_move(src.parse().unwrap(), dst.parse().unwrap()).unwrap();
/// }
/// assert!(game.is_in_check());
/// assert!(game.is_checkmate());
/// assert_eq!(game.current_player(), Color::Black);
/// ```
#[derive(Debug, Clone)]
pub struct Match {
    grid: Grid,
    turn: u32,
    side: Color,
    check: bool,
    checkmate: bool,
    rules: Rules,
    captured: Vec<(Color, PieceKind)>,
}

impl Match {
    /// Creates a match with an empty board, White to move
    pub fn new() -> Match {
        Match::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Match {
        Match::from_grid(Grid::new(), Color::White, rules)
    }

    /// Creates a match with the standard initial position
    pub fn initial() -> Match {
        Match::from_grid(Grid::initial(), Color::White, Rules::default())
    }

    /// Creates a match from a layout like `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"`
    ///
    /// The check state of `side` is computed right away, so a match may start in check.
    pub fn from_layout(layout: &str, side: Color) -> Result<Match, LayoutParseError> {
        Ok(Match::from_grid(Grid::from_layout(layout)?, side, Rules::default()))
    }

    fn from_grid(grid: Grid, side: Color, rules: Rules) -> Match {
        let mut res = Match {
            grid,
            turn: 1,
            side,
            check: false,
            checkmate: false,
            rules,
            captured: Vec::new(),
        };
        res.update_status(side);
        res
    }

    /// Replaces the rules of the match
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
        self.update_status(self.checked_side());
    }

    /// Puts `piece` on the square with file letter `file` and rank number `rank`
    pub fn place_piece(&mut self, file: char, rank: u8, piece: Piece) -> Result<(), SetupError> {
        let pos = Position::new(file, rank)?;
        self.grid.place(pos, piece)?;
        self.grid.refresh();
        self.update_status(self.checked_side());
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.grid.get(pos)
    }

    /// Row-major view of the board, `snapshot[0][0]` is `a8` and `snapshot[7][7]` is `h1`
    pub fn board_snapshot(&self) -> [[Option<&Piece>; 8]; 8] {
        self.grid.rows()
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.side
    }

    /// Returns the number of the current turn, starting from 1 and incremented after every move
    #[inline]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Returns `true` if the last move gave check
    ///
    /// Normally this means that the side to move is in check. After a checkmate the turn is not
    /// passed, so the flag refers to the mated side.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Pieces captured so far, in the order of capture
    pub fn captured(&self) -> &[(Color, PieceKind)] {
        &self.captured
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.grid.king(color).and_then(|k| k.position())
    }

    /// Returns `true` if a piece of color `by` can move onto `pos`
    pub fn is_attacked(&self, pos: Position, by: Color) -> bool {
        attack::is_attacked(&self.grid, pos, by)
    }

    /// Iterates over the cached movements of all the pieces of color `color`
    ///
    /// Castlings forbidden by the rules are skipped.
    pub fn legal_movements(&self, color: Color) -> impl Iterator<Item = Movement> + '_ {
        self.grid
            .pieces_of(color)
            .flat_map(|p| p.legal_movements().iter().copied())
            .filter(move |mv| self.is_castling_allowed(mv))
    }

    /// Returns the squares the piece on `pos` can move to
    ///
    /// Fails for the same reasons as [`Match::perform_move()`] does when the source square is bad.
    /// The returned squares are not checked for leaving the own king in check.
    pub fn legal_moves_for(&self, pos: Position) -> Result<Vec<Position>, IllegalMove> {
        let piece = legal::origin(&self.grid, self.side, pos)?;
        Ok(piece
            .legal_movements()
            .iter()
            .filter(|mv| self.is_castling_allowed(mv))
            .map(|mv| mv.dst())
            .collect())
    }

    /// Makes the move from `src` to `dst` and passes the turn to the opponent
    ///
    /// Returns the captured piece, if any. If the move would leave the own king under attack,
    /// it's undone and [`IllegalMove::SelfCheck`] is returned. On any error the match is left
    /// unchanged.
    ///
    /// If the move checkmates the opponent, the turn is not passed.
    pub fn perform_move(&mut self, src: Position, dst: Position) -> Result<Option<Piece>, IllegalMove> {
        let mv = legal::resolve(&self.grid, self.side, src, dst)?;
        if !self.is_castling_allowed(&mv) {
            return Err(IllegalMove::CastlingUnderAttack(src));
        }

        let captured = mv.make(&mut self.grid);
        if attack::is_king_attacked(&self.grid, self.side) {
            mv.unmake(&mut self.grid, captured);
            return Err(IllegalMove::SelfCheck { src, dst });
        }
        if let Some(piece) = &captured {
            self.captured.push((piece.color(), piece.kind()));
        }

        self.grid.set_king_status(self.side, KingStatus::default());
        self.update_status(self.side.inv());
        if !self.checkmate {
            self.turn += 1;
            self.side = self.side.inv();
        }
        Ok(captured)
    }

    /// Side whose king the status flags refer to
    ///
    /// It's the side to move, except after a checkmate, when the turn is not passed.
    fn checked_side(&self) -> Color {
        if self.checkmate {
            self.side.inv()
        } else {
            self.side
        }
    }

    fn update_status(&mut self, color: Color) {
        let check = attack::is_king_attacked(&self.grid, color);
        let checkmate = check && !self.can_escape_check(color);
        self.grid
            .set_king_status(color, KingStatus { check, checkmate });
        self.check = check;
        self.checkmate = checkmate;
    }

    /// Returns `true` if one of the movements of `color` removes the check
    ///
    /// Every candidate is tried on a throwaway clone of the match.
    fn can_escape_check(&self, color: Color) -> bool {
        let candidates: Vec<Movement> = self.legal_movements(color).collect();
        candidates.into_iter().any(|mv| {
            let mut sandbox = self.clone();
            let _ = mv.make(&mut sandbox.grid);
            !attack::is_king_attacked(&sandbox.grid, color)
        })
    }

    fn is_castling_allowed(&self, mv: &Movement) -> bool {
        if !mv.is_castling() || self.rules.castling == CastlingRule::Permissive {
            return true;
        }
        let enemy = mv.side().inv();
        if attack::is_attacked(&self.grid, mv.src(), enemy) {
            return false;
        }
        match castling::king_transit(mv) {
            Some(step) => {
                let mut sandbox = self.grid.clone();
                let _ = step.make(&mut sandbox);
                !attack::is_attacked(&sandbox, step.dst(), enemy)
            }
            None => false,
        }
    }
}

impl Default for Match {
    #[inline]
    fn default() -> Match {
        Match::new()
    }
}
