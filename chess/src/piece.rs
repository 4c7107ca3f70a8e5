//! Pieces and their per-piece state

use crate::movegen::MoveList;
use crate::moves::Movement;
use crate::types::{Color, PieceKind, Position};

use std::fmt;

/// Check state of a king
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KingStatus {
    pub check: bool,
    pub checkmate: bool,
}

/// Chess piece together with its mutable state
///
/// Besides color and kind, a piece remembers where it stands (set by the grid when the piece
/// is placed, cleared when it is removed), how many times it moved, and the list of movements
/// which are currently legal for it. The list is rebuilt from scratch by [`Grid::refresh()`]
/// after every change of the board.
///
/// Two pieces are equal if they have the same color and stand on the same square. Pieces
/// which are not on the board are never equal to anything.
///
/// [`Grid::refresh()`]: crate::grid::Grid::refresh
#[derive(Debug, Clone)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    pos: Option<Position>,
    moves: u32,
    legal: MoveList,
    king: Option<KingStatus>,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            color,
            kind,
            pos: None,
            moves: 0,
            legal: MoveList::new(),
            king: match kind {
                PieceKind::King => Some(KingStatus::default()),
                _ => None,
            },
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the square the piece stands on, or `None` if it's not on the board
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.pos
    }

    /// Returns how many times the piece moved
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moves > 0
    }

    #[inline]
    pub fn has_not_moved(&self) -> bool {
        self.moves == 0
    }

    /// Returns `true` if `other` is a piece of the other color
    ///
    /// A missing piece is neither an opponent nor a companion.
    #[inline]
    pub fn is_opponent_of(&self, other: Option<&Piece>) -> bool {
        other.map_or(false, |p| p.color != self.color)
    }

    /// Returns `true` if `other` is a piece of the same color
    #[inline]
    pub fn is_companion_of(&self, other: Option<&Piece>) -> bool {
        other.map_or(false, |p| p.color == self.color)
    }

    /// Returns `true` if the piece belongs to the side `side`, usually the one to move
    #[inline]
    pub fn is_from_player(&self, side: Color) -> bool {
        self.color == side
    }

    /// Movements which were legal for this piece after the last change of the board
    #[inline]
    pub fn legal_movements(&self) -> &[Movement] {
        &self.legal
    }

    pub fn legal_targets(&self) -> impl Iterator<Item = Position> + '_ {
        self.legal.iter().map(|mv| mv.dst())
    }

    pub fn is_mobile(&self) -> bool {
        !self.legal.is_empty()
    }

    /// Returns `true` if one of the legal movements of this piece ends on `pos`
    pub fn can_target(&self, pos: Position) -> bool {
        self.legal.iter().any(|mv| mv.dst() == pos)
    }

    /// Returns the movement of this piece which ends on `pos`, if any
    pub fn movement_to(&self, pos: Position) -> Option<Movement> {
        self.legal.iter().copied().find(|mv| mv.dst() == pos)
    }

    /// Check state, only kings have it
    #[inline]
    pub fn king_status(&self) -> Option<KingStatus> {
        self.king
    }

    pub fn is_in_check(&self) -> bool {
        self.king.map_or(false, |s| s.check)
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.king.map_or(false, |s| s.checkmate)
    }

    /// FEN letter of the piece, upper case for White and lower case for Black
    pub fn as_char(&self) -> char {
        let c = self.kind.as_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub(crate) fn set_position(&mut self, pos: Option<Position>) {
        self.pos = pos;
    }

    pub(crate) fn inc_moves(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn dec_moves(&mut self) {
        assert!(self.moves > 0, "move counter of {} would become negative", self);
        self.moves -= 1;
    }

    pub(crate) fn set_legal(&mut self, legal: MoveList) {
        self.legal = legal;
    }

    pub(crate) fn set_king_status(&mut self, status: KingStatus) {
        if self.king.is_some() {
            self.king = Some(status);
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Piece) -> bool {
        self.color == other.color && self.pos.is_some() && self.pos == other.pos
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(color: Color, kind: PieceKind, pos: &str) -> Piece {
        let mut p = Piece::new(color, kind);
        p.set_position(Some(pos.parse().unwrap()));
        p
    }

    #[test]
    fn test_relations() {
        let white = Piece::new(Color::White, PieceKind::Rook);
        let black = Piece::new(Color::Black, PieceKind::Pawn);
        let other_white = Piece::new(Color::White, PieceKind::Queen);

        assert!(white.is_opponent_of(Some(&black)));
        assert!(!white.is_companion_of(Some(&black)));
        assert!(white.is_companion_of(Some(&other_white)));
        assert!(!white.is_opponent_of(Some(&other_white)));
        assert!(!white.is_opponent_of(None));
        assert!(!white.is_companion_of(None));
        assert!(white.is_from_player(Color::White));
        assert!(!black.is_from_player(Color::White));
    }

    #[test]
    fn test_move_counter() {
        let mut p = Piece::new(Color::Black, PieceKind::Knight);
        assert!(p.has_not_moved());
        p.inc_moves();
        p.inc_moves();
        assert!(p.has_moved());
        assert_eq!(p.move_count(), 2);
        p.dec_moves();
        p.dec_moves();
        assert!(p.has_not_moved());
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            placed(Color::White, PieceKind::Rook, "a1"),
            placed(Color::White, PieceKind::Queen, "a1")
        );
        assert_ne!(
            placed(Color::White, PieceKind::Rook, "a1"),
            placed(Color::Black, PieceKind::Rook, "a1")
        );
        assert_ne!(
            placed(Color::White, PieceKind::Rook, "a1"),
            placed(Color::White, PieceKind::Rook, "a2")
        );
        assert_ne!(
            Piece::new(Color::White, PieceKind::Rook),
            Piece::new(Color::White, PieceKind::Rook)
        );
    }

    #[test]
    fn test_king_status() {
        let mut king = Piece::new(Color::White, PieceKind::King);
        let mut rook = Piece::new(Color::White, PieceKind::Rook);
        assert_eq!(king.king_status(), Some(KingStatus::default()));
        assert_eq!(rook.king_status(), None);

        let status = KingStatus {
            check: true,
            checkmate: false,
        };
        king.set_king_status(status);
        rook.set_king_status(status);
        assert!(king.is_in_check());
        assert!(!king.is_in_checkmate());
        assert!(!rook.is_in_check());
    }

    #[test]
    fn test_chars() {
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).to_string(), "N");
        assert_eq!(Piece::new(Color::Black, PieceKind::Queen).to_string(), "q");
    }
}
