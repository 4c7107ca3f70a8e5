//! Board grid holding the pieces

use crate::movegen;
use crate::piece::{KingStatus, Piece};
use crate::types::{Color, File, PieceKind, Position, PositionError, Rank};

use std::array;
use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error placing a piece on the board
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum SetupError {
    /// Coordinates are outside of the board
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
    /// The square already holds a piece
    #[error("square {0} is already occupied")]
    Occupied(Position),
}

/// Error parsing a board layout (i.e. the first part of FEN)
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Fixed 8x8 board, each square holds at most one piece
///
/// The grid owns the pieces. A piece only remembers a copy of its position, which the grid
/// keeps in sync: it's set when the piece is put on a square and cleared when the piece is
/// taken off.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: [Option<Piece>; 64],
}

impl Grid {
    /// Returns an empty grid
    pub fn new() -> Grid {
        Grid {
            cells: array::from_fn(|_| None),
        }
    }

    /// Returns a grid with the standard initial layout
    pub fn initial() -> Grid {
        let mut res = Grid::new();
        for file in File::iter() {
            res.put2(file, Rank::R2, Piece::new(Color::White, PieceKind::Pawn));
            res.put2(file, Rank::R7, Piece::new(Color::Black, PieceKind::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Piece::new(color, PieceKind::Rook));
            res.put2(File::B, rank, Piece::new(color, PieceKind::Knight));
            res.put2(File::C, rank, Piece::new(color, PieceKind::Bishop));
            res.put2(File::D, rank, Piece::new(color, PieceKind::Queen));
            res.put2(File::E, rank, Piece::new(color, PieceKind::King));
            res.put2(File::F, rank, Piece::new(color, PieceKind::Bishop));
            res.put2(File::G, rank, Piece::new(color, PieceKind::Knight));
            res.put2(File::H, rank, Piece::new(color, PieceKind::Rook));
        }
        res.refresh();
        res
    }

    /// Parses a layout like `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"`
    ///
    /// All the parsed pieces are considered as never moved. Legal movements are computed
    /// for all of them.
    ///
    /// Does the same as [`Grid::from_str`].
    pub fn from_layout(s: &str) -> Result<Grid, LayoutParseError> {
        Grid::from_str(s)
    }

    /// Returns `true` if `(row, col)` lies on the board
    pub const fn exists(row: isize, col: isize) -> bool {
        row >= 0 && row < 8 && col >= 0 && col < 8
    }

    #[inline]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells[pos.index()].is_some()
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.cells[pos.index()].as_ref()
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<&Piece> {
        self.get(Position::from_parts(file, rank))
    }

    /// Puts `piece` on the square `pos`
    ///
    /// Fails if the square is already occupied. Legal movements are not recomputed, call
    /// [`Grid::refresh()`] when done with placing.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<(), SetupError> {
        if self.is_occupied(pos) {
            return Err(SetupError::Occupied(pos));
        }
        self.put(pos, piece);
        Ok(())
    }

    /// Takes the piece from the square `pos` off the board, if there is one
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        let mut piece = self.cells[pos.index()].take()?;
        piece.set_position(None);
        self.verify();
        Some(piece)
    }

    /// Iterates over all the pieces on the board, in no particular order
    pub fn all_placed(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.all_placed().filter(move |p| p.color() == color)
    }

    /// Returns the king of color `color`
    ///
    /// If there are many of them (which is not a valid position), returns the first one.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces_of(color).find(|p| p.kind() == PieceKind::King)
    }

    /// Row-major view of the board, `rows[0][0]` is `a8`
    pub fn rows(&self) -> [[Option<&Piece>; 8]; 8] {
        array::from_fn(|row| array::from_fn(|col| self.cells[row * 8 + col].as_ref()))
    }

    /// Recomputes legal movements of every piece on the board
    ///
    /// All the pieces are recomputed, not only the ones affected by the last change, since
    /// any move may open or close rays of far away pieces.
    pub fn refresh(&mut self) {
        let computed: Vec<_> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell.as_ref()
                    .map(|piece| (idx, movegen::legal_movements(self, piece)))
            })
            .collect();
        for (idx, legal) in computed {
            if let Some(piece) = &mut self.cells[idx] {
                piece.set_legal(legal);
            }
        }
        self.verify();
    }

    pub(crate) fn take(&mut self, pos: Position) -> Piece {
        match self.remove(pos) {
            Some(piece) => piece,
            None => unreachable!("no piece on {}", pos),
        }
    }

    pub(crate) fn put(&mut self, pos: Position, mut piece: Piece) {
        let cell = &mut self.cells[pos.index()];
        assert!(cell.is_none(), "square {} is already occupied", pos);
        piece.set_position(Some(pos));
        *cell = Some(piece);
        self.verify();
    }

    fn put2(&mut self, file: File, rank: Rank, piece: Piece) {
        self.put(Position::from_parts(file, rank), piece);
    }

    pub(crate) fn set_king_status(&mut self, color: Color, status: KingStatus) {
        for piece in self.cells.iter_mut().flatten() {
            if piece.color() == color {
                piece.set_king_status(status);
            }
        }
    }

    #[cfg(feature = "selftest")]
    fn verify(&self) {
        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(piece) = cell {
                assert_eq!(
                    piece.position(),
                    Some(Position::from_index(idx)),
                    "piece {} is out of sync with its square",
                    piece
                );
            }
        }
    }

    #[cfg(not(feature = "selftest"))]
    #[inline]
    fn verify(&self) {}
}

impl Default for Grid {
    #[inline]
    fn default() -> Grid {
        Grid::new()
    }
}

impl FromStr for Grid {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Grid, Self::Err> {
        type Error = LayoutParseError;

        let mut file = 0_usize;
        let mut rank = 0_usize;
        let mut res = Grid::new();
        for b in s.bytes() {
            match b {
                b'1'..=b'8' => {
                    let add = (b - b'0') as usize;
                    if file + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    file += add;
                }
                b'/' => {
                    if file < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(rank)));
                    }
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    let ch = b as char;
                    let kind = PieceKind::from_char(ch).ok_or(Error::UnexpectedChar(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    res.put2(
                        File::from_index(file),
                        Rank::from_index(rank),
                        Piece::new(color, kind),
                    );
                    file += 1;
                }
            };
        }

        if file < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(rank)));
        }
        if rank < 7 {
            return Err(Error::Underflow);
        }

        res.refresh();
        Ok(res)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let piece = match self.get2(file, rank) {
                    Some(piece) => piece,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", piece)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}
