use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Coordinate outside of the 8x8 board
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("file {0:?} is outside of a..h")]
    File(char),
    #[error("rank {0} is outside of 1..8")]
    Rank(u8),
    #[error("grid index ({row}, {col}) is outside of the board")]
    Index { row: usize, col: usize },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFile(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRank(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

const FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

impl File {
    /// Column of the file in the grid, `a` is column 0
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        FILES[val]
    }

    pub fn try_from_index(val: usize) -> Option<Self> {
        FILES.get(val).copied()
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        FILES.into_iter()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(FILES[(u32::from(c) - u32::from('a')) as usize]),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank
///
/// Ranks are ordered the way grid rows are, so [`Rank::R8`] has index 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

const RANKS: [Rank; 8] = [
    Rank::R8,
    Rank::R7,
    Rank::R6,
    Rank::R5,
    Rank::R4,
    Rank::R3,
    Rank::R2,
    Rank::R1,
];

impl Rank {
    /// Row of the rank in the grid, rank 8 is row 0
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        RANKS[val]
    }

    pub fn try_from_index(val: usize) -> Option<Self> {
        RANKS.get(val).copied()
    }

    /// Returns the rank with number `num`, counted from 1 as on a real board
    pub fn from_number(num: u8) -> Option<Self> {
        match num {
            1..=8 => Some(RANKS[(8 - num) as usize]),
            _ => None,
        }
    }

    pub const fn number(&self) -> u8 {
        8 - *self as u8
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        RANKS.into_iter()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(RANKS[(u32::from('8') - u32::from(c)) as usize]),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'8' - *self as u8) as char
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// Internally, the position is stored as `row * 8 + col`, where `row = 8 - rank` and
/// `col = file - 'a'`. So `a8` is `(0, 0)` and `a1` is `(7, 0)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    /// Creates a position from file letter and rank number, e.g. `('e', 4)`
    pub fn new(file: char, rank: u8) -> Result<Position, PositionError> {
        let file = File::from_char(file).ok_or(PositionError::File(file))?;
        let rank = Rank::from_number(rank).ok_or(PositionError::Rank(rank))?;
        Ok(Position::from_parts(file, rank))
    }

    pub const fn from_parts(file: File, rank: Rank) -> Position {
        Position(((rank as u8) << 3) | file as u8)
    }

    pub fn from_row_col(row: usize, col: usize) -> Result<Position, PositionError> {
        match (Rank::try_from_index(row), File::try_from_index(col)) {
            (Some(rank), Some(file)) => Ok(Position::from_parts(file, rank)),
            _ => Err(PositionError::Index { row, col }),
        }
    }

    pub const fn from_index(val: usize) -> Position {
        assert!(val < 64, "position index must be between 0 and 63");
        Position(val as u8)
    }

    pub const fn file(&self) -> File {
        FILES[(self.0 & 7) as usize]
    }

    pub const fn rank(&self) -> Rank {
        RANKS[(self.0 >> 3) as usize]
    }

    pub const fn row(&self) -> usize {
        (self.0 >> 3) as usize
    }

    pub const fn col(&self) -> usize {
        (self.0 & 7) as usize
    }

    /// Index of the square in a row-major 64-cell array
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts the position by `delta_file` files towards `h` and `delta_rank` ranks towards `8`
    ///
    /// Returns `None` if the resulting square is outside of the board.
    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Position> {
        let col = self.col().wrapping_add(delta_file as usize);
        let row = self.row().wrapping_sub(delta_rank as usize);
        if col >= 8 || row >= 8 {
            return None;
        }
        Some(Position((row * 8 + col) as u8))
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Position)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Position({})", self);
        }
        write!(f, "Position(?{:?})", self.0)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(PositionParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let (file_ch, rank_ch) = (bytes[0] as char, bytes[1] as char);
        Ok(Position::from_parts(
            File::from_char(file_ch).ok_or(PositionParseError::UnexpectedFile(file_ch))?,
            Rank::from_char(rank_ch).ok_or(PositionParseError::UnexpectedRank(rank_ch))?,
        ))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Kind of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::King,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Upper-case letter of the piece kind, as used in FEN
    pub fn as_char(&self) -> char {
        b"PKNBRQ"[*self as usize] as char
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'K' => Some(PieceKind::King),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file() {
        for (idx, file) in File::iter().enumerate() {
            assert_eq!(file.index(), idx);
            assert_eq!(File::from_index(idx), file);
            assert_eq!(File::from_char(file.as_char()), Some(file));
        }
        assert_eq!(File::from_char('i'), None);
    }

    #[test]
    fn test_rank() {
        for (idx, rank) in Rank::iter().enumerate() {
            assert_eq!(rank.index(), idx);
            assert_eq!(Rank::from_index(idx), rank);
            assert_eq!(Rank::from_number(rank.number()), Some(rank));
        }
        assert_eq!(Rank::R1.number(), 1);
        assert_eq!(Rank::from_number(0), None);
        assert_eq!(Rank::from_number(9), None);
    }

    #[test]
    fn test_position() {
        let mut positions = Vec::new();
        for rank in Rank::iter() {
            for file in File::iter() {
                let pos = Position::from_parts(file, rank);
                assert_eq!(pos.file(), file);
                assert_eq!(pos.rank(), rank);
                assert_eq!(pos.row(), 8 - rank.number() as usize);
                assert_eq!(pos.col(), file.index());
                assert_eq!(Position::from_row_col(pos.row(), pos.col()), Ok(pos));
                assert_eq!(Position::new(file.as_char(), rank.number()), Ok(pos));
                positions.push(pos);
            }
        }
        assert_eq!(positions, Position::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_position_corners() {
        assert_eq!(Position::from_row_col(0, 0).unwrap().to_string(), "a8");
        assert_eq!(Position::from_row_col(7, 0).unwrap().to_string(), "a1");
        assert_eq!(Position::from_row_col(7, 7).unwrap().to_string(), "h1");
        let e4 = Position::new('e', 4).unwrap();
        assert_eq!((e4.row(), e4.col()), (4, 4));
    }

    #[test]
    fn test_invalid_position() {
        assert_eq!(Position::new('i', 4), Err(PositionError::File('i')));
        assert_eq!(Position::new('A', 4), Err(PositionError::File('A')));
        assert_eq!(Position::new('a', 0), Err(PositionError::Rank(0)));
        assert_eq!(Position::new('h', 9), Err(PositionError::Rank(9)));
        assert_eq!(
            Position::from_row_col(8, 0),
            Err(PositionError::Index { row: 8, col: 0 })
        );
    }

    #[test]
    fn test_shift() {
        let d4 = Position::new('d', 4).unwrap();
        assert_eq!(d4.try_shift(0, 1), Some(Position::new('d', 5).unwrap()));
        assert_eq!(d4.try_shift(1, -1), Some(Position::new('e', 3).unwrap()));
        assert_eq!(d4.try_shift(-3, 4), Some(Position::new('a', 8).unwrap()));
        assert_eq!(d4.try_shift(-4, 0), None);
        assert_eq!(d4.try_shift(0, 5), None);
        assert_eq!(d4.try_shift(0, -4), None);
    }

    #[test]
    fn test_position_str() {
        assert_eq!(Position::from_parts(File::B, Rank::R4).to_string(), "b4");
        assert_eq!(
            Position::from_str("a1"),
            Ok(Position::from_parts(File::A, Rank::R1))
        );
        assert_eq!(
            Position::from_str("h9"),
            Err(PositionParseError::UnexpectedRank('9'))
        );
        assert_eq!(
            Position::from_str("i4"),
            Err(PositionParseError::UnexpectedFile('i'))
        );
        assert_eq!(Position::from_str("e44"), Err(PositionParseError::BadLength));
    }

    #[test]
    fn test_piece_kind_chars() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(
                PieceKind::from_char(kind.as_char().to_ascii_lowercase()),
                Some(kind)
            );
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
