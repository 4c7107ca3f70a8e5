use crate::types::{CastlingSide, Color, File, Position, Rank};
use derive_more::{Add, Mul, Neg};

/// Offset between two squares, in files (towards `h`) and ranks (towards `8`)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Add, Mul, Neg)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}

impl Delta {
    pub const fn new(file: i8, rank: i8) -> Delta {
        Delta { file, rank }
    }

    pub fn apply(self, pos: Position) -> Option<Position> {
        pos.try_shift(self.file as isize, self.rank as isize)
    }
}

/// Compass direction on the board, as seen from White's side
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const fn delta(&self) -> Delta {
        match *self {
            Direction::North => Delta::new(0, 1),
            Direction::NorthEast => Delta::new(1, 1),
            Direction::East => Delta::new(1, 0),
            Direction::SouthEast => Delta::new(1, -1),
            Direction::South => Delta::new(0, -1),
            Direction::SouthWest => Delta::new(-1, -1),
            Direction::West => Delta::new(-1, 0),
            Direction::NorthWest => Delta::new(-1, 1),
        }
    }

    pub const fn is_cardinal(&self) -> bool {
        matches!(
            *self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    pub const fn is_diagonal(&self) -> bool {
        !self.is_cardinal()
    }

    /// Returns `true` if both directions are cardinal and at the right angle to each other
    pub const fn is_perpendicular(&self, other: Direction) -> bool {
        self.is_cardinal()
            && other.is_cardinal()
            && (self.delta().file == 0) != (other.delta().file == 0)
    }

    pub const fn inv(&self) -> Direction {
        match *self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Direction in which pawns of color `c` walk
pub const fn pawn_forward(c: Color) -> Direction {
    match c {
        Color::White => Direction::North,
        Color::Black => Direction::South,
    }
}

/// The two directions in which pawns of color `c` capture
pub const fn pawn_captures(c: Color) -> [Direction; 2] {
    match c {
        Color::White => [Direction::NorthWest, Direction::NorthEast],
        Color::Black => [Direction::SouthWest, Direction::SouthEast],
    }
}

pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

pub const fn pawn_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Direction in which the king walks when castling on side `s`
pub const fn castling_direction(s: CastlingSide) -> Direction {
    match s {
        CastlingSide::King => Direction::East,
        CastlingSide::Queen => Direction::West,
    }
}

/// File of the rook which takes part in castling on side `s`
pub const fn castling_rook_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::King => File::H,
        CastlingSide::Queen => File::A,
    }
}
