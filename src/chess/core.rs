//! Board primitives: squares, files, ranks, colors and the compass
//! directions a king or rook can move along.

use std::fmt;

use strum::EnumIter;

/// Width (and height) of the board.
pub const BOARD_WIDTH: u8 = 8;

/// A file (column), `a` through `h`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter)]
#[repr(u8)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Creates a file from its zero-based index, bounds-checked in debug
    /// builds.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_WIDTH, "file index out of range: {index}");
        // SAFETY: File is repr(u8) with exactly 8 variants matching 0..8.
        unsafe { std::mem::transmute::<u8, Self>(index) }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'a' + self.index()) as char)
    }
}

/// A rank (row), `1` through `8`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter)]
#[repr(u8)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_WIDTH, "rank index out of range: {index}");
        // SAFETY: Rank is repr(u8) with exactly 8 variants matching 0..8.
        unsafe { std::mem::transmute::<u8, Self>(index) }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// A square on the board, `0..64`, `rank = square >> 3`, `file = square & 7`.
pub type Square = u8;

/// Returns the rank of `square`.
#[must_use]
pub const fn rank(square: Square) -> u8 {
    square >> 3
}

/// Returns the file of `square`.
#[must_use]
pub const fn file(square: Square) -> u8 {
    square & 7
}

/// Builds a square from a file and rank, both `0..8`.
#[must_use]
pub const fn square(file: u8, rank: u8) -> Square {
    debug_assert!(file < BOARD_WIDTH && rank < BOARD_WIDTH);
    rank * BOARD_WIDTH + file
}

/// Renders `square` in algebraic notation, e.g. `a1`.
#[must_use]
pub fn square_to_str(square: Square) -> String {
    format!(
        "{}{}",
        File::from_index(file(square)),
        Rank::from_index(rank(square))
    )
}

/// Parses a square in algebraic notation, e.g. `a1`.
///
/// # Errors
///
/// Returns an error if `input` is not exactly two characters forming a
/// valid file letter followed by a valid rank digit.
pub fn square_from_str(input: &str) -> anyhow::Result<Square> {
    let bytes = input.as_bytes();
    anyhow::ensure!(
        bytes.len() == 2,
        "square must be exactly 2 characters, got {input:?}"
    );
    let file = bytes[0];
    anyhow::ensure!(
        (b'a'..=b'h').contains(&file),
        "invalid file in square {input:?}"
    );
    let rank = bytes[1];
    anyhow::ensure!(
        (b'1'..=b'8').contains(&rank),
        "invalid rank in square {input:?}"
    );
    Ok(square(file - b'a', rank - b'1'))
}

/// Chebyshev (king-move) distance between two squares.
#[must_use]
pub fn king_distance(a: Square, b: Square) -> u8 {
    let rank_diff = (i16::from(rank(a)) - i16::from(rank(b))).unsigned_abs();
    let file_diff = (i16::from(file(a)) - i16::from(file(b))).unsigned_abs();
    rank_diff.max(file_diff) as u8
}

/// Whether two kings on `a` and `b` would stand adjacent (illegal: two
/// kings may never be a king-move apart).
#[must_use]
pub fn king_adjacent(a: Square, b: Square) -> bool {
    king_distance(a, b) <= 1
}

/// Which side is to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            other => anyhow::bail!("invalid side to move: {other:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "w",
            Self::Black => "b",
        })
    }
}

/// The eight compass directions a king can step in, and a rook can slide
/// along.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// The four directions a rook slides along.
    pub const ROOK: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Steps one square from `origin` in this direction, or `None` if that
    /// would leave the board.
    #[must_use]
    pub fn step(self, origin: Square) -> Option<Square> {
        let (f, r) = (i16::from(file(origin)), i16::from(rank(origin)));
        let (df, dr) = match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),
        };
        let (nf, nr) = (f + df, r + dr);
        if (0..8).contains(&nf) && (0..8).contains(&nr) {
            Some(square(nf as u8, nr as u8))
        } else {
            None
        }
    }
}
