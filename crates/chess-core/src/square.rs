//! Board square representation.

use std::fmt;

/// A square on the chess board, indexed 0-63.
///
/// Squares are stored as `row * 8 + col`. Row 0 is rank 8 (the first rank
/// written in FEN) and column 0 is the a-file:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a1 = 56, ..., h1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, both in 0-7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::new(b'8' - rank, file - b'a')
    }

    /// Iterates over all 64 squares from a8 to h1.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0 = rank 8, 7 = rank 1).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0 = a-file, 7 = h-file).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square displaced by the given deltas, if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Square(row as u8 * 8 + col as u8))
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        format!("{}{}", file, rank)
    }

    /// Returns true if both squares share a row, a column, or a diagonal.
    #[inline]
    pub const fn is_aligned_with(self, other: Square) -> bool {
        let d_row = other.row() as i8 - self.row() as i8;
        let d_col = other.col() as i8 - self.col() as i8;
        d_row == 0 || d_col == 0 || d_row == d_col || d_row == -d_col
    }

    /// Returns the squares strictly between `self` and `other`, walking from
    /// `self` toward `other`. Both endpoints are excluded.
    ///
    /// # Panics
    ///
    /// Panics if the squares are not on a common row, column or diagonal.
    /// Use [`Square::is_aligned_with`] to check first.
    pub fn between(self, other: Square) -> Between {
        assert!(
            self.is_aligned_with(other),
            "squares {} and {} are not aligned",
            self,
            other
        );
        let d_row = other.row() as i8 - self.row() as i8;
        let d_col = other.col() as i8 - self.col() as i8;
        let distance = d_row.abs().max(d_col.abs());
        Between {
            next: self,
            step: (d_row.signum(), d_col.signum()),
            remaining: (distance - 1).max(0) as u8,
        }
    }

    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// Iterator returned by [`Square::between`].
#[derive(Debug, Clone)]
pub struct Between {
    next: Square,
    step: (i8, i8),
    remaining: u8,
}

impl Iterator for Between {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.next = self.next.offset(self.step.0, self.step.1)?;
        Some(self.next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Between {}
