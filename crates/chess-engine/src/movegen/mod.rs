//! Move generation.
//!
//! [`generate_moves`] produces pseudo-legal moves: every move obeys the
//! piece's movement rules and board occupancy, but ordinary moves may leave
//! the mover's own king attacked. Castling is the exception and is checked
//! for attacked squares at generation time.
//!
//! Full legality is a separate layer on top: [`generate_legal_moves`] applies
//! each candidate and drops those that expose the king.

mod attacks;
mod castling;
mod directions;
mod pieces;
pub mod perft;

use crate::Position;
use chess_core::{Move, Piece, Square};
use thiserror::Error;

pub use attacks::{is_king_attacked, is_square_attacked};

/// A list of moves with a fixed maximum capacity.
///
/// Moves are stored inline to avoid heap allocations during generation. The
/// capacity covers pseudo-legal lists, which can exceed the 218 legal moves
/// a chess position allows.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 320;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds `m`.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all pseudo-legal moves for the side to move.
///
/// The order of the returned moves carries no meaning.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in position.pieces(position.side_to_move()) {
        if let Some(kind) = piece.piece() {
            pieces::RULES[kind.index()](position, from, piece, &mut moves);
        }
    }
    moves
}

/// Generates the moves that do not leave the mover's king attacked.
///
/// A side without a king keeps every pseudo-legal move.
pub fn generate_legal_moves(position: &Position) -> MoveList {
    let us = position.side_to_move();
    let mut moves = generate_moves(position);
    moves.retain(|m| !is_king_attacked(&position.apply(*m), us));
    moves
}

/// Error returned when a move given as text cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed move: {0}")]
    Malformed(String),

    #[error("illegal move {uci} in position {fen}")]
    NotLegal { uci: String, fen: String },
}

/// Parses UCI text into its source, destination and promotion piece.
fn parse_uci(uci: &str) -> Result<(Square, Square, Option<Piece>), MoveError> {
    let malformed = || MoveError::Malformed(uci.to_string());
    if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
        return Err(malformed());
    }

    let from = Square::from_algebraic(&uci[0..2]).ok_or_else(malformed)?;
    let to = Square::from_algebraic(&uci[2..4]).ok_or_else(malformed)?;
    let promotion = match uci[4..].chars().next() {
        None => None,
        Some(c) => match Piece::from_fen_char(c) {
            Some((piece, _)) if c.is_ascii_lowercase() && Piece::PROMOTIONS.contains(&piece) => {
                Some(piece)
            }
            _ => return Err(malformed()),
        },
    };
    Ok((from, to, promotion))
}

/// Resolves UCI text (e.g. `e2e4`, `e7e8q`) against the legal moves.
pub fn find_move(position: &Position, uci: &str) -> Result<Move, MoveError> {
    let (from, to, promotion) = parse_uci(uci)?;
    generate_legal_moves(position)
        .iter()
        .copied()
        .find(|m| {
            m.from() == from && m.to() == to && m.promotion().and_then(|p| p.piece()) == promotion
        })
        .ok_or_else(|| MoveError::NotLegal {
            uci: uci.to_string(),
            fen: position.to_fen(),
        })
}
