//! Immutable chess positions with table-driven move generation.
//!
//! This crate provides:
//! - [`Position`] - a value-type game state; [`Position::apply`] returns the
//!   successor position and never mutates the receiver
//! - [`CastlingRights`] - set-only "has moved" bookkeeping for kings and rooks
//! - [`generate_moves`] - pseudo-legal move generation, dispatched by piece
//! - [`is_square_attacked`] - attack detection through a precomputed
//!   relative-offset table
//! - [`generate_legal_moves`] and [`find_move`] - the full-legality layer
//! - [`perft`] - leaf-node counting for generator validation
//!
//! # Example
//!
//! ```
//! use chess_engine::{find_move, generate_moves, Position};
//!
//! let position = Position::startpos();
//! assert_eq!(generate_moves(&position).len(), 20);
//!
//! let e4 = find_move(&position, "e2e4").unwrap();
//! let next = position.apply(e4);
//! assert_eq!(
//!     next.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! // The original position is untouched.
//! assert_eq!(position, Position::startpos());
//! ```

pub mod movegen;
mod position;

pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    find_move, generate_legal_moves, generate_moves, is_king_attacked, is_square_attacked,
    MoveError, MoveList,
};
pub use position::{CastlingRights, Position};
