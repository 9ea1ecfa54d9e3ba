//! Core types for chess.
//!
//! This crate provides the value types shared by the engine and its callers:
//! - [`Color`], [`Piece`] and the per-square [`PieceKind`] bitset
//! - [`Square`] board coordinates and the [`Between`] line walker
//! - [`Move`] and [`MoveKind`]
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::{Between, Square};
