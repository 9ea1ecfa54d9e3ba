//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// What a move does besides relocating the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Move to an empty square.
    Quiet = 0,
    /// Pawn advancing two squares from its starting row.
    DoubleStep = 1,
    /// Capture of the piece standing on the destination square.
    Capture = 2,
    /// Pawn capture of a pawn that just double-stepped past the destination.
    EnPassantCapture = 3,
    /// King moving two files, with the rook jumping over it.
    Castle = 4,
}

impl MoveKind {
    /// Returns true for both capture kinds.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::EnPassantCapture)
    }
}

/// A chess move.
///
/// Carries the moving piece so a position can apply it without looking the
/// piece up again. Moves are only meaningful for the position they were
/// generated from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    piece: PieceKind,
    kind: MoveKind,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new non-promoting move.
    #[inline]
    pub const fn new(piece: PieceKind, kind: MoveKind, from: Square, to: Square) -> Self {
        Move {
            piece,
            kind,
            from,
            to,
            promotion: None,
        }
    }

    /// Returns this move with the pawn promoting into `into`.
    #[inline]
    pub fn with_promotion(self, into: PieceKind) -> Self {
        debug_assert!(
            self.piece.can_promote_into(into),
            "{:?} cannot promote into {:?}",
            self.piece,
            into
        );
        Move {
            promotion: Some(into),
            ..self
        }
    }

    /// Returns the moving piece.
    #[inline]
    pub const fn piece(self) -> PieceKind {
        self.piece
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the piece a promoting pawn turns into.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns the piece standing on the destination after the move.
    #[inline]
    pub const fn placed_piece(self) -> PieceKind {
        match self.promotion {
            Some(into) => into,
            None => self.piece,
        }
    }

    /// Returns true for captures, including en passant.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.kind.is_capture()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = self
            .promotion
            .and_then(|p| p.to_fen_char())
            .map(|c| c.to_ascii_lowercase().to_string())
            .unwrap_or_default();
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::new(PieceKind::NONE, MoveKind::Quiet, Square::A8, Square::A8);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} {:?})", self.to_uci(), self.piece, self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_accessors() {
        let m = Move::new(PieceKind::WHITE_PAWN, MoveKind::DoubleStep, sq("e2"), sq("e4"));
        assert_eq!(m.piece(), PieceKind::WHITE_PAWN);
        assert_eq!(m.kind(), MoveKind::DoubleStep);
        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));
        assert_eq!(m.promotion(), None);
        assert_eq!(m.placed_piece(), PieceKind::WHITE_PAWN);
        assert!(!m.is_capture());
    }

    #[test]
    fn move_uci() {
        let m = Move::new(PieceKind::WHITE_PAWN, MoveKind::Quiet, sq("e2"), sq("e3"));
        assert_eq!(m.to_uci(), "e2e3");

        let promo = Move::new(PieceKind::WHITE_PAWN, MoveKind::Quiet, sq("e7"), sq("e8"))
            .with_promotion(PieceKind::WHITE_QUEEN);
        assert_eq!(promo.to_uci(), "e7e8q");
        assert_eq!(promo.placed_piece(), PieceKind::WHITE_QUEEN);

        let under = Move::new(PieceKind::BLACK_PAWN, MoveKind::Capture, sq("b2"), sq("a1"))
            .with_promotion(PieceKind::BLACK_KNIGHT);
        assert_eq!(under.to_uci(), "b2a1n");
    }

    #[test]
    fn capture_kinds() {
        assert!(!MoveKind::Quiet.is_capture());
        assert!(!MoveKind::DoubleStep.is_capture());
        assert!(MoveKind::Capture.is_capture());
        assert!(MoveKind::EnPassantCapture.is_capture());
        assert!(!MoveKind::Castle.is_capture());
    }

    #[test]
    fn move_null() {
        assert_eq!(Move::NULL.from(), Square::A8);
        assert!(Move::NULL.piece().is_none());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::new(PieceKind::WHITE_KNIGHT, MoveKind::Quiet, sq("g1"), sq("f3"));
        assert_eq!(format!("{}", m), "g1f3");
        assert_eq!(format!("{:?}", m), "Move(g1f3 WhiteKnight Quiet)");
    }
}
