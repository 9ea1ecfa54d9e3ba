//! Chess piece representation.
//!
//! [`Piece`] names a piece identity. [`PieceKind`] is what a board square
//! holds: a small bitset of one identity bit plus a color bit, or nothing at
//! all. Classification ("is this a diagonal slider", "is this an enemy") is
//! done with bit tests rather than per-piece types.

use crate::Color;
use std::fmt;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Pieces a pawn may promote into.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the identity bit used by [`PieceKind`].
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    const fn from_bit(bit: u8) -> Option<Piece> {
        match bit {
            0b00_0001 => Some(Piece::Pawn),
            0b00_0010 => Some(Piece::Knight),
            0b00_0100 => Some(Piece::Bishop),
            0b00_1000 => Some(Piece::Rook),
            0b01_0000 => Some(Piece::Queen),
            0b10_0000 => Some(Piece::King),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The content of one board square.
///
/// Bits 0-5 hold the piece identity (see [`Piece::bit`]), bit 6 is set for
/// White. [`PieceKind::NONE`] is an empty square and never carries the color
/// bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceKind(u8);

impl PieceKind {
    const WHITE: u8 = 1 << 6;
    const IDENTITY: u8 = 0b0011_1111;
    const DIAGONAL: u8 = Piece::Bishop.bit() | Piece::Queen.bit();
    const STRAIGHT: u8 = Piece::Rook.bit() | Piece::Queen.bit();

    /// An empty square.
    pub const NONE: PieceKind = PieceKind(0);

    pub const WHITE_PAWN: PieceKind = PieceKind::new(Piece::Pawn, Color::White);
    pub const WHITE_KNIGHT: PieceKind = PieceKind::new(Piece::Knight, Color::White);
    pub const WHITE_BISHOP: PieceKind = PieceKind::new(Piece::Bishop, Color::White);
    pub const WHITE_ROOK: PieceKind = PieceKind::new(Piece::Rook, Color::White);
    pub const WHITE_QUEEN: PieceKind = PieceKind::new(Piece::Queen, Color::White);
    pub const WHITE_KING: PieceKind = PieceKind::new(Piece::King, Color::White);
    pub const BLACK_PAWN: PieceKind = PieceKind::new(Piece::Pawn, Color::Black);
    pub const BLACK_KNIGHT: PieceKind = PieceKind::new(Piece::Knight, Color::Black);
    pub const BLACK_BISHOP: PieceKind = PieceKind::new(Piece::Bishop, Color::Black);
    pub const BLACK_ROOK: PieceKind = PieceKind::new(Piece::Rook, Color::Black);
    pub const BLACK_QUEEN: PieceKind = PieceKind::new(Piece::Queen, Color::Black);
    pub const BLACK_KING: PieceKind = PieceKind::new(Piece::King, Color::Black);

    /// Creates the kind for a piece of the given color.
    #[inline]
    pub const fn new(piece: Piece, color: Color) -> Self {
        match color {
            Color::White => PieceKind(piece.bit() | Self::WHITE),
            Color::Black => PieceKind(piece.bit()),
        }
    }

    /// Returns true for an empty square.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns the identity bits without the color bit.
    #[inline]
    pub const fn identity_bits(self) -> u8 {
        self.0 & Self::IDENTITY
    }

    /// Returns the piece identity, or `None` for an empty square.
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        Piece::from_bit(self.identity_bits())
    }

    /// Returns the color, or `None` for an empty square.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.is_none() {
            None
        } else if self.0 & Self::WHITE != 0 {
            Some(Color::White)
        } else {
            Some(Color::Black)
        }
    }

    /// Returns true if this is a piece of the given identity (any color).
    #[inline]
    pub const fn is(self, piece: Piece) -> bool {
        self.0 & piece.bit() != 0
    }

    /// Returns true if this is a piece of the given color.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        match color {
            Color::White => self.0 & Self::WHITE != 0,
            Color::Black => !self.is_none() && self.0 & Self::WHITE == 0,
        }
    }

    /// Bishop or queen.
    #[inline]
    pub const fn is_diagonal_slider(self) -> bool {
        self.0 & Self::DIAGONAL != 0
    }

    /// Rook or queen.
    #[inline]
    pub const fn is_straight_slider(self) -> bool {
        self.0 & Self::STRAIGHT != 0
    }

    /// Bishop, rook, or queen.
    #[inline]
    pub const fn is_ray(self) -> bool {
        self.0 & (Self::DIAGONAL | Self::STRAIGHT) != 0
    }

    /// Returns true if both squares hold pieces of the same color.
    #[inline]
    pub const fn is_ally_of(self, other: PieceKind) -> bool {
        !self.is_none() && !other.is_none() && (self.0 & Self::WHITE) == (other.0 & Self::WHITE)
    }

    /// Returns true if both squares hold pieces of different colors.
    #[inline]
    pub const fn is_opponent_of(self, other: PieceKind) -> bool {
        !self.is_none() && !other.is_none() && (self.0 & Self::WHITE) != (other.0 & Self::WHITE)
    }

    /// Returns true if a pawn of this kind may promote into `target`.
    ///
    /// Valid targets are the queen, rook, bishop and knight of the same color.
    pub const fn can_promote_into(self, target: PieceKind) -> bool {
        if !self.is(Piece::Pawn) {
            return false;
        }
        let same_color = (self.0 & Self::WHITE) == (target.0 & Self::WHITE);
        same_color
            && matches!(
                target.piece(),
                Some(Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)
            )
    }

    /// Returns the FEN letter, or `None` for an empty square.
    pub fn to_fen_char(self) -> Option<char> {
        match (self.piece(), self.color()) {
            (Some(piece), Some(color)) => Some(piece.to_fen_char(color)),
            _ => None,
        }
    }

    /// Parses a FEN piece letter.
    pub fn from_fen_char(c: char) -> Option<Self> {
        Piece::from_fen_char(c).map(|(piece, color)| PieceKind::new(piece, color))
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.color(), self.piece()) {
            (Some(color), Some(piece)) => write!(f, "{}{}", color, piece),
            _ => write!(f, "None"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char().unwrap_or('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(Piece::King.to_fen_char(Color::White), 'K');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(Piece::from_fen_char('P'), Some((Piece::Pawn, Color::White)));
        assert_eq!(Piece::from_fen_char('p'), Some((Piece::Pawn, Color::Black)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn kind_roundtrips_identity_and_color() {
        for piece in Piece::ALL {
            for color in Color::ALL {
                let kind = PieceKind::new(piece, color);
                assert_eq!(kind.piece(), Some(piece));
                assert_eq!(kind.color(), Some(color));
                assert!(kind.is_color(color));
                assert!(!kind.is_color(color.opposite()));
            }
        }
    }

    #[test]
    fn none_has_no_color() {
        assert!(PieceKind::NONE.is_none());
        assert_eq!(PieceKind::NONE.color(), None);
        assert_eq!(PieceKind::NONE.piece(), None);
        assert!(!PieceKind::NONE.is_color(Color::White));
        assert!(!PieceKind::NONE.is_color(Color::Black));
        assert_eq!(PieceKind::default(), PieceKind::NONE);
    }

    #[test]
    fn slider_classification() {
        assert!(PieceKind::WHITE_BISHOP.is_diagonal_slider());
        assert!(!PieceKind::WHITE_BISHOP.is_straight_slider());
        assert!(PieceKind::BLACK_ROOK.is_straight_slider());
        assert!(!PieceKind::BLACK_ROOK.is_diagonal_slider());
        assert!(PieceKind::BLACK_QUEEN.is_diagonal_slider());
        assert!(PieceKind::BLACK_QUEEN.is_straight_slider());
        for kind in [
            PieceKind::WHITE_PAWN,
            PieceKind::WHITE_KNIGHT,
            PieceKind::BLACK_KING,
            PieceKind::NONE,
        ] {
            assert!(!kind.is_ray(), "{:?}", kind);
        }
    }

    #[test]
    fn allies_and_opponents() {
        assert!(PieceKind::WHITE_PAWN.is_ally_of(PieceKind::WHITE_KING));
        assert!(PieceKind::WHITE_PAWN.is_opponent_of(PieceKind::BLACK_PAWN));
        assert!(!PieceKind::WHITE_PAWN.is_ally_of(PieceKind::NONE));
        assert!(!PieceKind::NONE.is_opponent_of(PieceKind::BLACK_PAWN));
    }

    #[test]
    fn promotion_targets() {
        assert!(PieceKind::WHITE_PAWN.can_promote_into(PieceKind::WHITE_QUEEN));
        assert!(PieceKind::WHITE_PAWN.can_promote_into(PieceKind::WHITE_KNIGHT));
        assert!(!PieceKind::WHITE_PAWN.can_promote_into(PieceKind::BLACK_QUEEN));
        assert!(!PieceKind::WHITE_PAWN.can_promote_into(PieceKind::WHITE_KING));
        assert!(!PieceKind::WHITE_PAWN.can_promote_into(PieceKind::WHITE_PAWN));
        assert!(!PieceKind::BLACK_ROOK.can_promote_into(PieceKind::BLACK_QUEEN));
        assert!(PieceKind::BLACK_PAWN.can_promote_into(PieceKind::BLACK_BISHOP));
    }

    #[test]
    fn kind_fen_chars() {
        assert_eq!(PieceKind::from_fen_char('Q'), Some(PieceKind::WHITE_QUEEN));
        assert_eq!(PieceKind::from_fen_char('n'), Some(PieceKind::BLACK_KNIGHT));
        assert_eq!(PieceKind::BLACK_KING.to_fen_char(), Some('k'));
        assert_eq!(PieceKind::NONE.to_fen_char(), None);
        assert_eq!(format!("{}", PieceKind::NONE), ".");
        assert_eq!(format!("{:?}", PieceKind::WHITE_ROOK), "WhiteRook");
    }
}
