//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Move, MoveKind, Piece, PieceKind, Square};
use std::hash::{Hash, Hasher};

/// Castling bookkeeping as "has moved" flags.
///
/// Each flag records that a king or a specific rook has left its home
/// square. Flags are only ever set. A side may castle while both its
/// king-moved flag and that side's rook-moved flag are clear.
///
/// Equality compares the castling *availability* the flags grant, not the
/// raw bits: a king that moved after its kingside rook and a king that moved
/// first both leave no castling, and the FEN record cannot tell them apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KING_MOVED: u8 = 0b00_0001;
    pub const WHITE_KINGSIDE_ROOK_MOVED: u8 = 0b00_0010;
    pub const WHITE_QUEENSIDE_ROOK_MOVED: u8 = 0b00_0100;
    pub const BLACK_KING_MOVED: u8 = 0b00_1000;
    pub const BLACK_KINGSIDE_ROOK_MOVED: u8 = 0b01_0000;
    pub const BLACK_QUEENSIDE_ROOK_MOVED: u8 = 0b10_0000;

    /// Nothing has moved: all four castles available.
    pub const ALL: CastlingRights = CastlingRights(0);
    /// Both kings have moved: no castling left.
    pub const NONE: CastlingRights = CastlingRights(0b11_1111);

    /// Creates rights from raw "moved" flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b11_1111)
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true if `flag` has been set.
    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    /// Returns these rights with `flag` also set.
    #[inline]
    pub const fn with(self, flag: u8) -> Self {
        CastlingRights::new(self.0 | flag)
    }

    const fn king_moved(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING_MOVED,
            Color::Black => Self::BLACK_KING_MOVED,
        }
    }

    const fn kingside_rook_moved(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE_ROOK_MOVED,
            Color::Black => Self::BLACK_KINGSIDE_ROOK_MOVED,
        }
    }

    const fn queenside_rook_moved(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE_ROOK_MOVED,
            Color::Black => Self::BLACK_QUEENSIDE_ROOK_MOVED,
        }
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.0 & (Self::king_moved(color) | Self::kingside_rook_moved(color)) == 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.0 & (Self::king_moved(color) | Self::queenside_rook_moved(color)) == 0
    }

    /// Returns the rights after `mover` leaves `from`.
    ///
    /// A king move sets its king flag. A rook move sets the flag of the
    /// corner it starts from; rooks elsewhere leave the rights untouched.
    pub fn after_move(self, mover: PieceKind, from: Square) -> Self {
        let Some(color) = mover.color() else {
            return self;
        };
        match mover.piece() {
            Some(Piece::King) => self.with(Self::king_moved(color)),
            Some(Piece::Rook) if from == kingside_rook_home(color) => {
                self.with(Self::kingside_rook_moved(color))
            }
            Some(Piece::Rook) if from == queenside_rook_home(color) => {
                self.with(Self::queenside_rook_moved(color))
            }
            _ => self,
        }
    }

    /// Decodes FEN castling letters (a subset of `KQkq`).
    pub fn from_fen(letters: &str) -> Self {
        let mut flags = 0;
        for color in Color::ALL {
            let (kingside, queenside) = match color {
                Color::White => ('K', 'Q'),
                Color::Black => ('k', 'q'),
            };
            let has_kingside = letters.contains(kingside);
            let has_queenside = letters.contains(queenside);
            if !has_kingside && !has_queenside {
                flags |= Self::king_moved(color);
            }
            if !has_kingside {
                flags |= Self::kingside_rook_moved(color);
            }
            if !has_queenside {
                flags |= Self::queenside_rook_moved(color);
            }
        }
        CastlingRights::new(flags)
    }

    /// Encodes the available castles as FEN letters, empty when none remain.
    pub fn to_fen(self) -> String {
        let mut letters = String::new();
        for color in Color::ALL {
            if self.can_castle_kingside(color) {
                letters.push(Piece::King.to_fen_char(color));
            }
            if self.can_castle_queenside(color) {
                letters.push(Piece::Queen.to_fen_char(color));
            }
        }
        letters
    }

    fn availability(self) -> [bool; 4] {
        [
            self.can_castle_kingside(Color::White),
            self.can_castle_queenside(Color::White),
            self.can_castle_kingside(Color::Black),
            self.can_castle_queenside(Color::Black),
        ]
    }
}

impl PartialEq for CastlingRights {
    fn eq(&self, other: &Self) -> bool {
        self.availability() == other.availability()
    }
}

impl Eq for CastlingRights {}

impl Hash for CastlingRights {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.availability().hash(state);
    }
}

/// Home corner of the kingside rook.
pub(crate) const fn kingside_rook_home(color: Color) -> Square {
    match color {
        Color::White => Square::H1,
        Color::Black => Square::H8,
    }
}

/// Home corner of the queenside rook.
pub(crate) const fn queenside_rook_home(color: Color) -> Square {
    match color {
        Color::White => Square::A1,
        Color::Black => Square::A8,
    }
}

/// Complete chess position state.
///
/// A position is a value: [`Position::apply`] returns a new position and
/// leaves the receiver untouched, so earlier positions stay valid for
/// history, undo, or sharing across threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [PieceKind; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut board = [PieceKind::NONE; 64];
        for color in Color::ALL {
            let back = color.back_row() as usize * 8;
            let pawns = color.pawn_row() as usize * 8;
            for (col, piece) in BACK_RANK.iter().enumerate() {
                board[back + col] = PieceKind::new(*piece, color);
                board[pawns + col] = PieceKind::new(Piece::Pawn, color);
            }
        }

        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        FenParser::parse(fen).map(Position::from)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        FenParser::from(self).to_fen()
    }

    /// Returns the content of the given square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> PieceKind {
        self.board[sq.index() as usize]
    }

    /// Returns true if nothing stands on the given square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Iterates over the pieces of one color with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        Square::all()
            .map(move |sq| (sq, self.piece_at(sq)))
            .filter(move |(_, kind)| kind.is_color(color))
    }

    /// Returns the square of the given color's king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = PieceKind::new(Piece::King, color);
        self.pieces(color)
            .find(|(_, kind)| *kind == king)
            .map(|(sq, _)| sq)
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Castling bookkeeping.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// En passant target square, if the last move was a double step.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Moves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Fullmove number (starts at 1, increments after Black's move).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Applies a move and returns the resulting position.
    ///
    /// The move is trusted to be pseudo-legal for this position; nothing is
    /// re-validated in release builds. A move that does not fit the position
    /// yields an inconsistent result.
    pub fn apply(&self, m: Move) -> Position {
        debug_assert_eq!(
            self.piece_at(m.from()),
            m.piece(),
            "{:?} does not match the source square",
            m
        );
        debug_assert!(!m.piece().is_none(), "cannot apply a null move");

        let mut board = self.board;
        board[m.from().index() as usize] = PieceKind::NONE;
        board[m.to().index() as usize] = m.placed_piece();

        match m.kind() {
            MoveKind::EnPassantCapture => {
                // The captured pawn sits beside the source, on the target's file.
                let captured = m.from().row() * 8 + m.to().col();
                board[captured as usize] = PieceKind::NONE;
            }
            MoveKind::Castle => {
                let row = m.from().row() as usize * 8;
                let (rook_from, rook_to) = if m.to().col() > m.from().col() {
                    (row + 7, row + 5)
                } else {
                    (row, row + 3)
                };
                board[rook_to] = board[rook_from];
                board[rook_from] = PieceKind::NONE;
            }
            MoveKind::Quiet | MoveKind::DoubleStep | MoveKind::Capture => {}
        }

        let mover = self.side_to_move;
        let resets_clock = m.is_capture() || m.piece().is(Piece::Pawn);

        Position {
            board,
            side_to_move: mover.opposite(),
            castling: self.castling.after_move(m.piece(), m.from()),
            en_passant: match m.kind() {
                MoveKind::DoubleStep => {
                    Square::new((m.from().row() + m.to().row()) / 2, m.to().col())
                }
                _ => None,
            },
            halfmove_clock: if resets_clock {
                0
            } else {
                self.halfmove_clock.saturating_add(1)
            },
            fullmove_number: match mover {
                Color::Black => self.fullmove_number.saturating_add(1),
                Color::White => self.fullmove_number,
            },
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl From<FenParser> for Position {
    fn from(parsed: FenParser) -> Self {
        Position {
            board: parsed.board,
            side_to_move: parsed.side_to_move,
            castling: CastlingRights::from_fen(&parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        }
    }
}

impl From<&Position> for FenParser {
    fn from(position: &Position) -> Self {
        FenParser {
            board: position.board,
            side_to_move: position.side_to_move,
            castling: position.castling.to_fen(),
            en_passant: position.en_passant,
            halfmove_clock: position.halfmove_clock,
            fullmove_number: position.fullmove_number,
        }
    }
}
