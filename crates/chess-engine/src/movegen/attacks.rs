//! Square attack detection.
//!
//! Instead of generating the opponent's moves, each opposing piece is checked
//! against a precomputed table of which piece identities can reach a square
//! from a given relative offset. Sliders additionally need a clear line;
//! pawns need the offset to match their own forward direction.

use super::directions::{ALL, KNIGHT, MAX_RAY};
use crate::Position;
use chess_core::{Color, Piece, PieceKind, Square};

/// Width of the offset table: deltas from -7 to +7.
const SPAN: usize = 15;

/// Identity bits able to reach the center from `[d_row + 7][d_col + 7]`,
/// where the delta is attacker minus target.
const REACH: [[u8; SPAN]; SPAN] = compute_reach();

/// Builds the offset table at compile time.
const fn compute_reach() -> [[u8; SPAN]; SPAN] {
    let mut table = [[0u8; SPAN]; SPAN];
    let center = MAX_RAY;

    let mut i = 0;
    while i < ALL.len() {
        let (d_row, d_col) = ALL[i];
        let diagonal = d_row != 0 && d_col != 0;
        let slider = if diagonal {
            Piece::Bishop.bit() | Piece::Queen.bit()
        } else {
            Piece::Rook.bit() | Piece::Queen.bit()
        };

        let mut distance = 1;
        while distance <= MAX_RAY {
            let row = (center + d_row * distance) as usize;
            let col = (center + d_col * distance) as usize;
            table[row][col] |= slider;
            distance += 1;
        }

        let row = (center + d_row) as usize;
        let col = (center + d_col) as usize;
        table[row][col] |= Piece::King.bit();
        if diagonal {
            // Direction is checked per attacker; see `attacks_square`.
            table[row][col] |= Piece::Pawn.bit();
        }
        i += 1;
    }

    let mut i = 0;
    while i < KNIGHT.len() {
        let (d_row, d_col) = KNIGHT[i];
        table[(center + d_row) as usize][(center + d_col) as usize] |= Piece::Knight.bit();
        i += 1;
    }

    table
}

/// Returns true if any piece of `defender`'s opponent attacks `target`.
///
/// Whatever stands on `target` is ignored; only the attackers and the
/// squares between them and the target matter.
pub fn is_square_attacked(position: &Position, target: Square, defender: Color) -> bool {
    position
        .pieces(defender.opposite())
        .any(|(from, attacker)| attacks_square(position, from, attacker, target))
}

/// Returns true if the king of the given color is attacked.
///
/// A side without a king is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    position
        .king_square(king_color)
        .is_some_and(|sq| is_square_attacked(position, sq, king_color))
}

fn attacks_square(position: &Position, from: Square, attacker: PieceKind, target: Square) -> bool {
    if from == target {
        return false;
    }

    let d_row = from.row() as i8 - target.row() as i8;
    let d_col = from.col() as i8 - target.col() as i8;
    let reach = REACH[(d_row + MAX_RAY) as usize][(d_col + MAX_RAY) as usize];
    if reach & attacker.identity_bits() == 0 {
        return false;
    }

    match (attacker.piece(), attacker.color()) {
        // A pawn only strikes toward its own forward direction.
        (Some(Piece::Pawn), Some(color)) => {
            target.row() as i8 - from.row() as i8 == color.pawn_direction()
        }
        (Some(Piece::Knight | Piece::King), _) => true,
        (Some(_), _) => from.between(target).all(|sq| position.is_empty(sq)),
        (None, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn cell(d_row: i8, d_col: i8) -> u8 {
        REACH[(d_row + 7) as usize][(d_col + 7) as usize]
    }

    #[test]
    fn reach_table_shape() {
        assert_eq!(cell(0, 0), 0);
        assert_eq!(
            cell(1, 0),
            Piece::Rook.bit() | Piece::Queen.bit() | Piece::King.bit()
        );
        assert_eq!(
            cell(-1, 1),
            Piece::Bishop.bit() | Piece::Queen.bit() | Piece::King.bit() | Piece::Pawn.bit()
        );
        assert_eq!(cell(2, 1), Piece::Knight.bit());
        assert_eq!(cell(-7, -7), Piece::Bishop.bit() | Piece::Queen.bit());
        assert_eq!(cell(0, 7), Piece::Rook.bit() | Piece::Queen.bit());
        assert_eq!(cell(3, 1), 0);
    }

    #[test]
    fn startpos_white_pawns_are_defended() {
        let pos = Position::startpos();
        for col in 0..8 {
            let pawn = Square::new(6, col).unwrap();
            // Attacked by White pieces, i.e. with Black as the defender.
            assert!(is_square_attacked(&pos, pawn, Color::Black), "{}", pawn);
            // Black reaches nothing on White's second rank.
            assert!(!is_square_attacked(&pos, pawn, Color::White), "{}", pawn);
        }
    }

    #[test]
    fn startpos_rook_corners_are_quiet() {
        let pos = Position::startpos();
        assert!(!is_square_attacked(&pos, Square::A1, Color::Black));
        assert!(!is_square_attacked(&pos, Square::H1, Color::Black));
        assert!(!is_square_attacked(&pos, Square::A1, Color::White));
        assert!(!is_square_attacked(&pos, Square::H1, Color::White));
    }

    #[test]
    fn startpos_ranks_three_to_six() {
        let pos = Position::startpos();
        assert!(is_square_attacked(&pos, sq("b3"), Color::Black));
        assert!(is_square_attacked(&pos, sq("e3"), Color::Black));
        for col in 0..8 {
            // Rank 4 is out of White's reach, rank 5 out of Black's.
            assert!(!is_square_attacked(&pos, Square::new(4, col).unwrap(), Color::Black));
            assert!(!is_square_attacked(&pos, Square::new(3, col).unwrap(), Color::White));
        }
    }

    #[test]
    fn pawns_do_not_attack_backwards() {
        let pos = Position::from_fen("8/8/8/3p4/8/8/8/8 w - - 0 1").unwrap();
        assert!(is_square_attacked(&pos, sq("c4"), Color::White));
        assert!(is_square_attacked(&pos, sq("e4"), Color::White));
        assert!(!is_square_attacked(&pos, sq("c6"), Color::White));
        assert!(!is_square_attacked(&pos, sq("d4"), Color::White));

        let pos = Position::from_fen("8/8/8/3P4/8/8/8/8 w - - 0 1").unwrap();
        assert!(is_square_attacked(&pos, sq("e6"), Color::Black));
        assert!(!is_square_attacked(&pos, sq("e4"), Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let pos = Position::from_fen("8/8/8/8/r2P3K/8/8/b7 w - - 0 1").unwrap();
        assert!(is_square_attacked(&pos, sq("c4"), Color::White));
        assert!(is_square_attacked(&pos, sq("d4"), Color::White));
        assert!(!is_square_attacked(&pos, sq("e4"), Color::White));
        assert!(!is_square_attacked(&pos, sq("h4"), Color::White));
        // The bishop on a1 sweeps the long diagonal until d4.
        assert!(is_square_attacked(&pos, sq("c3"), Color::White));
        assert!(!is_square_attacked(&pos, sq("e5"), Color::White));
    }

    #[test]
    fn queen_knight_and_king_reach() {
        let pos = Position::from_fen("8/8/8/3q4/8/8/8/N6k w - - 0 1").unwrap();
        assert!(is_square_attacked(&pos, sq("h1"), Color::White));
        assert!(is_square_attacked(&pos, sq("d1"), Color::White));
        assert!(is_square_attacked(&pos, sq("g2"), Color::White));
        assert!(!is_square_attacked(&pos, sq("e7"), Color::White));
        assert!(is_square_attacked(&pos, sq("b3"), Color::Black));
        assert!(is_square_attacked(&pos, sq("c2"), Color::Black));
        assert!(!is_square_attacked(&pos, sq("b2"), Color::Black));
    }

    #[test]
    fn king_attacked() {
        let pos = Position::startpos();
        assert!(!is_king_attacked(&pos, Color::White));
        assert!(!is_king_attacked(&pos, Color::Black));

        let checked = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        assert!(is_king_attacked(&checked, Color::Black));
        assert!(!is_king_attacked(&checked, Color::White));

        let kingless = Position::from_fen("8/8/8/8/8/8/8/4R3 b - - 0 1").unwrap();
        assert!(!is_king_attacked(&kingless, Color::Black));
    }
}
