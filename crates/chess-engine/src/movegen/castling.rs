//! Castling candidates.

use super::attacks::is_square_attacked;
use super::MoveList;
use crate::position::{kingside_rook_home, queenside_rook_home};
use crate::Position;
use chess_core::{Color, Move, MoveKind, Piece, PieceKind, Square};
use tracing::trace;

#[derive(Debug, Clone, Copy)]
enum Side {
    Kingside,
    Queenside,
}

impl Side {
    const fn rook_home(self, color: Color) -> Square {
        match self {
            Side::Kingside => kingside_rook_home(color),
            Side::Queenside => queenside_rook_home(color),
        }
    }

    const fn king_step(self) -> i8 {
        match self {
            Side::Kingside => 1,
            Side::Queenside => -1,
        }
    }
}

/// Emits the castles available to the king on `from`.
///
/// A castle needs the king on its home square with its flags clear, the
/// allied rook in its corner, every square between them empty, and none of
/// the king's start, transit or destination squares attacked.
pub(crate) fn castling_moves(
    position: &Position,
    from: Square,
    king: PieceKind,
    moves: &mut MoveList,
) {
    let Some(color) = king.color() else {
        return;
    };
    if Square::new(color.back_row(), 4) != Some(from) {
        return;
    }

    let rights = position.castling();
    for side in [Side::Kingside, Side::Queenside] {
        let allowed = match side {
            Side::Kingside => rights.can_castle_kingside(color),
            Side::Queenside => rights.can_castle_queenside(color),
        };
        if !allowed {
            continue;
        }
        if let Some(m) = castle(position, from, king, color, side) {
            moves.push(m);
        }
    }
}

fn castle(
    position: &Position,
    from: Square,
    king: PieceKind,
    color: Color,
    side: Side,
) -> Option<Move> {
    let rook_home = side.rook_home(color);
    if position.piece_at(rook_home) != PieceKind::new(Piece::Rook, color) {
        trace!(%color, ?side, "castle refused: no rook in the corner");
        return None;
    }

    if let Some(blocker) = from.between(rook_home).find(|sq| !position.is_empty(*sq)) {
        trace!(%color, ?side, %blocker, "castle refused: path occupied");
        return None;
    }

    let transit = from.offset(0, side.king_step())?;
    let to = from.offset(0, 2 * side.king_step())?;
    if let Some(attacked) = [from, transit, to]
        .into_iter()
        .find(|sq| is_square_attacked(position, *sq, color))
    {
        trace!(%color, ?side, %attacked, "castle refused: king passes an attacked square");
        return None;
    }

    Some(Move::new(king, MoveKind::Castle, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(fen: &str) -> Vec<Move> {
        let position = Position::from_fen(fen).unwrap();
        let color = position.side_to_move();
        let from = position.king_square(color).unwrap();
        let mut moves = MoveList::new();
        castling_moves(&position, from, position.piece_at(from), &mut moves);
        moves.iter().copied().collect()
    }

    #[test]
    fn both_sides_available() {
        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.to() == Square::G1));
        assert!(moves.iter().any(|m| m.to() == Square::C1));
        assert!(moves.iter().all(|m| m.kind() == MoveKind::Castle));

        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.to() == Square::G8));
        assert!(moves.iter().any(|m| m.to() == Square::C8));
    }

    #[test]
    fn rights_gate_castling() {
        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), Square::G1);
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").is_empty());
    }

    #[test]
    fn blocked_path() {
        // The b1 knight blocks queenside even though b1 is not on the king's path.
        let moves = castles("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), Square::G1);
    }

    #[test]
    fn attacked_squares_refuse() {
        // Rook on f8 covers f1, the kingside transit square.
        let moves = castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), Square::C1);

        // In check: nothing.
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());

        // b1 may be attacked; only the king's squares matter.
        let moves = castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn missing_rook_refuses() {
        assert!(castles("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1").is_empty());
        assert!(castles("4k3/8/8/8/8/8/8/r3K2b w KQ - 0 1").is_empty());
    }

    #[test]
    fn king_off_home_square() {
        assert!(castles("4k3/8/8/8/8/8/8/R2K3R w KQ - 0 1").is_empty());
    }
}
