//! Per-piece movement rules.
//!
//! Every rule has the same signature so that the generator can pick one from
//! a table indexed by piece identity.

use super::castling::castling_moves;
use super::directions::{ALL, DIAGONAL, KNIGHT, MAX_RAY, ORTHOGONAL};
use super::MoveList;
use crate::Position;
use chess_core::{Move, MoveKind, Piece, PieceKind, Square};

/// Signature shared by all movement rules.
pub(crate) type Rule = fn(&Position, Square, PieceKind, &mut MoveList);

/// Rules indexed by [`Piece::index`].
pub(crate) const RULES: [Rule; 6] = [
    pawn_moves,
    knight_moves,
    slider_moves,
    slider_moves,
    slider_moves,
    king_moves,
];

/// Pushes `m`, or its four promotions when it lands on the far rank.
fn push_pawn_move(moves: &mut MoveList, m: Move, promotion_row: u8) {
    if m.to().row() != promotion_row {
        moves.push(m);
        return;
    }
    let Some(color) = m.piece().color() else {
        return;
    };
    for piece in Piece::PROMOTIONS {
        moves.push(m.with_promotion(PieceKind::new(piece, color)));
    }
}

pub(crate) fn pawn_moves(position: &Position, from: Square, pawn: PieceKind, moves: &mut MoveList) {
    let Some(color) = pawn.color() else {
        return;
    };
    let forward = color.pawn_direction();
    let promotion_row = color.promotion_row();

    if let Some(to) = from.offset(forward, 0) {
        if position.is_empty(to) {
            push_pawn_move(
                moves,
                Move::new(pawn, MoveKind::Quiet, from, to),
                promotion_row,
            );

            if from.row() == color.pawn_row() {
                if let Some(to) = from.offset(2 * forward, 0) {
                    if position.is_empty(to) {
                        moves.push(Move::new(pawn, MoveKind::DoubleStep, from, to));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(forward, d_col) else {
            continue;
        };
        let target = position.piece_at(to);
        if target.is_opponent_of(pawn) {
            push_pawn_move(
                moves,
                Move::new(pawn, MoveKind::Capture, from, to),
                promotion_row,
            );
        } else if position.en_passant() == Some(to) {
            moves.push(Move::new(pawn, MoveKind::EnPassantCapture, from, to));
        }
    }
}

/// Emits a single-step move unless an ally occupies the destination.
fn push_step(
    position: &Position,
    from: Square,
    to: Square,
    piece: PieceKind,
    moves: &mut MoveList,
) {
    let target = position.piece_at(to);
    if target.is_none() {
        moves.push(Move::new(piece, MoveKind::Quiet, from, to));
    } else if target.is_opponent_of(piece) {
        moves.push(Move::new(piece, MoveKind::Capture, from, to));
    }
}

pub(crate) fn knight_moves(
    position: &Position,
    from: Square,
    knight: PieceKind,
    moves: &mut MoveList,
) {
    for (d_row, d_col) in KNIGHT {
        if let Some(to) = from.offset(d_row, d_col) {
            push_step(position, from, to, knight, moves);
        }
    }
}

pub(crate) fn slider_moves(
    position: &Position,
    from: Square,
    slider: PieceKind,
    moves: &mut MoveList,
) {
    let directions: &[(i8, i8)] = match (slider.is_straight_slider(), slider.is_diagonal_slider()) {
        (true, true) => &ALL,
        (true, false) => &ORTHOGONAL,
        (false, true) => &DIAGONAL,
        (false, false) => &[],
    };

    for &(d_row, d_col) in directions {
        for distance in 1..=MAX_RAY {
            let Some(to) = from.offset(d_row * distance, d_col * distance) else {
                break;
            };
            let target = position.piece_at(to);
            if target.is_none() {
                moves.push(Move::new(slider, MoveKind::Quiet, from, to));
                continue;
            }
            if target.is_opponent_of(slider) {
                moves.push(Move::new(slider, MoveKind::Capture, from, to));
            }
            break;
        }
    }
}

pub(crate) fn king_moves(
    position: &Position,
    from: Square,
    king: PieceKind,
    moves: &mut MoveList,
) {
    for (d_row, d_col) in ALL {
        if let Some(to) = from.offset(d_row, d_col) {
            push_step(position, from, to, king, moves);
        }
    }
    castling_moves(position, from, king, moves);
}
