//! Perft (performance test) for move generator validation.
//!
//! Perft counts the legal leaf nodes at a given depth, which can be compared
//! against known-correct values to validate the generator, the legality
//! layer and [`Position::apply`] together.

use super::generate_legal_moves;
use crate::Position;
use tracing::debug;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&position.apply(*m), depth - 1))
        .sum()
}

/// Perft with divide - node count below each root move, sorted by UCI text.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_legal_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let nodes = perft(&position.apply(*m), depth.saturating_sub(1));
        debug!(mv = %m, nodes, "divide");
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
