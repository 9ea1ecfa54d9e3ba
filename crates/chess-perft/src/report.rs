//! JSON reports for the command-line tools.

use chess_core::Move;
use chess_engine::Position;
use serde::Serialize;

/// Moves available in a position.
#[derive(Debug, Serialize)]
pub struct MovesReport {
    pub fen: String,
    /// "legal" or "pseudo-legal".
    pub mode: &'static str,
    pub moves: Vec<MoveEntry>,
}

/// One generated move.
#[derive(Debug, Serialize)]
pub struct MoveEntry {
    pub uci: String,
    /// Move kind, e.g. "DoubleStep" or "Castle".
    pub kind: String,
    /// FEN of the position after the move.
    pub fen: String,
}

impl MovesReport {
    pub fn new(position: &Position, legal: bool, moves: &[Move]) -> Self {
        MovesReport {
            fen: position.to_fen(),
            mode: if legal { "legal" } else { "pseudo-legal" },
            moves: moves
                .iter()
                .map(|m| MoveEntry {
                    uci: m.to_uci(),
                    kind: format!("{:?}", m.kind()),
                    fen: position.apply(*m).to_fen(),
                })
                .collect(),
        }
    }
}

/// Result of a single perft run.
#[derive(Debug, Serialize)]
pub struct PerftReport {
    pub fen: String,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed_ms: u128,
    /// Node counts below each root move, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divide: Option<Vec<DivideEntry>>,
}

#[derive(Debug, Serialize)]
pub struct DivideEntry {
    pub uci: String,
    pub nodes: u64,
}

/// Outcome of one suite entry.
#[derive(Debug, Serialize)]
pub struct SuiteResult {
    pub name: String,
    pub fen: String,
    pub depth: u32,
    pub expected: u64,
    pub nodes: u64,
    pub passed: bool,
}

/// Outcome of a whole suite.
#[derive(Debug, Serialize)]
pub struct SuiteReport {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<SuiteResult>,
}

impl SuiteReport {
    pub fn new(results: Vec<SuiteResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        SuiteReport {
            passed,
            failed: results.len() - passed,
            results,
        }
    }
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json<T: Serialize>(report: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
