//! Perft suite files.
//!
//! A suite is a TOML file listing positions with their expected node counts:
//!
//! ```toml
//! [[positions]]
//! name = "startpos"
//! depth = 3
//! nodes = 8902
//!
//! [[positions]]
//! name = "kiwipete"
//! fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
//! depth = 2
//! nodes = 2039
//! ```

use chess_core::FenParser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a suite file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the suite file from disk.
    #[error("Failed to read suite file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the suite file as valid TOML.
    #[error("Failed to parse suite: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The suite lists no positions.
    #[error("Suite contains no positions")]
    Empty,
}

/// One position to count, with the count it must produce.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SuiteEntry {
    /// Label shown in reports.
    pub name: String,
    /// Position in FEN. Defaults to the standard starting position.
    #[serde(default = "default_fen")]
    pub fen: String,
    /// Search depth in plies.
    pub depth: u32,
    /// Expected number of leaf nodes.
    pub nodes: u64,
}

fn default_fen() -> String {
    FenParser::STARTPOS.to_string()
}

/// A list of perft checks.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SuiteConfig {
    #[serde(default)]
    pub positions: Vec<SuiteEntry>,
}

impl SuiteConfig {
    /// Loads a suite from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl std::str::FromStr for SuiteConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let suite: SuiteConfig = toml::from_str(content)?;
        if suite.positions.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(suite)
    }
}
