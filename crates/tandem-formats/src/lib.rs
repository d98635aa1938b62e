//! Parser for multi-chain FASTA files with `>chain|entity[|msa]` headers.
//!
//! Text is split into per-chain blocks ([`fasta`]), then each block is
//! validated against a chemical component dictionary and assembled into a
//! [`Target`] ([`assemble`]).

pub mod assemble;
pub mod fasta;

use std::path::Path;

use tandem_ccd::Ccd;
use tandem_core::Target;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid format at line {line}: {message}")]
    Format { line: usize, message: String },
    #[error("No chains found in input")]
    Empty,
    #[error("Invalid chain id '{chain_id}': expected exactly one printable character, got {length}")]
    Identifier { chain_id: String, length: usize },
    #[error("Duplicate chain id '{0}'")]
    DuplicateChain(String),
    #[error("Unknown entity type '{entity_type}' for chain {chain_id}")]
    UnknownEntity { chain_id: String, entity_type: String },
    #[error("Invalid {entity_type} residue '{residue}' at position {position} in chain {chain_id}")]
    InvalidResidue {
        chain_id: String,
        entity_type: String,
        residue: char,
        /// 0-based index into the chain's concatenated sequence.
        position: usize,
    },
    #[error("Unknown component '{code}' in chain {chain_id}")]
    UnknownComponent { chain_id: String, code: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse already-loaded text. `name` becomes the record id.
pub fn parse_str(name: &str, input: &str, ccd: &Ccd) -> Result<Target, ParseError> {
    let blocks = fasta::split_blocks(input)?;
    assemble::assemble(name, &blocks, ccd)
}

/// Read and parse a file. The record id is the file stem.
pub fn parse_path<P: AsRef<Path>>(path: P, ccd: &Ccd) -> Result<Target, ParseError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading target");
    let content = std::fs::read_to_string(path)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = parse_str(&name, &content, ccd)?;

    debug!(id = %target.record.id, chains = target.len(), "Parsed target");
    Ok(target)
}
