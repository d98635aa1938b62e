use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chemical class of a chain. Decides how its sequence body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoleculeType {
    Protein,
    Dna,
    Rna,
    NonPolymer,
}

#[derive(Debug, Error)]
#[error("Unknown molecule type: {0}")]
pub struct UnknownMoleculeType(pub String);

impl MoleculeType {
    /// Polymers are read one residue per letter; non-polymers are a single
    /// component id.
    pub fn is_polymer(&self) -> bool {
        !matches!(self, MoleculeType::NonPolymer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoleculeType::Protein => "protein",
            MoleculeType::Dna => "dna",
            MoleculeType::Rna => "rna",
            MoleculeType::NonPolymer => "nonpolymer",
        }
    }
}

impl FromStr for MoleculeType {
    type Err = UnknownMoleculeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protein" => Ok(MoleculeType::Protein),
            "dna" => Ok(MoleculeType::Dna),
            "rna" => Ok(MoleculeType::Rna),
            "nonpolymer" | "non-polymer" | "ligand" => Ok(MoleculeType::NonPolymer),
            _ => Err(UnknownMoleculeType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
