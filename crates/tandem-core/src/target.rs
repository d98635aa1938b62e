use serde::{Deserialize, Serialize};

use crate::molecule::MoleculeType;

/// One residue position in a chain, resolved to its CCD component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueSlot {
    /// CCD component id (e.g. "ALA", "DG", "ATP").
    pub name: String,
    /// The code as written in the input: a single letter for polymers, the
    /// full component id for ligands.
    pub code: String,
    /// Index of the owning chain in `Structure::chains`.
    pub chain_index: usize,
}

/// Chain descriptor in the structural skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureChain {
    pub name: String,
    pub mol_type: MoleculeType,
    /// Shared by chains with identical entity type and sequence.
    pub entity_id: usize,
    /// Copy number of this chain within its entity.
    pub sym_id: usize,
    /// Position of the chain in file order.
    pub asym_id: usize,
    /// Offset of the chain's first slot in `Structure::residues`.
    pub res_idx: usize,
    pub res_num: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub chains: Vec<StructureChain>,
    #[serde(default)]
    pub residues: Vec<ResidueSlot>,
}

impl Structure {
    /// Residue slots belonging to the chain at `index`.
    pub fn chain_residues(&self, index: usize) -> &[ResidueSlot] {
        self.chains
            .get(index)
            .and_then(|chain| {
                let end = chain.res_idx.checked_add(chain.res_num)?;
                self.residues.get(chain.res_idx..end)
            })
            .unwrap_or(&[])
    }

    pub fn num_entities(&self) -> usize {
        self.chains
            .iter()
            .map(|c| c.entity_id + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Per-chain metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Position of the chain in file order.
    pub chain_id: usize,
    pub chain_name: String,
    /// Canonical vocabulary name the chain was validated against.
    pub entity_type: String,
    pub mol_type: MoleculeType,
    pub entity_id: usize,
    pub num_residues: usize,
    /// External alignment reference from the header, if any.
    #[serde(default)]
    pub msa_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub chains: Vec<ChainInfo>,
}

/// Parsed input ready for downstream modelling.
///
/// `sequences`, `structure.chains` and `record.chains` are index-aligned:
/// position `i` in each refers to the same chain, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub sequences: Vec<String>,
    pub structure: Structure,
    pub record: Record,
}

impl Target {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            sequences: Vec::new(),
            structure: Structure::default(),
            record: Record {
                id: id.into(),
                chains: Vec::new(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// File-order index of the chain called `name`.
    pub fn chain_index(&self, name: &str) -> Option<usize> {
        self.structure.chains.iter().position(|c| c.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
