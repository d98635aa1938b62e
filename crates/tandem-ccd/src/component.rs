use serde::{Deserialize, Serialize};
use tandem_core::MoleculeType;

/// A chemical component (residue, nucleotide, or small molecule) as defined
/// in the chemical component dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// CCD identifier, uppercase (e.g. "ALA", "DG", "ATP").
    pub id: String,
    /// Full chemical name (e.g. "ALANINE").
    pub name: String,
    /// Polymer class this component links into, or `nonpolymer`.
    pub mol_type: MoleculeType,
    /// Single-letter code used in sequence strings, for polymer components.
    #[serde(default)]
    pub one_letter_code: Option<char>,
    /// Empirical formula, space separated (e.g. "C3 H7 N O2").
    #[serde(default)]
    pub formula: Option<String>,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mol_type: MoleculeType,
        one_letter_code: Option<char>,
        formula: Option<&str>,
    ) -> Self {
        Self {
            id: id.into().to_uppercase(),
            name: name.into(),
            mol_type,
            one_letter_code,
            formula: formula.map(String::from),
        }
    }

    /// Whether this component can appear as a letter in a polymer sequence.
    pub fn is_residue(&self) -> bool {
        self.mol_type.is_polymer() && self.one_letter_code.is_some()
    }
}
