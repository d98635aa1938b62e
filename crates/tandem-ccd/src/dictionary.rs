use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tandem_core::MoleculeType;
use tracing::debug;

use crate::component::Component;
use crate::CcdError;

/// Name of the vocabulary that ships for each molecule type.
pub fn default_vocabulary_name(mol_type: MoleculeType) -> &'static str {
    match mol_type {
        MoleculeType::Protein => "protein",
        MoleculeType::Dna => "dna",
        MoleculeType::Rna => "rna",
        MoleculeType::NonPolymer => "ccd",
    }
}

/// The set of codes a given entity type may use.
///
/// Polymer vocabularies map single letters to component ids. A non-polymer
/// vocabulary has no letters: its chains name one component id directly, and
/// any component in the dictionary is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub mol_type: MoleculeType,
    #[serde(default)]
    pub letters: BTreeMap<char, String>,
}

impl Vocabulary {
    pub fn new(name: impl Into<String>, mol_type: MoleculeType) -> Self {
        Self {
            name: name.into().to_lowercase(),
            mol_type,
            letters: BTreeMap::new(),
        }
    }

    pub fn with_letter(mut self, letter: char, component_id: impl Into<String>) -> Self {
        self.letters.insert(letter, component_id.into().to_uppercase());
        self
    }

    /// Component id for a single-letter code.
    pub fn resolve_letter(&self, letter: char) -> Option<&str> {
        self.letters.get(&letter).map(String::as_str)
    }
}

/// Serialized form of a dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CcdDocument {
    pub components: Vec<Component>,
    /// When empty, vocabularies are derived from the components' one-letter codes.
    #[serde(default)]
    pub vocabularies: Vec<Vocabulary>,
}

/// Chemical component dictionary: components keyed by CCD id, plus the
/// vocabularies that scope which codes each entity type may use.
///
/// Read-only once built; share it by reference across parses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ccd {
    components: BTreeMap<String, Component>,
    vocabularies: BTreeMap<String, Vocabulary>,
}

impl Ccd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary and derive one vocabulary per molecule type from the
    /// components' one-letter codes. The first component to claim a letter
    /// keeps it.
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut ccd = Self::new();
        for component in components {
            ccd.insert_component(component);
        }
        ccd.derive_vocabularies();
        ccd
    }

    pub fn from_document(doc: CcdDocument) -> Result<Self, CcdError> {
        let mut ccd = Self::new();
        for component in doc.components {
            if component.id.trim().is_empty() {
                return Err(CcdError::InvalidEntry("component with empty id".to_string()));
            }
            let id = component.id.trim().to_uppercase();
            if ccd.insert_component(component).is_some() {
                return Err(CcdError::InvalidEntry(format!("duplicate component {}", id)));
            }
        }

        if doc.vocabularies.is_empty() {
            ccd.derive_vocabularies();
        } else {
            for vocab in doc.vocabularies {
                ccd.insert_vocabulary(vocab)?;
            }
        }

        Ok(ccd)
    }

    pub fn to_document(&self) -> CcdDocument {
        CcdDocument {
            components: self.components.values().cloned().collect(),
            vocabularies: self.vocabularies.values().cloned().collect(),
        }
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, CcdError> {
        let doc: CcdDocument = serde_json::from_reader(reader)?;
        let ccd = Self::from_document(doc)?;
        debug!(
            components = ccd.len(),
            vocabularies = ccd.vocabularies.len(),
            "Loaded CCD from JSON"
        );
        Ok(ccd)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CcdError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading CCD");
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn write_json(&self, writer: impl Write) -> Result<(), CcdError> {
        serde_json::to_writer_pretty(writer, &self.to_document())?;
        Ok(())
    }

    /// Insert or replace a component. Ids are stored uppercase. Returns the
    /// previous entry with the same id.
    pub fn insert_component(&mut self, mut component: Component) -> Option<Component> {
        component.id = component.id.trim().to_uppercase();
        self.components.insert(component.id.clone(), component)
    }

    /// Register a vocabulary. Every letter must point at a known component,
    /// and non-polymer vocabularies may not define letters.
    pub fn insert_vocabulary(&mut self, mut vocab: Vocabulary) -> Result<(), CcdError> {
        for id in vocab.letters.values_mut() {
            *id = id.trim().to_uppercase();
        }
        let name = vocab.name.trim().to_lowercase();
        if name.is_empty() {
            return Err(CcdError::InvalidEntry("vocabulary with empty name".to_string()));
        }
        if !vocab.mol_type.is_polymer() && !vocab.letters.is_empty() {
            return Err(CcdError::InvalidEntry(format!(
                "non-polymer vocabulary {} cannot define letters",
                name
            )));
        }
        for (letter, id) in &vocab.letters {
            if !self.components.contains_key(id) {
                return Err(CcdError::InvalidEntry(format!(
                    "vocabulary {} maps '{}' to unknown component {}",
                    name, letter, id
                )));
            }
        }
        self.vocabularies.insert(name.clone(), Vocabulary { name, ..vocab });
        Ok(())
    }

    fn derive_vocabularies(&mut self) {
        let mut derived: BTreeMap<String, Vocabulary> = BTreeMap::new();

        for component in self.components.values() {
            let Some(letter) = component.one_letter_code.filter(|_| component.mol_type.is_polymer())
            else {
                continue;
            };
            let name = default_vocabulary_name(component.mol_type);
            derived
                .entry(name.to_string())
                .or_insert_with(|| Vocabulary::new(name, component.mol_type))
                .letters
                .entry(letter)
                .or_insert_with(|| component.id.clone());
        }

        if !self.components.is_empty() {
            let name = default_vocabulary_name(MoleculeType::NonPolymer);
            derived.insert(name.to_string(), Vocabulary::new(name, MoleculeType::NonPolymer));
        }

        self.vocabularies = derived;
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn vocabularies(&self) -> impl Iterator<Item = &Vocabulary> {
        self.vocabularies.values()
    }

    /// Look up a component by CCD id (case-insensitive).
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components
            .get(id)
            .or_else(|| self.components.get(&id.trim().to_uppercase()))
    }

    /// Vocabulary for an entity type (case-insensitive).
    pub fn vocabulary(&self, entity_type: &str) -> Option<&Vocabulary> {
        self.vocabularies.get(&entity_type.trim().to_lowercase())
    }

    pub fn has_vocabulary(&self, entity_type: &str) -> bool {
        self.vocabulary(entity_type).is_some()
    }

    /// Resolve a single-letter code within an entity type's vocabulary.
    pub fn resolve(&self, entity_type: &str, code: char) -> Option<&Component> {
        let id = self.vocabulary(entity_type)?.resolve_letter(code)?;
        self.components.get(id)
    }

    pub fn is_valid_code(&self, entity_type: &str, code: char) -> bool {
        self.resolve(entity_type, code).is_some()
    }
}
