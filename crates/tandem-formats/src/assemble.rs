use std::collections::{HashMap, HashSet};

use tandem_ccd::{Ccd, Vocabulary};
use tandem_core::{ChainInfo, ResidueSlot, StructureChain, Target};

use crate::fasta::{HeaderSpec, SequenceBlock};
use crate::ParseError;

/// A block that passed validation, with its residues resolved against the CCD.
struct ValidatedChain<'a> {
    header: &'a HeaderSpec,
    vocabulary: &'a Vocabulary,
    sequence: String,
    /// (input code, CCD component id) per residue.
    residues: Vec<(String, String)>,
}

/// Validate every block against the CCD and build the target.
///
/// Validation stops at the first failing block; no partial target is returned.
/// Chains keep file order. Chains with the same entity type and sequence share
/// an entity id.
pub fn assemble(id: &str, blocks: &[SequenceBlock], ccd: &Ccd) -> Result<Target, ParseError> {
    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(blocks.len());

    for block in blocks {
        let header = &block.header;
        check_chain_id(header)?;
        if !seen.insert(header.chain_id.as_str()) {
            return Err(ParseError::DuplicateChain(header.chain_id.clone()));
        }
        let vocabulary = resolve_vocabulary(header, ccd)?;

        let sequence = block.sequence();
        let residues = resolve_residues(header, vocabulary, &sequence, ccd)?;
        validated.push(ValidatedChain {
            header,
            vocabulary,
            sequence,
            residues,
        });
    }

    Ok(build_target(id, validated))
}

/// Chain ids are a single printable character.
fn check_chain_id(header: &HeaderSpec) -> Result<(), ParseError> {
    let length = header.chain_id.chars().count();
    if length != 1 || header.chain_id.chars().any(char::is_control) {
        return Err(ParseError::Identifier {
            chain_id: header.chain_id.clone(),
            length,
        });
    }
    Ok(())
}

fn resolve_vocabulary<'a>(header: &HeaderSpec, ccd: &'a Ccd) -> Result<&'a Vocabulary, ParseError> {
    ccd.vocabulary(&header.entity_type)
        .ok_or_else(|| ParseError::UnknownEntity {
            chain_id: header.chain_id.clone(),
            entity_type: header.entity_type.clone(),
        })
}

fn resolve_residues(
    header: &HeaderSpec,
    vocabulary: &Vocabulary,
    sequence: &str,
    ccd: &Ccd,
) -> Result<Vec<(String, String)>, ParseError> {
    if !vocabulary.mol_type.is_polymer() {
        let code = sequence.to_uppercase();
        return match ccd.component(&code) {
            Some(component) => Ok(vec![(code, component.id.clone())]),
            None => Err(ParseError::UnknownComponent {
                chain_id: header.chain_id.clone(),
                code,
            }),
        };
    }

    sequence
        .chars()
        .enumerate()
        .map(|(position, residue)| {
            vocabulary
                .resolve_letter(residue)
                .and_then(|id| ccd.component(id))
                .map(|component| (residue.to_string(), component.id.clone()))
                .ok_or_else(|| ParseError::InvalidResidue {
                    chain_id: header.chain_id.clone(),
                    entity_type: vocabulary.name.clone(),
                    residue,
                    position,
                })
        })
        .collect()
}

fn build_target(id: &str, chains: Vec<ValidatedChain<'_>>) -> Target {
    let mut target = Target::new(id);
    // (entity type, sequence) -> (entity id, copies so far)
    let mut entities: HashMap<(&str, String), (usize, usize)> = HashMap::new();

    for (asym_id, chain) in chains.into_iter().enumerate() {
        let vocabulary = chain.vocabulary;
        let next_entity = entities.len();
        let (entity_id, sym_id) = {
            let entry = entities
                .entry((vocabulary.name.as_str(), chain.sequence.clone()))
                .or_insert((next_entity, 0));
            let ids = (entry.0, entry.1);
            entry.1 += 1;
            ids
        };

        let res_idx = target.structure.residues.len();
        let res_num = chain.residues.len();
        target
            .structure
            .residues
            .extend(chain.residues.into_iter().map(|(code, name)| ResidueSlot {
                name,
                code,
                chain_index: asym_id,
            }));

        target.structure.chains.push(StructureChain {
            name: chain.header.chain_id.clone(),
            mol_type: vocabulary.mol_type,
            entity_id,
            sym_id,
            asym_id,
            res_idx,
            res_num,
        });

        target.record.chains.push(ChainInfo {
            chain_id: asym_id,
            chain_name: chain.header.chain_id.clone(),
            entity_type: vocabulary.name.clone(),
            mol_type: vocabulary.mol_type,
            entity_id,
            num_residues: res_num,
            msa_id: chain.header.reference.clone(),
        });

        target.sequences.push(chain.sequence);
    }

    target
}
