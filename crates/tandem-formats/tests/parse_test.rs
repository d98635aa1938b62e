use pretty_assertions::assert_eq;
use tandem_ccd::Ccd;
use tandem_core::MoleculeType;
use tandem_formats::{fasta, parse_path, parse_str, ParseError};

const ONE_CHAIN: &str = include_str!("fixtures/one_chain.fasta");
const TWO_CHAINS: &str = include_str!("fixtures/two_chains.fasta");
const BAD_CHAIN: &str = include_str!("fixtures/bad_chain.fasta");
const COMPLEX: &str = include_str!("fixtures/complex.fasta");

fn nth_line(text: &str, n: usize) -> &str {
    text.lines().nth(n).unwrap()
}

#[test]
fn test_parse_one_chain() {
    let ccd = Ccd::builtin();
    let target = parse_str("one_chain", ONE_CHAIN, &ccd).unwrap();

    assert_eq!(target.sequences.len(), 1);
    let expected = nth_line(ONE_CHAIN, 1);
    assert_eq!(target.sequences[0].len(), expected.len());
    assert_eq!(target.sequences[0], expected);
    assert_eq!(target.structure.chains[0].name, "A");

    assert_eq!(target.record.id, "one_chain");
    assert_eq!(target.record.chains[0].chain_name, "A");
    assert_eq!(
        target.record.chains[0].msa_id.as_deref(),
        Some("./examples/msa/seq2.a3m")
    );
}

#[test]
fn test_parse_two_chains() {
    let ccd = Ccd::builtin();
    let target = parse_str("two_chains", TWO_CHAINS, &ccd).unwrap();

    assert_eq!(target.sequences.len(), 2);
    assert_eq!(target.structure.chains.len(), 2);
    assert_eq!(target.record.chains.len(), 2);

    assert_eq!(target.structure.chains[0].name, "A");
    assert_eq!(target.sequences[0], nth_line(TWO_CHAINS, 1));
    assert_eq!(target.structure.chains[1].name, "B");
    assert_eq!(target.sequences[1], nth_line(TWO_CHAINS, 3));

    // Different sequences, different entities
    assert_eq!(target.structure.chains[0].entity_id, 0);
    assert_eq!(target.structure.chains[1].entity_id, 1);
    assert_eq!(target.record.chains[1].msa_id, None);
}

#[test]
fn test_parse_bad_chain() {
    let ccd = Ccd::builtin();
    let err = parse_str("bad_chain", BAD_CHAIN, &ccd).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Identifier { ref chain_id, length: 4 } if chain_id == "AABB"
    ));
}

#[test]
fn test_parse_complex() {
    let ccd = Ccd::builtin();
    let target = parse_str("complex", COMPLEX, &ccd).unwrap();

    let names: Vec<&str> = target.structure.chains.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D", "L"]);

    let mol_types: Vec<MoleculeType> = target.record.chains.iter().map(|c| c.mol_type).collect();
    assert_eq!(
        mol_types,
        vec![
            MoleculeType::Protein,
            MoleculeType::Protein,
            MoleculeType::Dna,
            MoleculeType::Rna,
            MoleculeType::NonPolymer,
        ]
    );

    // Multi-line bodies are joined without separators
    assert_eq!(
        target.sequences[0],
        "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGT"
    );
    assert_eq!(target.record.chains[0].num_residues, 44);

    // Homodimer: one entity, two copies
    assert_eq!(target.structure.chains[0].entity_id, target.structure.chains[1].entity_id);
    assert_eq!(target.structure.chains[1].sym_id, 1);
    assert_eq!(target.structure.num_entities(), 4);

    let dna: Vec<&str> = target
        .structure
        .chain_residues(2)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(dna, vec!["DA", "DT", "DG", "DC", "DG", "DT", "DA", "DC", "DG", "DN"]);
    assert_eq!(target.structure.chain_residues(4)[0].name, "ATP");

    let total: usize = target.record.chains.iter().map(|c| c.num_residues).sum();
    assert_eq!(total, target.structure.residues.len());
}

#[test]
fn test_parse_is_deterministic() {
    let ccd = Ccd::builtin();
    let first = parse_str("complex", COMPLEX, &ccd).unwrap();
    let second = parse_str("complex", COMPLEX, &ccd).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_serialize_reparse() {
    let ccd = Ccd::builtin();
    let target = parse_str("complex", COMPLEX, &ccd).unwrap();
    let reparsed = parse_str("complex", &fasta::serialize(&target), &ccd).unwrap();
    assert_eq!(reparsed, target);
}

#[test]
fn test_invalid_residue_rejected() {
    let ccd = Ccd::builtin();
    let err = parse_str("bad", ">A|protein\nMKTAYJA\n", &ccd).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidResidue { residue: 'J', position: 5, .. }
    ));
}

#[test]
fn test_unknown_entity_rejected() {
    let ccd = Ccd::builtin();
    let err = parse_str("bad", ">A|smiles\nCCO\n", &ccd).unwrap_err();
    assert!(matches!(err, ParseError::UnknownEntity { .. }));
}

#[test]
fn test_parse_path_uses_file_stem() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::with_suffix(".fasta").unwrap();
    file.write_all(ONE_CHAIN.as_bytes()).unwrap();
    file.flush().unwrap();

    let ccd = Ccd::builtin();
    let target = parse_path(file.path(), &ccd).unwrap();
    let stem = file.path().file_stem().unwrap().to_string_lossy();
    assert_eq!(target.record.id, stem);
    assert_eq!(target.sequences[0], nth_line(ONE_CHAIN, 1));
}

#[test]
fn test_parse_path_missing_file() {
    let ccd = Ccd::builtin();
    let err = parse_path("/nonexistent/target.fasta", &ccd).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn test_reference_on_dna_chain() {
    let ccd = Ccd::builtin();
    let target = parse_str("x", ">B|dna|./msa/b.a3m\nACGT\n", &ccd).unwrap();
    assert_eq!(target.record.chains[0].msa_id.as_deref(), Some("./msa/b.a3m"));
    assert_eq!(target.sequences[0], "ACGT");
}

#[test]
fn test_ligand_from_json_dictionary_with_lowercase_ids() {
    let json = r#"{"components": [{"id": "atp", "name": "ATP", "mol_type": "nonpolymer"}]}"#;
    let ccd = Ccd::from_json_reader(json.as_bytes()).unwrap();

    for input in [">L|ccd\nATP\n", ">L|ccd\natp\n"] {
        let target = parse_str("ligand", input, &ccd).unwrap();
        assert_eq!(target.structure.chain_residues(0)[0].name, "ATP");
    }
}
