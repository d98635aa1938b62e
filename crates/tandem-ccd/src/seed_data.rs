use tandem_core::MoleculeType;

use crate::component::Component;
use crate::dictionary::Ccd;

/// Standard residues, nucleotides and common ligands, extracted from the
/// wwPDB chemical component dictionary.
const COMPONENTS_CSV: &str = include_str!("../data/components.csv");

/// Parse the embedded CSV and return Components.
///
/// CSV columns: id, name, mol_type, one_letter_code, formula
pub fn builtin_components() -> Vec<Component> {
    let mut components = Vec::new();

    for line in COMPONENTS_CSV.lines().skip(1) {
        // skip header
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = parse_csv_line(line);
        if fields.len() < 5 {
            continue;
        }

        let Ok(mol_type) = fields[2].parse::<MoleculeType>() else {
            continue;
        };
        if fields[0].is_empty() {
            continue;
        }

        let one_letter_code = fields[3].chars().next();
        let formula = if fields[4].is_empty() {
            None
        } else {
            Some(fields[4].as_str())
        };

        components.push(Component::new(
            fields[0].as_str(),
            fields[1].as_str(),
            mol_type,
            one_letter_code,
            formula,
        ));
    }

    components
}

impl Ccd {
    /// Dictionary built from the embedded seed components, with the default
    /// `protein`, `dna`, `rna` and `ccd` vocabularies.
    pub fn builtin() -> Self {
        Self::from_components(builtin_components())
    }
}

/// Simple CSV line parser that handles quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}
