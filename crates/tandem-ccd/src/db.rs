use rusqlite::{params, Connection, Result as SqlResult};
use tandem_core::MoleculeType;
use tracing::debug;

use crate::component::Component;
use crate::dictionary::{Ccd, Vocabulary};
use crate::CcdError;

/// Create the dictionary tables if they do not exist.
pub fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS components (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            mol_type        TEXT NOT NULL,
            one_letter_code TEXT,
            formula         TEXT
        );
        CREATE TABLE IF NOT EXISTS vocabularies (
            name     TEXT PRIMARY KEY,
            mol_type TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS vocabulary_letters (
            vocabulary   TEXT NOT NULL REFERENCES vocabularies(name),
            letter       TEXT NOT NULL,
            component_id TEXT NOT NULL REFERENCES components(id),
            PRIMARY KEY (vocabulary, letter)
        );
        CREATE INDEX IF NOT EXISTS idx_components_mol_type ON components(mol_type);",
    )
}

/// Replace the stored dictionary with `ccd`, in one transaction.
pub fn save_ccd(conn: &mut Connection, ccd: &Ccd) -> SqlResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM vocabulary_letters;
         DELETE FROM vocabularies;
         DELETE FROM components;",
    )?;

    for c in ccd.components() {
        tx.execute(
            "INSERT INTO components (id, name, mol_type, one_letter_code, formula)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                c.id,
                c.name,
                c.mol_type.as_str(),
                c.one_letter_code.map(String::from),
                c.formula,
            ],
        )?;
    }

    for vocab in ccd.vocabularies() {
        tx.execute(
            "INSERT INTO vocabularies (name, mol_type) VALUES (?1, ?2)",
            params![vocab.name, vocab.mol_type.as_str()],
        )?;
        for (letter, id) in &vocab.letters {
            tx.execute(
                "INSERT INTO vocabulary_letters (vocabulary, letter, component_id)
                 VALUES (?1, ?2, ?3)",
                params![vocab.name, letter.to_string(), id],
            )?;
        }
    }

    tx.commit()
}

/// Load the stored dictionary.
pub fn load_ccd(conn: &Connection) -> Result<Ccd, CcdError> {
    let mut ccd = Ccd::new();

    let mut stmt = conn.prepare(
        "SELECT id, name, mol_type, one_letter_code, formula FROM components ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;
    for row in rows {
        let (id, name, mol_type, letter, formula) = row?;
        let mol_type = parse_mol_type(&mol_type)?;
        let letter = letter.and_then(|l| l.chars().next());
        ccd.insert_component(Component::new(id, name, mol_type, letter, formula.as_deref()));
    }

    let mut vocab_stmt = conn.prepare("SELECT name, mol_type FROM vocabularies ORDER BY name")?;
    let mut letter_stmt = conn.prepare(
        "SELECT letter, component_id FROM vocabulary_letters WHERE vocabulary = ?1",
    )?;
    let vocab_rows = vocab_stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;
    for row in vocab_rows {
        let (name, mol_type) = row?;
        let mut vocab = Vocabulary::new(name.as_str(), parse_mol_type(&mol_type)?);
        let letters = letter_stmt.query_map(params![name], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for letter in letters {
            let (letter, id) = letter?;
            if let Some(ch) = letter.chars().next() {
                vocab = vocab.with_letter(ch, id);
            }
        }
        ccd.insert_vocabulary(vocab)?;
    }

    debug!(components = ccd.len(), "Loaded CCD from database");
    Ok(ccd)
}

fn parse_mol_type(value: &str) -> Result<MoleculeType, CcdError> {
    value
        .parse()
        .map_err(|e: tandem_core::UnknownMoleculeType| CcdError::InvalidEntry(e.to_string()))
}
