//! Chemical component dictionary (CCD): the residue and molecule vocabulary
//! each entity type is validated against.

pub mod component;
pub mod db;
pub mod dictionary;
pub mod seed_data;

pub use component::Component;
pub use dictionary::{default_vocabulary_name, Ccd, CcdDocument, Vocabulary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CcdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid dictionary entry: {0}")]
    InvalidEntry(String),
}
