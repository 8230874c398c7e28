// ⚠️ Error Types - Library error taxonomy
//
// No-match and malformed years are NOT errors (see filter.rs / year.rs).
// Everything here comes from loading catalogs, config, or exporting.

use std::path::PathBuf;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read or write a file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON catalog file could not be parsed
    #[error("failed to parse catalog {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// CSV export failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration could not be loaded
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration loaded but holds unusable values
    #[error("invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// A catalog failed validation with critical issues
    #[error("catalog '{catalog}' is invalid: {message}")]
    InvalidCatalog { catalog: String, message: String },

    /// A string did not name any known enum variant (category, era, tier...)
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl From<figment::Error> for CatalogError {
    fn from(err: figment::Error) -> Self {
        CatalogError::ConfigLoad(Box::new(err))
    }
}

impl CatalogError {
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        CatalogError::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
