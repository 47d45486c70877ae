use thiserror::Error;

/// Failures surfaced by the color core.
///
/// `StorageDecode` never reaches callers of [`crate::collection::PersistentCollection::load`];
/// it exists so the recovery branch is explicit and testable.
#[derive(Error, Debug)]
pub enum ColorError {
    #[error("invalid hex color '{0}': expected 6 hex digits with optional leading '#'")]
    InvalidColorFormat(String),

    #[error("color not found: {0}")]
    ColorNotFound(String),

    #[error("stored value under '{key}' could not be decoded: {source}")]
    StorageDecode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;
