use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid year range {start}..={end}")]
    InvalidYearRange { start: i32, end: i32 },
    #[error("unknown color '{0}' (use a CSS color name or #rrggbb)")]
    UnknownColor(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
