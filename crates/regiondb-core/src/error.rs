// crates/regiondb-core/src/error.rs
use thiserror::Error;

/// Every failure the region index can surface.
///
/// Persistence errors are fatal and never retried: a corrupted index does not
/// heal itself. Search strategies that find nothing are not errors; an
/// unmatched query simply yields an empty result list.
#[derive(Debug, Error)]
pub enum RegionDbError {
    /// The file is not a region index (bad magic, truncated header or
    /// payload, unsupported version).
    #[error("Invalid index format: {0}")]
    Format(String),

    /// The stored SHA-256 digest does not match the payload.
    #[error("Index integrity check failed: {0}")]
    Integrity(String),

    /// The index or dataset file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation needs a loaded index but none is bound.
    #[error("Invalid engine state: {0}")]
    State(String),

    /// A caller-supplied value could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The payload is compressed but this build has no decompressor.
    #[error("Compressed payload requires the 'compact' feature")]
    Decompress,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegionDbError>;
