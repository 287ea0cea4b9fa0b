//! Error types for dataset handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Cannot provide both precomputed features and a features generator")]
    ConflictingFeatures,

    #[error("Features generator \"{0}\" is not registered")]
    UnknownGenerator(String),

    #[error("Invalid target value at column {column}: {value:?}")]
    InvalidTarget { column: usize, value: String },

    #[error("Row has no SMILES field")]
    MissingSmiles,

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Persistence error: {0}")]
    PersistenceError(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
