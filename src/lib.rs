//! In-memory dataset handling for molecular-property machine learning
//!
//! Parses tabular records (SMILES, optional compound name, numeric
//! targets), optionally augments them with generated or precomputed
//! feature vectors, and exposes the collection operations a training loop
//! needs: indexing, shuffling, chunking, feature normalization, and
//! pseudo-label assignment.

pub mod api;
pub mod core;
pub mod data;
pub mod features;
pub mod persistence;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::DatasetLoader;
pub use crate::core::error::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{CsvSource, MoleculeDatapoint, MoleculeDataset};
pub use crate::features::{CachedGenerator, GeneratorRegistry};
pub use crate::utils::scaling::StandardScaler;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
