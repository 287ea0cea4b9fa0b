//! High-level API for loading molecular datasets
//!
//! This module provides a builder-style interface over the configuration
//! and loading plumbing for common cases.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use moldata::api::DatasetLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = DatasetLoader::new()
//!     .with_compound_names(true)
//!     .with_sparse_targets(true)
//!     .load_from_file("train.csv")?;
//!
//! println!("{} molecules, {} tasks", dataset.len(), dataset.num_tasks()?);
//! # Ok(())
//! # }
//! ```

use std::io::BufRead;
use std::path::Path;

use crate::core::{DataConfig, DatasetType, Result};
use crate::data::{CsvSource, MoleculeDataset};
use crate::features::GeneratorRegistry;

/// Builder for configuring and loading a [`MoleculeDataset`] from CSV
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    config: DataConfig,
    registry: GeneratorRegistry,
}

impl DatasetLoader {
    /// Create a loader with default configuration and no generators
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether each row starts with a compound name
    pub fn with_compound_names(mut self, use_compound_names: bool) -> Self {
        self.config.use_compound_names = use_compound_names;
        self
    }

    /// Wrap targets in a sparse representation
    pub fn with_sparse_targets(mut self, sparse: bool) -> Self {
        self.config.sparse = sparse;
        self
    }

    /// Set the dataset kind
    pub fn with_dataset_type(mut self, dataset_type: DatasetType) -> Self {
        self.config.dataset_type = dataset_type;
        self
    }

    /// Use the feature vector as the prediction targets
    pub fn with_predict_features(mut self, predict_features: bool) -> Self {
        self.config.predict_features = predict_features;
        self
    }

    /// Generate features with the named generators, in order
    pub fn with_generators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.features_generator = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Supply the registry the generator names resolve against
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The parsing configuration this loader will use
    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Load from a CSV file
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<MoleculeDataset> {
        CsvSource::new(self.config.clone()).from_file(path, &self.registry)
    }

    /// Load from any buffered reader of CSV rows
    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<MoleculeDataset> {
        CsvSource::new(self.config.clone()).from_reader(reader, &self.registry)
    }
}
