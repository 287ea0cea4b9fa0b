//! Core type definitions for molecular datasets

use std::collections::HashMap;

use crate::core::{DataError, Result};

/// Fixed-length target vector that only stores present values
///
/// A record's target vector may have missing entries (unmeasured assays).
/// This representation keeps the logical length while physically storing
/// only the present values, keyed by position. Indices are `usize`, so
/// negative indices are unrepresentable and therefore rejected by
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseTargetArray {
    length: usize,
    present: HashMap<usize, f64>,
}

impl SparseTargetArray {
    /// Create from a dense sequence of optional targets, keeping only the
    /// present entries
    pub fn new(targets: &[Option<f64>]) -> Self {
        let present = targets
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|v| (i, v)))
            .collect();

        Self {
            length: targets.len(),
            present,
        }
    }

    /// Logical length, including absent positions
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the logical length is zero
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of present (stored) values
    pub fn num_present(&self) -> usize {
        self.present.len()
    }

    /// Get the value at position `i`
    ///
    /// Returns `Ok(Some(v))` for a present value, `Ok(None)` for an absent
    /// position within bounds, and an error when `i >= len()`.
    pub fn get(&self, i: usize) -> Result<Option<f64>> {
        if i >= self.length {
            return Err(DataError::IndexOutOfRange {
                index: i,
                len: self.length,
            });
        }
        Ok(self.present.get(&i).copied())
    }

    /// Expand back to a dense sequence of optional values
    pub fn to_vec(&self) -> Vec<Option<f64>> {
        (0..self.length).map(|i| self.present.get(&i).copied()).collect()
    }
}

/// Target vector representation, chosen at datapoint construction
///
/// Dense keeps one slot per task; Sparse stores only present values. The
/// two are kept as explicit variants so callers pattern-match rather than
/// rely on a shared indexing interface.
#[derive(Clone, Debug, PartialEq)]
pub enum Targets {
    Dense(Vec<Option<f64>>),
    Sparse(SparseTargetArray),
}

impl Targets {
    /// Number of target slots (present or absent)
    pub fn len(&self) -> usize {
        match self {
            Targets::Dense(v) => v.len(),
            Targets::Sparse(s) => s.len(),
        }
    }

    /// Check if there are no target slots
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the value at position `i`, with the same bounds contract for
    /// both representations
    pub fn get(&self, i: usize) -> Result<Option<f64>> {
        match self {
            Targets::Dense(v) => v.get(i).copied().ok_or(DataError::IndexOutOfRange {
                index: i,
                len: v.len(),
            }),
            Targets::Sparse(s) => s.get(i),
        }
    }

    /// Uniform dense readout regardless of representation
    pub fn to_vec(&self) -> Vec<Option<f64>> {
        match self {
            Targets::Dense(v) => v.clone(),
            Targets::Sparse(s) => s.to_vec(),
        }
    }
}

/// Kind of dataset being loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetType {
    /// Continuous targets
    Regression,
    /// Binary or categorical targets
    Classification,
    /// No supervised labels; targets start absent and are assigned later
    Unsupervised,
}

/// Configuration consumed when parsing rows into datapoints
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Ordered list of feature generator names, applied in order and
    /// concatenated. Mutually exclusive with precomputed features.
    pub features_generator: Option<Vec<String>>,
    /// Use the resolved feature vector as the targets instead of the row's
    /// target fields
    pub predict_features: bool,
    /// Wrap targets in a `SparseTargetArray`
    pub sparse: bool,
    /// Dataset kind; `Unsupervised` short-circuits target parsing
    pub dataset_type: DatasetType,
    /// Whether each row starts with a compound name before the SMILES
    pub use_compound_names: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            features_generator: None,
            predict_features: false,
            sparse: false,
            dataset_type: DatasetType::Regression,
            use_compound_names: false,
        }
    }
}
