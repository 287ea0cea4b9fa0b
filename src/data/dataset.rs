//! Ordered, owning collection of molecule datapoints
//!
//! The dataset is what a training loop consumes: bulk accessors over the
//! records, in-place shuffling, partitioning into chunks, feature
//! normalization, and bulk pseudo-label assignment. Access is
//! single-threaded; callers sharing a dataset across threads must
//! serialize externally.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::core::{DataError, Result, Targets};
use crate::data::MoleculeDatapoint;
use crate::utils::scaling::StandardScaler;

/// Ordered collection of datapoints with a cached normalization scaler
///
/// Bulk accessors assume every record shares the first record's presence
/// pattern for compound names and features; the original pipelines only
/// ever build homogeneous collections and this type preserves that
/// contract rather than validating it per call.
#[derive(Clone, Debug, Default)]
pub struct MoleculeDataset {
    data: Vec<MoleculeDatapoint>,
    scaler: Option<StandardScaler>,
}

impl MoleculeDataset {
    /// Take ownership of a list of datapoints; no scaler is fitted yet
    pub fn new(data: Vec<MoleculeDatapoint>) -> Self {
        Self { data, scaler: None }
    }

    /// Number of datapoints
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the dataset holds no datapoints
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the datapoint at position `i`
    pub fn get(&self, i: usize) -> Result<&MoleculeDatapoint> {
        self.data.get(i).ok_or(DataError::IndexOutOfRange {
            index: i,
            len: self.data.len(),
        })
    }

    /// Iterate over the datapoints in order
    pub fn iter(&self) -> std::slice::Iter<'_, MoleculeDatapoint> {
        self.data.iter()
    }

    /// Compound names in positional order, or `None` when the collection
    /// carries no names (decided by the first record)
    pub fn compound_names(&self) -> Option<Vec<String>> {
        self.data.first()?.compound_name.as_ref()?;
        Some(
            self.data
                .iter()
                .map(|d| d.compound_name.clone().unwrap_or_default())
                .collect(),
        )
    }

    /// SMILES strings in positional order
    pub fn smiles(&self) -> Vec<String> {
        self.data.iter().map(|d| d.smiles.clone()).collect()
    }

    /// Feature vectors in positional order, or `None` when the collection
    /// carries no features (decided by the first record)
    pub fn features(&self) -> Option<Vec<Vec<f64>>> {
        self.data.first()?.features.as_ref()?;
        Some(
            self.data
                .iter()
                .map(|d| d.features.clone().unwrap_or_default())
                .collect(),
        )
    }

    /// Target vectors in positional order
    pub fn targets(&self) -> Vec<Targets> {
        self.data.iter().map(|d| d.targets.clone()).collect()
    }

    /// Number of prediction tasks, taken from the first record
    ///
    /// Fails on an empty dataset so a misconfigured pipeline surfaces here
    /// rather than training a zero-task model.
    pub fn num_tasks(&self) -> Result<usize> {
        self.data
            .first()
            .map(|d| d.num_tasks)
            .ok_or(DataError::EmptyDataset)
    }

    /// Permute the record order in place
    ///
    /// With a seed the permutation is deterministic: the same seed over the
    /// same records always produces the same order.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.data.shuffle(&mut rng);
            }
            None => {
                let mut rng = thread_rng();
                self.data.shuffle(&mut rng);
            }
        }
    }

    /// Shuffle, then split into `num_chunks` contiguous near-equal slices
    ///
    /// Each chunk holds `ceil(len / num_chunks)` records except possibly
    /// the last ones, which may be shorter or empty when the length does
    /// not divide evenly. Chunks are disjoint and together cover every
    /// record exactly once. Consumes the dataset so each chunk owns its
    /// slice outright.
    pub fn chunk(mut self, num_chunks: usize, seed: Option<u64>) -> Result<Vec<MoleculeDataset>> {
        if num_chunks == 0 {
            return Err(DataError::InvalidParameter(
                "num_chunks must be at least 1".to_string(),
            ));
        }

        self.shuffle(seed);

        let chunk_len = self.data.len().div_ceil(num_chunks);
        debug!(
            "chunking {} records into {num_chunks} chunks of up to {chunk_len}",
            self.data.len()
        );

        let mut chunks = Vec::with_capacity(num_chunks);
        let mut remaining = self.data;
        for _ in 0..num_chunks {
            let take = chunk_len.min(remaining.len());
            let rest = remaining.split_off(take);
            chunks.push(MoleculeDataset::new(remaining));
            remaining = rest;
        }
        Ok(chunks)
    }

    /// Normalize every record's features in place with a standard scaler
    ///
    /// Returns `None` when the collection carries no features. Otherwise
    /// the scaler is resolved in order of preference: the one passed in
    /// (adopted and cached), the previously cached one, or a fresh scaler
    /// fitted on the stacked feature matrix (NaN replacement token 0).
    /// The resolved scaler is applied row-wise to each record and
    /// returned.
    pub fn normalize_features(
        &mut self,
        scaler: Option<StandardScaler>,
    ) -> Result<Option<StandardScaler>> {
        if self.data.first().and_then(|d| d.features.as_ref()).is_none() {
            return Ok(None);
        }

        let scaler = if let Some(scaler) = scaler {
            self.scaler = Some(scaler.clone());
            scaler
        } else if let Some(cached) = &self.scaler {
            cached.clone()
        } else {
            let rows: Vec<Vec<f64>> = self
                .data
                .iter()
                .map(|d| d.features.clone().unwrap_or_default())
                .collect();

            let mut fitted = StandardScaler::new(0.0);
            fitted.fit(&rows)?;
            debug!("fitted feature scaler over {} columns", fitted.num_features());
            self.scaler = Some(fitted.clone());
            fitted
        };

        for datapoint in &mut self.data {
            if let Some(features) = datapoint.features.as_ref() {
                datapoint.features = Some(scaler.transform_row(features)?);
            }
        }

        Ok(Some(scaler))
    }

    /// Replace every record's targets positionally
    ///
    /// Fails without mutating anything when the replacement list's length
    /// differs from the dataset's. Intended for pseudo-label assignment in
    /// unsupervised pretraining.
    pub fn set_targets(&mut self, targets: Vec<Targets>) -> Result<()> {
        if targets.len() != self.data.len() {
            return Err(DataError::LengthMismatch {
                expected: self.data.len(),
                actual: targets.len(),
            });
        }

        for (datapoint, targets) in self.data.iter_mut().zip(targets) {
            datapoint.set_targets(targets);
        }
        Ok(())
    }
}

impl IntoIterator for MoleculeDataset {
    type Item = MoleculeDatapoint;
    type IntoIter = std::vec::IntoIter<MoleculeDatapoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
