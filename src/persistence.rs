//! Scaler serialization and persistence
//!
//! A fitted feature scaler belongs with the model checkpoint: predictions
//! on new molecules must use the training-set statistics, not statistics
//! refitted on the prediction set. This module saves and restores a fitted
//! [`StandardScaler`] as JSON with enough metadata to sanity-check the
//! file later.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::core::{DataError, Result};
use crate::utils::scaling::StandardScaler;

/// Serializable representation of a fitted scaler
#[derive(Serialize, Deserialize)]
pub struct SerializableScaler {
    /// Per-column means
    pub means: Vec<f64>,
    /// Per-column standard deviations
    pub stds: Vec<f64>,
    /// Replacement token for NaN outputs
    pub replace_nan_token: f64,
    /// Metadata for tracking and validation
    pub metadata: ScalerMetadata,
}

/// Scaler metadata for tracking and validation
#[derive(Serialize, Deserialize)]
pub struct ScalerMetadata {
    /// Library version used to create the file
    pub library_version: String,
    /// Number of feature columns
    pub num_features: usize,
    /// Creation timestamp
    pub created_at: String,
}

impl SerializableScaler {
    /// Capture a fitted scaler for saving
    ///
    /// Fails when the scaler has not been fitted; persisting empty
    /// statistics would silently break later transforms.
    pub fn from_scaler(scaler: &StandardScaler) -> Result<Self> {
        if !scaler.is_fitted() {
            return Err(DataError::PersistenceError(
                "cannot save an unfitted scaler".to_string(),
            ));
        }

        Ok(Self {
            means: scaler.means().to_vec(),
            stds: scaler.stds().to_vec(),
            replace_nan_token: scaler.replace_nan_token(),
            metadata: ScalerMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                num_features: scaler.num_features(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        })
    }

    /// Rebuild the scaler from the saved statistics
    pub fn into_scaler(self) -> StandardScaler {
        StandardScaler::from_stats(self.means, self.stds, self.replace_nan_token)
    }

    /// Save to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(DataError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DataError::PersistenceError(format!("failed to serialize scaler: {e}")))
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(DataError::IoError)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| DataError::PersistenceError(format!("failed to deserialize scaler: {e}")))
    }
}

/// Save a fitted scaler to a JSON file
pub fn save_scaler<P: AsRef<Path>>(scaler: &StandardScaler, path: P) -> Result<()> {
    SerializableScaler::from_scaler(scaler)?.save_to_file(path)
}

/// Load a scaler previously saved with [`save_scaler`]
pub fn load_scaler<P: AsRef<Path>>(path: P) -> Result<StandardScaler> {
    Ok(SerializableScaler::load_from_file(path)?.into_scaler())
}
