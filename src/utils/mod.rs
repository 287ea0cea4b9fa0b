//! Utility functions for dataset operations

/// Feature scaling utilities
pub mod scaling {
    use serde::{Deserialize, Serialize};

    use crate::core::{DataError, Result};

    /// Per-column mean/std normalizer with NaN-token replacement
    ///
    /// Fit on a stacked feature matrix, applied row-wise afterwards.
    /// Missing entries (NaN) are ignored when computing statistics; columns
    /// whose statistics are degenerate fall back to mean 0 and std 1, and
    /// any NaN remaining after the transform is replaced by the configured
    /// token so downstream tensors stay finite.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct StandardScaler {
        means: Vec<f64>,
        stds: Vec<f64>,
        replace_nan_token: f64,
    }

    impl StandardScaler {
        /// Create an unfitted scaler with the given replacement token
        pub fn new(replace_nan_token: f64) -> Self {
            Self {
                means: Vec::new(),
                stds: Vec::new(),
                replace_nan_token,
            }
        }

        /// Rebuild a scaler from previously fitted statistics
        pub fn from_stats(means: Vec<f64>, stds: Vec<f64>, replace_nan_token: f64) -> Self {
            Self {
                means,
                stds,
                replace_nan_token,
            }
        }

        /// Number of feature columns this scaler was fitted on
        pub fn num_features(&self) -> usize {
            self.means.len()
        }

        /// Whether `fit` has been called
        pub fn is_fitted(&self) -> bool {
            !self.means.is_empty()
        }

        /// Fitted per-column means
        pub fn means(&self) -> &[f64] {
            &self.means
        }

        /// Fitted per-column standard deviations
        pub fn stds(&self) -> &[f64] {
            &self.stds
        }

        /// Replacement token for NaN outputs
        pub fn replace_nan_token(&self) -> f64 {
            self.replace_nan_token
        }

        /// Compute per-column statistics from a stacked feature matrix
        ///
        /// NaN entries are excluded from each column's statistics. Columns
        /// with no finite entries get mean 0; columns with zero or
        /// undefined spread get std 1, so the transform is the identity
        /// shift there instead of a division by zero.
        pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
            let first = rows.first().ok_or(DataError::EmptyDataset)?;
            let num_features = first.len();

            for row in rows {
                if row.len() != num_features {
                    return Err(DataError::LengthMismatch {
                        expected: num_features,
                        actual: row.len(),
                    });
                }
            }

            let mut means = vec![0.0; num_features];
            let mut stds = vec![1.0; num_features];

            for col in 0..num_features {
                let values: Vec<f64> = rows
                    .iter()
                    .map(|row| row[col])
                    .filter(|v| !v.is_nan())
                    .collect();

                if values.is_empty() {
                    continue;
                }

                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let variance =
                    values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
                let std = variance.sqrt();

                means[col] = if mean.is_nan() { 0.0 } else { mean };
                stds[col] = if std.is_nan() || std == 0.0 { 1.0 } else { std };
            }

            self.means = means;
            self.stds = stds;
            Ok(())
        }

        /// Normalize a single row using the fitted statistics
        ///
        /// NaN entries (and any NaN produced by the transform) become the
        /// replacement token. Fails when the row width does not match the
        /// fitted column count.
        pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
            if row.len() != self.means.len() {
                return Err(DataError::LengthMismatch {
                    expected: self.means.len(),
                    actual: row.len(),
                });
            }

            Ok(row
                .iter()
                .zip(self.means.iter().zip(self.stds.iter()))
                .map(|(&v, (&mean, &std))| {
                    let scaled = (v - mean) / std;
                    if scaled.is_nan() {
                        self.replace_nan_token
                    } else {
                        scaled
                    }
                })
                .collect())
        }

        /// Normalize a batch of rows
        pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
            rows.iter().map(|row| self.transform_row(row)).collect()
        }
    }

    /// Convenience function: fit on a matrix and transform it in one step
    pub fn fit_transform(
        rows: &[Vec<f64>],
        replace_nan_token: f64,
    ) -> Result<(Vec<Vec<f64>>, StandardScaler)> {
        let mut scaler = StandardScaler::new(replace_nan_token);
        scaler.fit(rows)?;
        let transformed = scaler.transform(rows)?;
        Ok((transformed, scaler))
    }
}
