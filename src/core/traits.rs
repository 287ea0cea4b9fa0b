//! Core traits for dataset handling

/// Collaborator that maps a SMILES string to a fixed-shape feature vector
///
/// Implementations (fingerprints, 2D descriptor extraction) live outside
/// this crate; the dataset layer only orchestrates selection, ordering, and
/// concatenation of their outputs. Generators must be deterministic for a
/// given SMILES and are expected to produce the same output length for
/// every molecule.
pub trait FeatureGenerator: Send + Sync {
    /// Compute the feature vector for one molecule
    fn generate(&self, smiles: &str) -> Vec<f64>;
}

/// Any `Fn(&str) -> Vec<f64>` closure works as a generator
impl<F> FeatureGenerator for F
where
    F: Fn(&str) -> Vec<f64> + Send + Sync,
{
    fn generate(&self, smiles: &str) -> Vec<f64> {
        self(smiles)
    }
}
