//! Feature generator registry and caching
//!
//! Generators (fingerprints, 2D descriptors) are external collaborators
//! registered by name. The dataset layer looks them up, applies them in the
//! order requested, and concatenates their outputs. Generated vectors can
//! be memoized per SMILES with an LRU cache since generation is
//! deterministic and typically the most expensive step of loading.

use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::core::{DataError, FeatureGenerator, Result};

/// Conventional name for the binary Morgan fingerprint generator
pub const MORGAN: &str = "morgan";
/// Conventional name for the count-based Morgan fingerprint generator
pub const MORGAN_COUNT: &str = "morgan_count";
/// Conventional name for the 2D descriptor vector generator
pub const RDKIT_2D: &str = "rdkit_2d";

/// Name-keyed collection of feature generators
///
/// The registry is open: any name can be bound to any generator. The
/// constants above are the conventional names used by molecular-property
/// pipelines; nothing in the registry treats them specially.
#[derive(Default, Clone)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Arc<dyn FeatureGenerator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a generator to a name, replacing any previous binding
    pub fn register<G>(&mut self, name: &str, generator: G)
    where
        G: FeatureGenerator + 'static,
    {
        self.generators.insert(name.to_string(), Arc::new(generator));
    }

    /// Bind an already shared generator to a name
    pub fn register_shared(&mut self, name: &str, generator: Arc<dyn FeatureGenerator>) {
        self.generators.insert(name.to_string(), generator);
    }

    /// Whether a generator is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered generator names, sorted for stable output
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generators.keys().cloned().collect();
        names.sort();
        names
    }

    /// Run a single named generator on one molecule
    pub fn generate(&self, name: &str, smiles: &str) -> Result<Vec<f64>> {
        let generator = self
            .generators
            .get(name)
            .ok_or_else(|| DataError::UnknownGenerator(name.to_string()))?;
        Ok(generator.generate(smiles))
    }

    /// Run the named generators in order and concatenate their outputs
    ///
    /// Fails before generating anything if any name is unknown, so a typo
    /// surfaces on the first row rather than producing a partial vector.
    pub fn generate_all(&self, names: &[String], smiles: &str) -> Result<Vec<f64>> {
        for name in names {
            if !self.contains(name) {
                return Err(DataError::UnknownGenerator(name.clone()));
            }
        }

        let mut features = Vec::new();
        for name in names {
            features.extend(self.generate(name, smiles)?);
        }
        Ok(features)
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// LRU-memoizing wrapper around a feature generator
///
/// Keyed by SMILES. The cache sits behind a `Mutex` so a wrapped generator
/// stays `Send + Sync` like any other; contention is not a concern since
/// loading is single-threaded.
pub struct CachedGenerator {
    inner: Arc<dyn FeatureGenerator>,
    cache: Mutex<LruCache<String, Vec<f64>>>,
}

impl CachedGenerator {
    /// Wrap a generator with a cache of `capacity` molecules
    pub fn new<G>(generator: G, capacity: usize) -> Self
    where
        G: FeatureGenerator + 'static,
    {
        Self::from_shared(Arc::new(generator), capacity)
    }

    /// Wrap an already shared generator
    pub fn from_shared(generator: Arc<dyn FeatureGenerator>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: generator,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached molecules
    pub fn cached_len(&self) -> usize {
        match self.cache.lock() {
            Ok(cache) => cache.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl FeatureGenerator for CachedGenerator {
    fn generate(&self, smiles: &str) -> Vec<f64> {
        // A poisoned lock only means a previous panic mid-insert; the map
        // itself is still usable.
        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(features) = cache.get(smiles) {
            return features.clone();
        }

        let features = self.inner.generate(smiles);
        cache.put(smiles.to_string(), features.clone());
        features
    }
}
