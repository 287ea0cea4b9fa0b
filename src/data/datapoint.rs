//! A single parsed data row
//!
//! One datapoint corresponds to one line of a molecular-property CSV file:
//! an optional compound name, a SMILES string, and the target fields. The
//! feature vector is either supplied by the caller (loaded from a features
//! file), produced by named generators, or absent.

use log::trace;

use crate::core::{DataConfig, DataError, DatasetType, Result, SparseTargetArray, Targets};
use crate::features::GeneratorRegistry;

/// One molecule with its identity, features, and targets
#[derive(Clone, Debug)]
pub struct MoleculeDatapoint {
    /// Compound name, present only when the source format includes it
    pub compound_name: Option<String>,
    /// SMILES string identifying the molecule
    pub smiles: String,
    /// Feature vector; externally supplied, generated, or absent
    pub features: Option<Vec<f64>>,
    /// Target values, dense or sparse per configuration
    pub targets: Targets,
    /// Number of target slots
    pub num_tasks: usize,
}

impl MoleculeDatapoint {
    /// Build a datapoint from pre-split row fields
    ///
    /// Field layout is `[compound_name,] smiles, target, target, ...` with
    /// the leading name consumed only when `config.use_compound_names` is
    /// set. Targets are parsed per the configured mode; empty target fields
    /// map to absent values.
    ///
    /// Fails when both `features` and a non-empty generator list are given,
    /// when a generator name is not registered, or when a non-empty target
    /// field does not parse as a number.
    pub fn from_fields(
        fields: &[String],
        config: &DataConfig,
        features: Option<Vec<f64>>,
        registry: &GeneratorRegistry,
    ) -> Result<Self> {
        let generator_names = config
            .features_generator
            .as_deref()
            .filter(|names| !names.is_empty());

        if features.is_some() && generator_names.is_some() {
            return Err(DataError::ConflictingFeatures);
        }

        let (compound_name, rest) = if config.use_compound_names {
            let name = fields.first().ok_or(DataError::MissingSmiles)?;
            (Some(name.clone()), &fields[1..])
        } else {
            (None, fields)
        };

        let smiles = rest.first().ok_or(DataError::MissingSmiles)?.clone();

        let features = match generator_names {
            Some(names) => Some(registry.generate_all(names, &smiles)?),
            None => features,
        };

        let (targets, num_tasks) = Self::resolve_targets(&smiles, rest, config, features.as_deref())?;

        trace!(
            "parsed datapoint smiles={smiles} tasks={num_tasks} features={}",
            features.as_ref().map_or(0, Vec::len)
        );

        Ok(Self {
            compound_name,
            smiles,
            features,
            targets,
            num_tasks,
        })
    }

    fn resolve_targets(
        smiles: &str,
        rest: &[String],
        config: &DataConfig,
        features: Option<&[f64]>,
    ) -> Result<(Targets, usize)> {
        if config.dataset_type == DatasetType::Unsupervised {
            // Pseudo-targets get assigned later via set_targets; never
            // sparse-wrapped.
            return Ok((Targets::Dense(vec![None]), 1));
        }

        let dense: Vec<Option<f64>> = if config.predict_features {
            let features = features.ok_or_else(|| {
                DataError::InvalidParameter(format!(
                    "predict_features requires a feature vector ({smiles} has none)"
                ))
            })?;
            features.iter().map(|&v| Some(v)).collect()
        } else {
            rest.iter()
                .skip(1)
                .enumerate()
                .map(|(column, field)| {
                    if field.is_empty() {
                        Ok(None)
                    } else {
                        field
                            .parse::<f64>()
                            .map(Some)
                            .map_err(|_| DataError::InvalidTarget {
                                column,
                                value: field.clone(),
                            })
                    }
                })
                .collect::<Result<_>>()?
        };

        let num_tasks = dense.len();
        let targets = if config.sparse {
            Targets::Sparse(SparseTargetArray::new(&dense))
        } else {
            Targets::Dense(dense)
        };

        Ok((targets, num_tasks))
    }

    /// Replace this datapoint's targets without validation
    ///
    /// Intended for pseudo-label assignment in unsupervised pretraining;
    /// keeping the new targets aligned with `num_tasks` is the caller's
    /// responsibility.
    pub fn set_targets(&mut self, targets: Targets) {
        self.targets = targets;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_standard_mode() {
        let line = fields(&["C1=CC=CC=C1", "1.5", "", "2.3"]);
        let point =
            MoleculeDatapoint::from_fields(&line, &DataConfig::default(), None, &GeneratorRegistry::new())
                .unwrap();

        assert_eq!(point.smiles, "C1=CC=CC=C1");
        assert_eq!(point.compound_name, None);
        assert_eq!(point.num_tasks, 3);
        assert_eq!(
            point.targets,
            Targets::Dense(vec![Some(1.5), None, Some(2.3)])
        );
        assert!(point.features.is_none());
    }

    #[test]
    fn test_compound_name_shifts_fields() {
        let line = fields(&["benzene", "C1=CC=CC=C1", "1.0"]);
        let config = DataConfig {
            use_compound_names: true,
            ..Default::default()
        };
        let point =
            MoleculeDatapoint::from_fields(&line, &config, None, &GeneratorRegistry::new()).unwrap();

        assert_eq!(point.compound_name.as_deref(), Some("benzene"));
        assert_eq!(point.smiles, "C1=CC=CC=C1");
        assert_eq!(point.targets, Targets::Dense(vec![Some(1.0)]));
    }

    #[test]
    fn test_unsupervised_ignores_target_fields() {
        let line = fields(&["CCO", "1.5", "2.5"]);
        let config = DataConfig {
            dataset_type: DatasetType::Unsupervised,
            ..Default::default()
        };
        let point =
            MoleculeDatapoint::from_fields(&line, &config, None, &GeneratorRegistry::new()).unwrap();

        assert_eq!(point.num_tasks, 1);
        assert_eq!(point.targets, Targets::Dense(vec![None]));
    }

    #[test]
    fn test_unsupervised_never_sparse() {
        let line = fields(&["CCO"]);
        let config = DataConfig {
            dataset_type: DatasetType::Unsupervised,
            sparse: true,
            ..Default::default()
        };
        let point =
            MoleculeDatapoint::from_fields(&line, &config, None, &GeneratorRegistry::new()).unwrap();

        assert!(matches!(point.targets, Targets::Dense(_)));
    }

    #[test]
    fn test_conflicting_features() {
        let line = fields(&["CCO", "1.0"]);
        let config = DataConfig {
            features_generator: Some(vec!["morgan".to_string()]),
            ..Default::default()
        };
        let err = MoleculeDatapoint::from_fields(
            &line,
            &config,
            Some(vec![1.0, 2.0]),
            &GeneratorRegistry::new(),
        )
        .unwrap_err();

        assert!(matches!(err, DataError::ConflictingFeatures));
    }

    #[test]
    fn test_empty_generator_list_is_not_a_conflict() {
        let line = fields(&["CCO", "1.0"]);
        let config = DataConfig {
            features_generator: Some(vec![]),
            ..Default::default()
        };
        let point = MoleculeDatapoint::from_fields(
            &line,
            &config,
            Some(vec![1.0, 2.0]),
            &GeneratorRegistry::new(),
        )
        .unwrap();

        assert_eq!(point.features, Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_generated_features_concatenate_in_order() {
        let mut registry = GeneratorRegistry::new();
        registry.register("first", |_: &str| vec![1.0, 2.0]);
        registry.register("second", |_: &str| vec![3.0]);

        let line = fields(&["CCO", "0.5"]);
        let config = DataConfig {
            features_generator: Some(vec!["first".to_string(), "second".to_string()]),
            ..Default::default()
        };
        let point = MoleculeDatapoint::from_fields(&line, &config, None, &registry).unwrap();

        assert_eq!(point.features, Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(point.targets, Targets::Dense(vec![Some(0.5)]));
    }

    #[test]
    fn test_unknown_generator_fails() {
        let line = fields(&["CCO", "0.5"]);
        let config = DataConfig {
            features_generator: Some(vec!["nope".to_string()]),
            ..Default::default()
        };
        let err = MoleculeDatapoint::from_fields(&line, &config, None, &GeneratorRegistry::new())
            .unwrap_err();

        assert!(matches!(err, DataError::UnknownGenerator(name) if name == "nope"));
    }

    #[test]
    fn test_predict_features_copies_features_into_targets() {
        let line = fields(&["CCO", "9.9"]);
        let config = DataConfig {
            predict_features: true,
            ..Default::default()
        };
        let point = MoleculeDatapoint::from_fields(
            &line,
            &config,
            Some(vec![0.25, 0.75]),
            &GeneratorRegistry::new(),
        )
        .unwrap();

        assert_eq!(point.num_tasks, 2);
        assert_eq!(
            point.targets,
            Targets::Dense(vec![Some(0.25), Some(0.75)])
        );
    }

    #[test]
    fn test_predict_features_without_features_fails() {
        let line = fields(&["CCO", "9.9"]);
        let config = DataConfig {
            predict_features: true,
            ..Default::default()
        };
        let err = MoleculeDatapoint::from_fields(&line, &config, None, &GeneratorRegistry::new())
            .unwrap_err();

        assert!(matches!(err, DataError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_target_field() {
        let line = fields(&["CCO", "1.5", "abc"]);
        let err = MoleculeDatapoint::from_fields(
            &line,
            &DataConfig::default(),
            None,
            &GeneratorRegistry::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DataError::InvalidTarget { column: 1, ref value } if value == "abc"
        ));
    }

    #[test]
    fn test_sparse_targets() {
        let line = fields(&["CCO", "1.5", "", "2.3"]);
        let config = DataConfig {
            sparse: true,
            ..Default::default()
        };
        let point =
            MoleculeDatapoint::from_fields(&line, &config, None, &GeneratorRegistry::new()).unwrap();

        assert_eq!(point.num_tasks, 3);
        match &point.targets {
            Targets::Sparse(sparse) => {
                assert_eq!(sparse.len(), 3);
                assert_eq!(sparse.num_present(), 2);
                assert_eq!(sparse.get(0).unwrap(), Some(1.5));
                assert_eq!(sparse.get(1).unwrap(), None);
            }
            Targets::Dense(_) => panic!("expected sparse targets"),
        }
    }

    #[test]
    fn test_empty_row_fails() {
        let err = MoleculeDatapoint::from_fields(
            &[],
            &DataConfig::default(),
            None,
            &GeneratorRegistry::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::MissingSmiles));
    }

    #[test]
    fn test_set_targets_replaces_unconditionally() {
        let line = fields(&["CCO", "1.0"]);
        let mut point = MoleculeDatapoint::from_fields(
            &line,
            &DataConfig::default(),
            None,
            &GeneratorRegistry::new(),
        )
        .unwrap();

        point.set_targets(Targets::Dense(vec![Some(7.0), Some(8.0)]));
        assert_eq!(point.targets, Targets::Dense(vec![Some(7.0), Some(8.0)]));
        // num_tasks deliberately untouched; alignment is the caller's job
        assert_eq!(point.num_tasks, 1);
    }
}
