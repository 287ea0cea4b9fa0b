//! CSV row source for molecular datasets
//!
//! Reads comma-separated files of the form:
//! - a header line (always present, always skipped)
//! - one molecule per line: `[compound_name,] smiles, target, target, ...`
//!
//! Empty target fields mean the value is unmeasured. Blank lines and
//! `#`-prefixed comment lines are skipped. Quoting and alternate
//! delimiters are deliberately unsupported; molecular-property CSVs in the
//! wild are plain comma-split.

use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::{DataConfig, DataError, Result};
use crate::data::{MoleculeDataset, MoleculeDatapoint};
use crate::features::GeneratorRegistry;

/// Loader turning CSV rows into a [`MoleculeDataset`]
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    config: DataConfig,
}

impl CsvSource {
    /// Create a loader with the given parsing configuration
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Load a dataset from a CSV file
    pub fn from_file<P: AsRef<Path>>(
        &self,
        path: P,
        registry: &GeneratorRegistry,
    ) -> Result<MoleculeDataset> {
        let file = File::open(&path).map_err(DataError::IoError)?;
        let reader = BufReader::new(file);
        let dataset = self.from_reader(reader, registry)?;
        info!(
            "loaded {} molecules from {}",
            dataset.len(),
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// Load a dataset from any buffered reader
    ///
    /// The first non-blank, non-comment line is treated as the header and
    /// skipped. Fails with `EmptyDataset` when no data rows remain.
    pub fn from_reader<R: BufRead>(
        &self,
        reader: R,
        registry: &GeneratorRegistry,
    ) -> Result<MoleculeDataset> {
        let mut data = Vec::new();
        let mut header_seen = false;

        for line in reader.lines() {
            let line = line.map_err(DataError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !header_seen {
                header_seen = true;
                continue;
            }

            let fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
            data.push(MoleculeDatapoint::from_fields(
                &fields,
                &self.config,
                None,
                registry,
            )?);
        }

        if data.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        Ok(MoleculeDataset::new(data))
    }
}

/// Write a dataset back out as CSV, one molecule per line
///
/// Emits a minimal header (`smiles,target_0,...` with a leading `compound_name`
/// column when names are present) and blank fields for absent targets.
/// Features are not written; they are reproducible from the source.
pub fn write_csv<W: std::io::Write>(dataset: &MoleculeDataset, writer: &mut W) -> Result<()> {
    let num_tasks = dataset.num_tasks()?;
    let with_names = dataset.compound_names().is_some();

    let mut header = Vec::new();
    if with_names {
        header.push("compound_name".to_string());
    }
    header.push("smiles".to_string());
    for i in 0..num_tasks {
        header.push(format!("target_{i}"));
    }
    writeln!(writer, "{}", header.join(",")).map_err(DataError::IoError)?;

    for datapoint in dataset.iter() {
        let mut fields = Vec::new();
        if with_names {
            fields.push(datapoint.compound_name.clone().unwrap_or_default());
        }
        fields.push(datapoint.smiles.clone());
        for value in datapoint.targets.to_vec() {
            fields.push(value.map(|v| v.to_string()).unwrap_or_default());
        }
        writeln!(writer, "{}", fields.join(",")).map_err(DataError::IoError)?;
    }

    Ok(())
}
