//! Datapoints, datasets, and row sources
//!
//! This module holds the record and collection types a training loop
//! consumes, plus the CSV row source that produces them.

pub mod csv;
pub mod datapoint;
pub mod dataset;

pub use self::csv::*;
pub use self::datapoint::*;
pub use self::dataset::*;
