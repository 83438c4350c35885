#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Immutable in-memory population dataset.
//!
//! The dataset is loaded once at startup from the statistical office CSV
//! export, sorted by date, and then shared read-only (typically behind an
//! `Arc`) by every request. Nothing in this crate mutates a [`Dataset`]
//! after construction.

pub mod loader;

use std::collections::HashSet;
use std::path::Path;

use chrono::{Datelike as _, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use zurich_pop_population_models::{Origin, PopulationRecord, Sex};

/// Errors that can occur while loading the dataset.
///
/// All of them are fatal: the dashboard cannot start without its data.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The input file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not well-formed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A date cell could not be parsed.
    #[error("Invalid date '{value}' on line {line}: expected YYYY-MM-DD")]
    InvalidDate {
        /// 1-based line number in the input.
        line: u64,
        /// The offending cell content.
        value: String,
    },

    /// A code or count cell could not be parsed.
    #[error("Invalid value '{value}' in column {column} on line {line}")]
    InvalidField {
        /// 1-based line number in the input.
        line: u64,
        /// Column name.
        column: &'static str,
        /// The offending cell content.
        value: String,
    },

    /// A (date, district, origin, sex, age band) combination appears more
    /// than once.
    #[error(
        "Duplicate record on line {line}: {date} {district} {origin} {sex} {age_band} already seen on line {first_line}"
    )]
    DuplicateRecord {
        /// 1-based line number of the repeated row.
        line: u64,
        /// 1-based line number where the combination first appeared.
        first_line: u64,
        /// Reference date.
        date: NaiveDate,
        /// District label.
        district: String,
        /// Origin classification.
        origin: Origin,
        /// Sex classification.
        sex: Sex,
        /// Age band label.
        age_band: String,
    },

    /// The counts of all rows together exceed `u64::MAX`.
    #[error("Total resident count overflows on line {line}")]
    CountOverflow {
        /// 1-based line number of the row that overflowed the total.
        line: u64,
    },
}

/// The full population table, ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<PopulationRecord>,
}

impl Dataset {
    /// Loads the dataset from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be opened or parsed.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        log::info!("Loading population data from {}", path.display());

        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let dataset = Self::from_reader(std::io::BufReader::new(file))?;

        match dataset.date_range() {
            Some((min, max)) => log::info!(
                "Loaded {} records covering {min} to {max}",
                dataset.len()
            ),
            None => log::warn!("Population file {} contains no records", path.display()),
        }

        Ok(dataset)
    }

    /// Parses the dataset from any CSV source.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the CSV is malformed or a required column
    /// is missing.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, DatasetError> {
        Ok(Self::from_records(loader::read_records(reader)?))
    }

    /// Builds a dataset from already-parsed records.
    ///
    /// Records are stably sorted by date, so rows sharing a date keep their
    /// input order.
    #[must_use]
    pub fn from_records(mut records: Vec<PopulationRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// All records, ordered by date.
    #[must_use]
    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct district labels in first-seen order.
    #[must_use]
    pub fn districts(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.district.as_str()))
    }

    /// Distinct age band labels in first-seen order.
    #[must_use]
    pub fn age_bands(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.age_band.as_str()))
    }

    /// Distinct calendar years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.date.year()).collect();
        years.dedup();
        years
    }

    /// Earliest and latest date present, or `None` for an empty dataset.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.records.first()?.date, self.records.last()?.date))
    }

    /// Returns the discovered dimension values of this dataset.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        let range = self.date_range();
        DatasetSummary {
            districts: self.districts().into_iter().map(str::to_string).collect(),
            age_bands: self.age_bands().into_iter().map(str::to_string).collect(),
            years: self.years(),
            min_date: range.map(|(min, _)| min),
            max_date: range.map(|(_, max)| max),
            record_count: self.len(),
        }
    }
}

/// Dimension values discovered in a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// District labels in first-seen order.
    pub districts: Vec<String>,
    /// Age band labels in first-seen order.
    pub age_bands: Vec<String>,
    /// Years present, ascending.
    pub years: Vec<i32>,
    /// Earliest date in the data.
    pub min_date: Option<NaiveDate>,
    /// Latest date in the data.
    pub max_date: Option<NaiveDate>,
    /// Total number of records.
    pub record_count: usize,
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
