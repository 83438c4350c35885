#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Population record types and demographic code definitions.
//!
//! This crate defines the canonical row type of the Zurich population
//! dataset along with the origin and sex classifications used by the
//! open-data export. It also owns [`DistrictSelector`], the single district
//! predicate shared by the filter engine and every aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Label used by the dashboard for the "all districts" selection.
pub const ALL_DISTRICTS_LABEL: &str = "Zurich";

/// Residency origin classification (`HerkunftCd`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Origin {
    /// Swiss citizens (code 1)
    Swiss = 1,
    /// Foreign nationals (code 2)
    Foreign = 2,
}

impl Origin {
    /// Returns the numeric code used in the source data.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Creates an origin from its numeric source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 1 or 2.
    pub const fn from_code(code: u8) -> Result<Self, InvalidCodeError> {
        match code {
            1 => Ok(Self::Swiss),
            2 => Ok(Self::Foreign),
            _ => Err(InvalidCodeError {
                kind: "origin",
                code,
            }),
        }
    }
}

/// Sex classification as recorded in the source data (`SexCd`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    /// Male (code 1)
    Male = 1,
    /// Female (code 2)
    Female = 2,
}

impl Sex {
    /// Returns the numeric code used in the source data.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Creates a sex classification from its numeric source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 1 or 2.
    pub const fn from_code(code: u8) -> Result<Self, InvalidCodeError> {
        match code {
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            _ => Err(InvalidCodeError { kind: "sex", code }),
        }
    }
}

/// Error returned when a numeric demographic code is outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCodeError {
    /// Which classification the code belongs to (`"origin"` or `"sex"`).
    pub kind: &'static str,
    /// The invalid code that was provided.
    pub code: u8,
}

impl std::fmt::Display for InvalidCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} code {}: expected 1 or 2", self.kind, self.code)
    }
}

impl std::error::Error for InvalidCodeError {}

/// One pre-aggregated row of the population table.
///
/// For a fixed (date, district, origin, sex, age band) tuple the source
/// holds at most one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    /// Reference date of the count (`StichtagDat`).
    pub date: NaiveDate,
    /// District label, e.g. "Kreis 1" (`KreisLang`).
    pub district: String,
    /// Swiss vs. foreign residents.
    pub origin: Origin,
    /// Male vs. female residents.
    pub sex: Sex,
    /// Age bucket label, e.g. "0-19" or "80+".
    pub age_band: String,
    /// Number of residents matching this combination on `date`.
    pub count: u64,
}

/// District selection coming from the UI.
///
/// This is the only place where district matching is decided; the filter
/// engine and all aggregators go through [`DistrictSelector::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DistrictSelector {
    /// Every district (the [`ALL_DISTRICTS_LABEL`] sentinel).
    All,
    /// A single district, matched by exact label equality.
    District(String),
}

impl DistrictSelector {
    /// Parses a UI label. [`ALL_DISTRICTS_LABEL`] selects all districts;
    /// anything else is taken verbatim as a district label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == ALL_DISTRICTS_LABEL {
            Self::All
        } else {
            Self::District(label.to_string())
        }
    }

    /// Returns the label shown in chart titles.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_DISTRICTS_LABEL,
            Self::District(label) => label,
        }
    }

    /// Returns `true` if `district` is covered by this selection.
    #[must_use]
    pub fn matches(&self, district: &str) -> bool {
        match self {
            Self::All => true,
            Self::District(label) => label == district,
        }
    }
}

impl std::fmt::Display for DistrictSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the age-distribution reference date (January 31) for `year`.
///
/// Returns `None` if `year` is outside the range `chrono` can represent.
#[must_use]
pub fn reference_date(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 31)
}
