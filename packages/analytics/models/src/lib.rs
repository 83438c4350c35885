#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter selection and aggregate result types.
//!
//! Defines the inputs of the filter engine and the per-date and per-age-band
//! values produced by the aggregators, independent of how they are later
//! rendered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use zurich_pop_population_models::DistrictSelector;

/// Current values of the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    /// Selected district or all districts.
    pub district: DistrictSelector,
    /// First date of the trend range (inclusive).
    pub start: NaiveDate,
    /// Last date of the trend range (inclusive).
    pub end: NaiveDate,
    /// Year of the age distribution view.
    pub year: i32,
}

/// A per-date statistic shown as a trend line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    /// Total residents.
    Population,
    /// Share of foreign residents, `foreign / (swiss + foreign)`.
    ForeignersShare,
    /// Share of male residents, `men / (men + women)`.
    MenShare,
}

impl Metric {
    /// Returns all variants in dashboard order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Population, Self::ForeignersShare, Self::MenShare]
    }
}

/// One point of a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Reference date.
    pub date: NaiveDate,
    /// Statistic for that date; `None` when it is undefined (zero
    /// denominator).
    pub value: Option<f64>,
}

/// Residents in one age band on the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeSlice {
    /// Age band label.
    pub age_band: String,
    /// Number of residents.
    pub population: u64,
}
