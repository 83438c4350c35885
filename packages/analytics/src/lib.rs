#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter engine and aggregators for the population dashboard.
//!
//! [`filter::filter`] narrows the dataset to a district and date range.
//! The functions in [`aggregate`] reduce that subset, one date (or one age
//! band) at a time, to the scalar statistics behind each chart, and
//! [`series`] maps them over the distinct dates and age bands present.
//!
//! District matching goes through
//! [`DistrictSelector::matches`](zurich_pop_population_models::DistrictSelector::matches)
//! everywhere, so the filter engine and the aggregators cannot disagree on
//! which rows belong to a selection.

pub mod aggregate;
pub mod filter;
pub mod series;

#[cfg(test)]
pub(crate) mod fixtures;
