//! Turns raw control values into a [`FilterSelection`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use zurich_pop_analytics_models::FilterSelection;
use zurich_pop_dataset::Dataset;
use zurich_pop_population_models::{ALL_DISTRICTS_LABEL, DistrictSelector};

use crate::DashboardError;

/// District pre-selected when the page first loads.
pub const DEFAULT_DISTRICT: &str = "Kreis 1";

/// Control values as sent by the browser. Every field is optional; missing
/// values fall back to [`SelectionDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionParams {
    /// District label or [`ALL_DISTRICTS_LABEL`].
    pub district: Option<String>,
    /// Range start, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Range end, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Age distribution year.
    pub year: Option<String>,
}

/// Initial control values derived from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDefaults {
    /// Pre-selected district label.
    pub district: String,
    /// Earliest date in the data.
    pub from: NaiveDate,
    /// Latest date in the data.
    pub to: NaiveDate,
    /// Earliest year in the data.
    pub year: i32,
}

impl SelectionDefaults {
    /// Derives defaults from `dataset`, or `None` if it holds no records.
    #[must_use]
    pub fn for_dataset(dataset: &Dataset) -> Option<Self> {
        let (from, to) = dataset.date_range()?;
        let year = *dataset.years().first()?;

        let districts = dataset.districts();
        let district = if districts.contains(&DEFAULT_DISTRICT) {
            DEFAULT_DISTRICT
        } else {
            districts.first().copied().unwrap_or(ALL_DISTRICTS_LABEL)
        };

        Some(Self {
            district: district.to_string(),
            from,
            to,
            year,
        })
    }
}

/// Resolves `params` against `defaults`.
///
/// Unknown districts and years are accepted as-is; they simply select
/// nothing.
///
/// # Errors
///
/// * [`DashboardError::InvalidParameter`] if a date or the year cannot be
///   parsed
/// * [`DashboardError::NoData`] if a value is missing and the dataset is
///   empty, so there is no default to fall back to
pub fn resolve(
    params: &SelectionParams,
    defaults: Option<&SelectionDefaults>,
) -> Result<FilterSelection, DashboardError> {
    let district = match (&params.district, defaults) {
        (Some(label), _) => DistrictSelector::from_label(label),
        (None, Some(d)) => DistrictSelector::from_label(&d.district),
        (None, None) => DistrictSelector::All,
    };

    let start = match (&params.from, defaults) {
        (Some(raw), _) => parse_date("from", raw)?,
        (None, Some(d)) => d.from,
        (None, None) => return Err(DashboardError::NoData),
    };

    let end = match (&params.to, defaults) {
        (Some(raw), _) => parse_date("to", raw)?,
        (None, Some(d)) => d.to,
        (None, None) => return Err(DashboardError::NoData),
    };

    let year = match (&params.year, defaults) {
        (Some(raw), _) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| invalid("year", raw))?,
        (None, Some(d)) => d.year,
        (None, None) => return Err(DashboardError::NoData),
    };

    Ok(FilterSelection {
        district,
        start,
        end,
        year,
    })
}

/// Parses `YYYY-MM-DD`, also accepting a trailing time component as sent
/// by some date pickers (`YYYY-MM-DDTHH:MM:SS`).
fn parse_date(name: &'static str, raw: &str) -> Result<NaiveDate, DashboardError> {
    let raw_trimmed = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw_trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d").map_err(|_| invalid(name, raw))
}

fn invalid(name: &'static str, raw: &str) -> DashboardError {
    DashboardError::InvalidParameter {
        name,
        value: raw.to_string(),
    }
}
