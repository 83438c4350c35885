//! Maps the aggregators over the distinct dates and age bands of a
//! filtered subset.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use zurich_pop_analytics_models::{AgeSlice, Metric, TrendPoint};
use zurich_pop_population_models::{DistrictSelector, PopulationRecord, reference_date};

use crate::aggregate;

/// Distinct dates of `rows` in first-seen order.
#[must_use]
pub fn distinct_dates(rows: &[&PopulationRecord]) -> Vec<NaiveDate> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| r.date)
        .filter(|d| seen.insert(*d))
        .collect()
}

/// Distinct age band labels of `rows` in first-seen order.
#[must_use]
pub fn distinct_age_bands<'a>(rows: &[&'a PopulationRecord]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| r.age_band.as_str())
        .filter(|band| seen.insert(*band))
        .collect()
}

/// Groups `rows` by date, keeping first-seen date order.
fn group_by_date<'a>(rows: &[&'a PopulationRecord]) -> Vec<(NaiveDate, Vec<&'a PopulationRecord>)> {
    let mut slots: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<(NaiveDate, Vec<&PopulationRecord>)> = Vec::new();

    for &row in rows {
        let idx = *slots.entry(row.date).or_insert_with(|| {
            groups.push((row.date, Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(row);
    }

    groups
}

/// Evaluates `metric` once per distinct date of `rows`.
#[must_use]
pub fn trend(
    rows: &[&PopulationRecord],
    selector: &DistrictSelector,
    metric: Metric,
) -> Vec<TrendPoint> {
    group_by_date(rows)
        .into_iter()
        .map(|(date, day_rows)| TrendPoint {
            date,
            value: aggregate::evaluate(metric, &day_rows, date, selector),
        })
        .collect()
}

/// Residents per age band on January 31 of `year`.
///
/// Bands are those present in `rows`, in first-seen order. The reference
/// date is looked up inside `rows`, so a date range that excludes it
/// yields zero for every band.
#[must_use]
pub fn age_distribution(
    rows: &[&PopulationRecord],
    selector: &DistrictSelector,
    year: i32,
) -> Vec<AgeSlice> {
    let reference = reference_date(year);

    distinct_age_bands(rows)
        .into_iter()
        .map(|band| AgeSlice {
            age_band: band.to_string(),
            population: reference
                .map_or(0, |day| aggregate::age_band_population(rows, band, selector, day)),
        })
        .collect()
}
