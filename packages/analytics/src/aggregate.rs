//! Scalar statistics over a filtered subset.
//!
//! Every aggregator looks only at rows on one date that fall inside the
//! district selection. Percentages are `None` when their denominator is
//! zero instead of dividing by zero.

use chrono::NaiveDate;
use zurich_pop_analytics_models::Metric;
use zurich_pop_population_models::{DistrictSelector, Origin, PopulationRecord, Sex};

fn on_date<'a>(
    rows: &'a [&'a PopulationRecord],
    date: NaiveDate,
    selector: &'a DistrictSelector,
) -> impl Iterator<Item = &'a PopulationRecord> + 'a {
    rows.iter()
        .copied()
        .filter(move |r| r.date == date && selector.matches(&r.district))
}

/// `part / total`, or `None` if `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn share(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64)
    }
}

/// Total residents on `date`.
#[must_use]
pub fn population(rows: &[&PopulationRecord], date: NaiveDate, selector: &DistrictSelector) -> u64 {
    on_date(rows, date, selector).map(|r| r.count).sum()
}

/// Share of foreign residents on `date`.
#[must_use]
pub fn foreigners_share(
    rows: &[&PopulationRecord],
    date: NaiveDate,
    selector: &DistrictSelector,
) -> Option<f64> {
    let (swiss, foreign) =
        on_date(rows, date, selector).fold((0, 0), |(swiss, foreign), r| match r.origin {
            Origin::Swiss => (swiss + r.count, foreign),
            Origin::Foreign => (swiss, foreign + r.count),
        });
    share(foreign, swiss + foreign)
}

/// Share of male residents on `date`.
#[must_use]
pub fn men_share(
    rows: &[&PopulationRecord],
    date: NaiveDate,
    selector: &DistrictSelector,
) -> Option<f64> {
    let (men, women) = on_date(rows, date, selector).fold((0, 0), |(men, women), r| match r.sex {
        Sex::Male => (men + r.count, women),
        Sex::Female => (men, women + r.count),
    });
    share(men, men + women)
}

/// Residents in `age_band` on `reference_date`.
#[must_use]
pub fn age_band_population(
    rows: &[&PopulationRecord],
    age_band: &str,
    selector: &DistrictSelector,
    reference_date: NaiveDate,
) -> u64 {
    on_date(rows, reference_date, selector)
        .filter(|r| r.age_band == age_band)
        .map(|r| r.count)
        .sum()
}

/// Evaluates one of the trend statistics on `date`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate(
    metric: Metric,
    rows: &[&PopulationRecord],
    date: NaiveDate,
    selector: &DistrictSelector,
) -> Option<f64> {
    match metric {
        Metric::Population => Some(population(rows, date, selector) as f64),
        Metric::ForeignersShare => foreigners_share(rows, date, selector),
        Metric::MenShare => men_share(rows, date, selector),
    }
}
