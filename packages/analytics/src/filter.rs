//! District and date-range filtering.

use chrono::NaiveDate;
use zurich_pop_dataset::Dataset;
use zurich_pop_population_models::{DistrictSelector, PopulationRecord};

/// Returns the records of `dataset` in `selector` whose date lies in
/// `start..=end`, in dataset order.
///
/// An inverted range (`start > end`) yields an empty subset.
#[must_use]
pub fn filter<'a>(
    dataset: &'a Dataset,
    selector: &DistrictSelector,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a PopulationRecord> {
    let rows: Vec<&PopulationRecord> = dataset
        .records()
        .iter()
        .filter(|r| start <= r.date && r.date <= end && selector.matches(&r.district))
        .collect();

    log::trace!(
        "filter: {selector} {start}..={end} kept {} of {} records",
        rows.len(),
        dataset.len()
    );

    rows
}
