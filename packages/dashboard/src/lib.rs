#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard controller.
//!
//! Receives the current control values, runs the filter engine and the
//! aggregators, and returns all four chart descriptions in one
//! [`DashboardFigures`] value. The controller is idle between calls and
//! recomputes synchronously inside [`DashboardController::update`]; there
//! is no partial result. The dataset is injected at construction and never
//! mutated, so one controller can serve any number of concurrent requests.

pub mod selection;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use zurich_pop_analytics::{filter, series};
use zurich_pop_analytics_models::{FilterSelection, Metric};
use zurich_pop_dataset::Dataset;
use zurich_pop_figure::{age_distribution_figure, trend_figure};
use zurich_pop_figure_models::Figure;
use zurich_pop_population_models::ALL_DISTRICTS_LABEL;

pub use selection::{SelectionDefaults, SelectionParams};

/// Errors that can occur while interpreting control values.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A control value could not be parsed.
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The value that was sent.
        value: String,
    },

    /// A control value was omitted and the dataset is empty, so no default
    /// exists.
    #[error("No data loaded: date range and year must be given explicitly")]
    NoData,
}

/// The four charts of the dashboard, emitted together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFigures {
    /// Total population over time.
    pub population: Figure,
    /// Foreigners percentage over time.
    pub foreigners: Figure,
    /// Men percentage over time.
    pub men: Figure,
    /// Age distribution on January 31 of the selected year.
    pub age_distribution: Figure,
}

/// Values offered by the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOptions {
    /// District labels followed by the all-districts label.
    pub districts: Vec<String>,
    /// Years available in the year picker, ascending.
    pub years: Vec<i32>,
    /// Age band labels in first-seen order.
    pub age_bands: Vec<String>,
    /// Earliest selectable date.
    pub min_date: Option<NaiveDate>,
    /// Latest selectable date.
    pub max_date: Option<NaiveDate>,
    /// Initial control values; `None` for an empty dataset.
    pub defaults: Option<SelectionDefaults>,
}

/// Title and line colour of a trend chart.
fn trend_style(metric: Metric, district: &str) -> (String, &'static str) {
    match metric {
        Metric::Population => (format!("Population in {district}"), "#17B897"),
        Metric::ForeignersShare => (format!("Foreigners percentage in {district}"), "#E12D39"),
        Metric::MenShare => (format!("Men percentage in {district}"), "#E12D40"),
    }
}

/// Recomputes dashboard figures over a shared, read-only dataset.
#[derive(Debug, Clone)]
pub struct DashboardController {
    dataset: Arc<Dataset>,
    defaults: Option<SelectionDefaults>,
}

impl DashboardController {
    /// Creates a controller over `dataset`.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let defaults = SelectionDefaults::for_dataset(&dataset);
        Self { dataset, defaults }
    }

    /// The dataset this controller reads from.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Initial control values, or `None` for an empty dataset.
    #[must_use]
    pub const fn defaults(&self) -> Option<&SelectionDefaults> {
        self.defaults.as_ref()
    }

    /// Returns the options and initial values of the dashboard controls.
    #[must_use]
    pub fn options(&self) -> DashboardOptions {
        let summary = self.dataset.summary();

        let mut districts = summary.districts;
        districts.push(ALL_DISTRICTS_LABEL.to_string());

        DashboardOptions {
            districts,
            years: summary.years,
            age_bands: summary.age_bands,
            min_date: summary.min_date,
            max_date: summary.max_date,
            defaults: self.defaults.clone(),
        }
    }

    /// Resolves raw control values, filling gaps from the dataset defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if a value is malformed, or missing while
    /// the dataset is empty.
    pub fn resolve(&self, params: &SelectionParams) -> Result<FilterSelection, DashboardError> {
        selection::resolve(params, self.defaults.as_ref())
    }

    /// Recomputes all four figures for `selection`.
    ///
    /// The result depends only on the dataset and `selection`.
    #[must_use]
    pub fn update(&self, selection: &FilterSelection) -> DashboardFigures {
        let district = &selection.district;
        let rows = filter::filter(&self.dataset, district, selection.start, selection.end);

        log::debug!(
            "Recomputing figures for {district} {}..={} year {}: {} rows",
            selection.start,
            selection.end,
            selection.year,
            rows.len()
        );

        let trend = |metric: Metric| {
            let (title, color) = trend_style(metric, district.label());
            trend_figure(&series::trend(&rows, district, metric), &title, color)
        };

        let population = trend(Metric::Population);
        let foreigners = trend(Metric::ForeignersShare);
        let men = trend(Metric::MenShare);

        let age_distribution = age_distribution_figure(
            &series::age_distribution(&rows, district, selection.year),
            &format!("Age Distribution in {district} in {}", selection.year),
        );

        DashboardFigures {
            population,
            foreigners,
            men,
            age_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zurich_pop_figure_models::Trace;
    use zurich_pop_population_models::{Origin, PopulationRecord, Sex, reference_date};

    /// A January 31 record; every fixture row sits on a reference date.
    fn record(
        year: i32,
        district: &str,
        origin: Origin,
        sex: Sex,
        age_band: &str,
        count: u64,
    ) -> PopulationRecord {
        PopulationRecord {
            date: reference_date(year).unwrap(),
            district: district.to_string(),
            origin,
            sex,
            age_band: age_band.to_string(),
            count,
        }
    }

    fn controller() -> DashboardController {
        let dataset = Dataset::from_records(vec![
            record(2020, "Kreis 1", Origin::Swiss, Sex::Male, "0-19", 500),
            record(2020, "Kreis 1", Origin::Foreign, Sex::Female, "20-39", 300),
            record(2020, "Kreis 3", Origin::Swiss, Sex::Female, "0-19", 40),
            record(2021, "Kreis 3", Origin::Foreign, Sex::Male, "80+", 60),
        ]);
        DashboardController::new(Arc::new(dataset))
    }

    fn selection(district: &str, start: &str, end: &str, year: i32) -> FilterSelection {
        let params = SelectionParams {
            district: Some(district.to_string()),
            from: Some(start.to_string()),
            to: Some(end.to_string()),
            year: Some(year.to_string()),
        };
        selection::resolve(&params, None).unwrap()
    }

    fn line(figure: &Figure) -> (&[String], &[Option<f64>]) {
        match &figure.data[0] {
            Trace::Scatter(trace) => (trace.x.as_slice(), trace.y.as_slice()),
            Trace::Pie(_) => panic!("expected a line trace"),
        }
    }

    fn pie(figure: &Figure) -> (&[String], &[u64]) {
        match &figure.data[0] {
            Trace::Pie(trace) => (trace.labels.as_slice(), trace.values.as_slice()),
            Trace::Scatter(_) => panic!("expected a pie trace"),
        }
    }

    #[test]
    fn kreis_1_end_to_end() {
        let figures = controller().update(&selection("Kreis 1", "2020-01-01", "2020-12-31", 2020));

        assert_eq!(line(&figures.population).0, ["2020-01-31"]);
        assert_eq!(line(&figures.population).1, [Some(800.0)]);
        assert_eq!(line(&figures.foreigners).1, [Some(0.375)]);
        assert_eq!(line(&figures.men).1, [Some(0.625)]);

        let (labels, values) = pie(&figures.age_distribution);
        assert_eq!(labels, ["0-19", "20-39"]);
        assert_eq!(values, [500, 300]);

        assert_eq!(figures.population.layout.title.text, "Population in Kreis 1");
        assert_eq!(
            figures.age_distribution.layout.title.text,
            "Age Distribution in Kreis 1 in 2020"
        );
    }

    #[test]
    fn update_is_idempotent() {
        let controller = controller();
        let selection = selection("Zurich", "2019-01-01", "2022-01-01", 2021);

        let first = serde_json::to_string(&controller.update(&selection)).unwrap();
        let second = serde_json::to_string(&controller.update(&selection)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_range_renders_empty_series() {
        let figures = controller().update(&selection("Zurich", "2022-01-01", "2019-01-01", 2020));

        for figure in [&figures.population, &figures.foreigners, &figures.men] {
            let (x, y) = line(figure);
            assert!(x.is_empty());
            assert!(y.is_empty());
        }
        assert!(pie(&figures.age_distribution).0.is_empty());
    }

    #[test]
    fn age_distribution_matches_reference_population() {
        let controller = controller();
        let figures = controller.update(&selection("Zurich", "2019-01-01", "2022-01-01", 2021));

        let total: u64 = pie(&figures.age_distribution).1.iter().sum();
        let reference = reference_date(2021).unwrap().format("%Y-%m-%d").to_string();
        let (x, y) = line(&figures.population);
        let idx = x.iter().position(|d| *d == reference).unwrap();

        #[allow(clippy::cast_precision_loss)]
        let expected = total as f64;
        assert_eq!(y[idx], Some(expected));
    }

    #[test]
    fn options_append_all_districts_label() {
        let options = controller().options();
        assert_eq!(options.districts, ["Kreis 1", "Kreis 3", "Zurich"]);
        assert_eq!(options.years, [2020, 2021]);

        let defaults = options.defaults.unwrap();
        assert_eq!(defaults.district, "Kreis 1");
        assert_eq!(defaults.year, 2020);
        assert_eq!(defaults.from.to_string(), "2020-01-31");
        assert_eq!(defaults.to.to_string(), "2021-01-31");
    }

    #[test]
    fn resolve_then_update_with_defaults() {
        let controller = controller();
        let selection = controller.resolve(&SelectionParams::default()).unwrap();
        let figures = controller.update(&selection);
        assert_eq!(line(&figures.population).0, ["2020-01-31"]);
    }

    #[test]
    fn empty_dataset_has_no_defaults() {
        let controller = DashboardController::new(Arc::new(Dataset::default()));
        assert!(controller.defaults().is_none());
        assert_eq!(controller.options().districts, ["Zurich"]);
        assert!(controller.resolve(&SelectionParams::default()).is_err());
    }
}
