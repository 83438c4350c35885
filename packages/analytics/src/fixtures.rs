//! Hand-built records shared by the unit tests.

use chrono::NaiveDate;
use zurich_pop_dataset::Dataset;
use zurich_pop_population_models::{Origin, PopulationRecord, Sex};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn record(
    day: &str,
    district: &str,
    origin: Origin,
    sex: Sex,
    age_band: &str,
    count: u64,
) -> PopulationRecord {
    PopulationRecord {
        date: date(day),
        district: district.to_string(),
        origin,
        sex,
        age_band: age_band.to_string(),
        count,
    }
}

/// Two districts over three reference dates, plus one all-zero day.
pub fn sample_dataset() -> Dataset {
    use Origin::{Foreign, Swiss};
    use Sex::{Female, Male};

    Dataset::from_records(vec![
        record("2020-01-31", "Kreis 1", Swiss, Male, "0-19", 500),
        record("2020-01-31", "Kreis 1", Foreign, Female, "20-39", 300),
        record("2020-01-31", "Kreis 2", Swiss, Female, "0-19", 120),
        record("2020-01-31", "Kreis 2", Foreign, Male, "80+", 80),
        record("2021-01-31", "Kreis 1", Swiss, Male, "0-19", 510),
        record("2021-01-31", "Kreis 1", Foreign, Female, "20-39", 290),
        record("2021-01-31", "Kreis 2", Swiss, Female, "0-19", 130),
        record("2021-06-30", "Kreis 1", Swiss, Female, "40-59", 50),
        record("2022-01-31", "Kreis 2", Swiss, Male, "0-19", 0),
        record("2022-01-31", "Kreis 2", Foreign, Female, "0-19", 0),
    ])
}
