//! CSV parsing for the population open-data export.
//!
//! Column names follow the Zurich statistical office export. Columns other
//! than the six required ones are ignored.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;
use zurich_pop_population_models::{Origin, PopulationRecord, Sex};

use crate::DatasetError;

/// Reference date column (`YYYY-MM-DD`).
pub const DATE_COLUMN: &str = "StichtagDat";
/// District label column.
pub const DISTRICT_COLUMN: &str = "KreisLang";
/// Origin code column (1 = Swiss, 2 = foreign).
pub const ORIGIN_COLUMN: &str = "HerkunftCd";
/// Sex code column (1 = male, 2 = female).
pub const SEX_COLUMN: &str = "SexCd";
/// Age band label column.
pub const AGE_BAND_COLUMN: &str = "AlterV20ueber80Kurz_noDM";
/// Resident count column.
pub const COUNT_COLUMN: &str = "AnzBestWir";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Positions of the required columns within a header row.
struct ColumnIndex {
    date: usize,
    district: usize,
    origin: usize,
    sex: usize,
    age_band: usize,
    count: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            district: find(DISTRICT_COLUMN)?,
            origin: find(ORIGIN_COLUMN)?,
            sex: find(SEX_COLUMN)?,
            age_band: find(AGE_BAND_COLUMN)?,
            count: find(COUNT_COLUMN)?,
        })
    }
}

type RecordKey = (NaiveDate, String, Origin, Sex, String);

fn record_key(record: &PopulationRecord) -> RecordKey {
    (
        record.date,
        record.district.clone(),
        record.origin,
        record.sex,
        record.age_band.clone(),
    )
}

/// Reads every row of a population CSV.
///
/// The total of all counts must fit in a `u64`, so no sum over a subset of
/// the rows can overflow.
///
/// # Errors
///
/// Returns [`DatasetError`] on malformed CSV, a missing required column, any
/// row whose date, code, or count cannot be parsed, a repeated
/// (date, district, origin, sex, age band) combination, or a total count
/// that overflows.
pub fn read_records(reader: impl Read) -> Result<Vec<PopulationRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    let mut seen: HashMap<RecordKey, u64> = HashMap::new();
    let mut total: u64 = 0;

    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let record = parse_row(&row, &columns, line)?;

        total = total
            .checked_add(record.count)
            .ok_or(DatasetError::CountOverflow { line })?;

        match seen.entry(record_key(&record)) {
            Entry::Occupied(first) => {
                return Err(DatasetError::DuplicateRecord {
                    line,
                    first_line: *first.get(),
                    date: record.date,
                    district: record.district,
                    origin: record.origin,
                    sex: record.sex,
                    age_band: record.age_band,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(line);
            }
        }

        records.push(record);
    }

    log::debug!("Read {} rows totalling {total} residents", records.len());

    Ok(records)
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnIndex,
    line: u64,
) -> Result<PopulationRecord, DatasetError> {
    let raw_date = field(row, columns.date, DATE_COLUMN, line)?;
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
        DatasetError::InvalidDate {
            line,
            value: raw_date.to_string(),
        }
    })?;

    let origin = parse_code(row, columns.origin, ORIGIN_COLUMN, line)
        .and_then(|code| Origin::from_code(code).map_err(|_| invalid(line, ORIGIN_COLUMN, code)))?;
    let sex = parse_code(row, columns.sex, SEX_COLUMN, line)
        .and_then(|code| Sex::from_code(code).map_err(|_| invalid(line, SEX_COLUMN, code)))?;

    let raw_count = field(row, columns.count, COUNT_COLUMN, line)?;
    let count = raw_count
        .parse::<u64>()
        .map_err(|_| invalid(line, COUNT_COLUMN, raw_count))?;

    Ok(PopulationRecord {
        date,
        district: field(row, columns.district, DISTRICT_COLUMN, line)?.to_string(),
        origin,
        sex,
        age_band: field(row, columns.age_band, AGE_BAND_COLUMN, line)?.to_string(),
        count,
    })
}

fn field<'r>(
    row: &'r StringRecord,
    idx: usize,
    column: &'static str,
    line: u64,
) -> Result<&'r str, DatasetError> {
    row.get(idx).ok_or_else(|| invalid(line, column, ""))
}

fn parse_code(
    row: &StringRecord,
    idx: usize,
    column: &'static str,
    line: u64,
) -> Result<u8, DatasetError> {
    let raw = field(row, idx, column, line)?;
    raw.parse::<u8>().map_err(|_| invalid(line, column, raw))
}

fn invalid(line: u64, column: &'static str, value: impl ToString) -> DatasetError {
    DatasetError::InvalidField {
        line,
        column,
        value: value.to_string(),
    }
}
