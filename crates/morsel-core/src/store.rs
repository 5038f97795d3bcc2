//! The read-only sales record store.
//!
//! Records are loaded once from a CSV file at startup and shared by
//! reference for the life of the process. Nothing in this crate mutates
//! a [`SalesStore`] after construction.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::region::{Region, RegionFilter};
use crate::view::{ViewModel, compute_view};

/// One row of input data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub region: Region,
    pub sales: f64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, region: Region, sales: f64) -> Self {
        Self {
            date,
            region,
            sales,
        }
    }
}

/// Immutable set of sales records.
///
/// Cloning is cheap: the records live behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SalesStore {
    records: Arc<[SalesRecord]>,
}

const REQUIRED_COLUMNS: [&str; 3] = ["date", "region", "sales"];

/// Positions of the required columns within a header row.
struct ColumnIndex {
    date: usize,
    region: usize,
    sales: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };

        let [date, region, sales] = REQUIRED_COLUMNS;
        Ok(Self {
            date: position(date)?,
            region: position(region)?,
            sales: position(sales)?,
        })
    }
}

impl SalesStore {
    /// Build a store from records already in memory.
    pub fn from_records(records: impl Into<Arc<[SalesRecord]>>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Load records from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} sales records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Load records from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(rdr.headers()?)?;

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let row = idx + 1;
            let record = result?;
            records.push(parse_record(&record, &columns, row)?);
        }

        records.sort_by_key(|r| r.date);
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compute the view for `filter` over this store's records.
    pub fn view(&self, filter: RegionFilter, cutoff: NaiveDate) -> ViewModel {
        compute_view(&self.records, filter, cutoff)
    }
}

fn parse_record(record: &StringRecord, columns: &ColumnIndex, row: usize) -> Result<SalesRecord> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let raw_date = field(columns.date);
    let date = parse_date(raw_date).ok_or_else(|| Error::InvalidDate {
        row,
        value: raw_date.to_string(),
    })?;

    let raw_region = field(columns.region);
    let region = raw_region
        .parse::<Region>()
        .map_err(|_| Error::UnknownRegion {
            row,
            value: raw_region.to_string(),
        })?;

    let raw_sales = field(columns.sales);
    let sales = parse_sales(raw_sales).ok_or_else(|| Error::InvalidSales {
        row,
        value: raw_sales.to_string(),
    })?;

    Ok(SalesRecord::new(date, region, sales))
}

/// Parse `YYYY-MM-DD`, discarding any time-of-day component.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a non-negative amount such as `1234.5`, `$1,234.50`.
fn parse_sales(value: &str) -> Option<f64> {
    let cleaned: String = value
        .strip_prefix('$')
        .unwrap_or(value)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_from_reader() {
        let csv = "sales,date,region\n\
                   300.0,2021-01-16,south\n\
                   \"$1,234.50\",2021-01-14,North\n";
        let store = SalesStore::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        // Sorted by date on load
        assert_eq!(
            store.records()[0],
            SalesRecord::new(date("2021-01-14"), Region::North, 1234.5)
        );
        assert_eq!(store.records()[1].region, Region::South);
    }

    #[test]
    fn test_extra_columns_and_header_case() {
        let csv = "Product,Date,Region,Sales\n\
                   pink morsel,2021-02-01,east,12\n";
        let store = SalesStore::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            store.records(),
            &[SalesRecord::new(date("2021-02-01"), Region::East, 12.0)]
        );
    }

    #[test]
    fn test_missing_column() {
        let csv = "date,sales\n2021-01-01,5\n";
        match SalesStore::from_reader(csv.as_bytes()) {
            Err(Error::MissingColumn(col)) => assert_eq!(col, "region"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_rows_name_the_row() {
        let csv = "date,region,sales\n2021-01-01,north,5\nyesterday,north,5\n";
        match SalesStore::from_reader(csv.as_bytes()) {
            Err(Error::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }

        let csv = "date,region,sales\n2021-01-01,north,-5\n";
        assert!(matches!(
            SalesStore::from_reader(csv.as_bytes()),
            Err(Error::InvalidSales { row: 1, .. })
        ));

        let csv = "date,region,sales\n2021-01-01,central,5\n";
        assert!(matches!(
            SalesStore::from_reader(csv.as_bytes()),
            Err(Error::UnknownRegion { row: 1, .. })
        ));
    }

    #[test]
    fn test_parse_date_accepts_datetimes() {
        assert_eq!(parse_date("2021-01-15"), Some(date("2021-01-15")));
        assert_eq!(parse_date("2021-01-15 00:00:00"), Some(date("2021-01-15")));
        assert_eq!(parse_date("2021-01-15T13:45:00"), Some(date("2021-01-15")));
        assert_eq!(parse_date("15/01/2021"), None);
    }

    #[test]
    fn test_parse_sales() {
        assert_eq!(parse_sales("42"), Some(42.0));
        assert_eq!(parse_sales("$1,000.25"), Some(1000.25));
        assert_eq!(parse_sales("-1"), None);
        assert_eq!(parse_sales("NaN"), None);
        assert_eq!(parse_sales("inf"), None);
        assert_eq!(parse_sales(""), None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        assert!(matches!(SalesStore::load(&path), Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        std::fs::write(&path, "sales,date,region\n10,2021-01-01,west\n").unwrap();
        let store = SalesStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
    }
}
