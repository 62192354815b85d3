//! Load monthly series from a CSV file, one column per series

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder};

use super::DataSource;
use crate::error::SourceError;

/// Columns holding month labels rather than values
const LABEL_COLUMNS: [&str; 3] = ["month", "date", "period"];

/// Monthly CSV with a header row, e.g. `month,revenue,costs,users`
///
/// Every column except a month label column must parse as a number.
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    columns: BTreeMap<String, Vec<f64>>,
    months: usize,
}

impl CsvSource {
    /// Load all columns from a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        log::debug!("loading series from {}", path.display());
        Self::from_csv(Reader::from_path(path)?)
    }

    /// Load all columns from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Self::from_csv(ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: Reader<R>) -> Result<Self, SourceError> {
        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut columns: BTreeMap<String, Vec<f64>> = headers
            .iter()
            .filter(|h| !is_label(h))
            .map(|h| (h.clone(), Vec::new()))
            .collect();

        let mut months = 0;
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            for (header, raw) in headers.iter().zip(record.iter()) {
                let Some(values) = columns.get_mut(header) else {
                    continue;
                };
                let value = raw.trim().parse::<f64>().map_err(|_| SourceError::InvalidValue {
                    key: header.clone(),
                    row: row + 1,
                    value: raw.to_string(),
                })?;
                values.push(value);
            }
            months += 1;
        }

        log::debug!("loaded {} series over {} months", columns.len(), months);
        Ok(Self { columns, months })
    }

    /// Names of the value columns
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn months(&self) -> usize {
        self.months
    }
}

fn is_label(header: &str) -> bool {
    LABEL_COLUMNS.iter().any(|label| header.eq_ignore_ascii_case(label))
}

impl DataSource for CsvSource {
    fn fetch_series(&self, key: &str) -> Result<Vec<f64>, SourceError> {
        self.columns
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::UnknownKey(key.to_string()))
    }
}
