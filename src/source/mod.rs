//! Raw monthly series providers
//!
//! Engines never fetch data themselves. Callers pick a `DataSource`, pull the
//! series they need by key, and hand plain slices to the calculation
//! functions.

mod csv_file;

use std::collections::HashMap;

use crate::cashflow::CashFlowInput;
use crate::error::SourceError;

pub use csv_file::CsvSource;

/// Provider of named monthly series
pub trait DataSource {
    /// All values of series `key`, oldest month first
    fn fetch_series(&self, key: &str) -> Result<Vec<f64>, SourceError>;
}

/// Series held in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    series: HashMap<String, Vec<f64>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_series(mut self, key: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(key, values);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, values: Vec<f64>) {
        self.series.insert(key.into(), values);
    }
}

impl DataSource for InMemorySource {
    fn fetch_series(&self, key: &str) -> Result<Vec<f64>, SourceError> {
        self.series
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::UnknownKey(key.to_string()))
    }
}

/// Assemble a cash-flow input from the `inflows` and `outflows` series
pub fn cash_flow_input<S: DataSource + ?Sized>(
    source: &S,
    cash_reserves: f64,
    burn_rate: f64,
) -> Result<CashFlowInput, SourceError> {
    Ok(CashFlowInput {
        inflows: source.fetch_series("inflows")?,
        outflows: source.fetch_series("outflows")?,
        cash_reserves,
        burn_rate,
    })
}
