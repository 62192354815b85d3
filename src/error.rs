//! Error types for metric calculations, configuration and data sources

use thiserror::Error;

/// Failure of a single calculation call
///
/// Every ratio or growth formula with a zero denominator reports
/// `DivisionByZero` instead of returning `NaN` or an infinity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("division by zero while calculating '{metric}'")]
    DivisionByZero { metric: &'static str },

    #[error("not enough history to calculate '{metric}': need {required} points, got {actual}")]
    InsufficientHistory {
        metric: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("price per unit ({price}) does not exceed variable cost per unit ({variable_cost})")]
    NoContributionMargin { price: f64, variable_cost: f64 },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Failure while loading or validating an `AnalyticsConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration validation error: {0}")]
    Invalid(String),
}

/// Failure while fetching raw series from a `DataSource`
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read data source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown series key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' in column '{key}' at row {row}")]
    InvalidValue { key: String, row: usize, value: String },
}
