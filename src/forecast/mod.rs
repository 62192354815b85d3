//! Forecast engine: compounding trend extrapolation and market forecast

mod trend;
mod market;

pub use trend::{average_growth, linear_projection, seasonal_projection};
pub use market::{forecast_growth, market_forecast, ForecastParams, ForecastPoint};
