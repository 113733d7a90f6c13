//! Evaluation Module
//!
//! Held-out error metrics, rolling in-sample prediction, and price path
//! reconstruction from predicted log returns.

mod metrics;
mod rolling;

pub use metrics::{mean_squared_error, RegressionMetrics};
pub use rolling::{reconstruct_prices, rolling_predictions};
