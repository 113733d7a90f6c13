//! Data Module
//!
//! Provides data ingestion and cleaning:
//! - Daily bar structures and CSV loading
//! - Validated price/return series types
//! - The `clean` pipeline from raw bars to aligned log returns

mod daily;
mod series;

pub use daily::{DailyBar, StockSeries};
pub use series::{clean, PriceSeries, ReturnSeries};
