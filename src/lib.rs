//! # Rust Neural Network for Daily Stock Prices
//!
//! This library provides a small supervised pipeline for daily stock closes:
//! log returns are framed into fixed-size windows, a regressor is fitted on
//! the chronological training segment, and the fitted model is evaluated both
//! by held-out MSE and by reconstructing an implied price path from its
//! rolling predictions.
//!
//! ## Modules
//!
//! - `data` - Daily bar loading, cleaning, and the price/return series types
//! - `framing` - Sliding-window supervised examples and the chronological split
//! - `model` - The `Regressor` contract and a mean baseline
//! - `nn` - Feedforward regression network (layers, activations, training)
//! - `eval` - Rolling prediction, price reconstruction, and error metrics

pub mod data;
pub mod error;
pub mod eval;
pub mod framing;
pub mod model;
pub mod nn;

pub use data::{clean, PriceSeries, ReturnSeries, StockSeries};
pub use error::{Error, Result};
pub use eval::{mean_squared_error, reconstruct_prices, rolling_predictions};
pub use framing::{chronological_split, frame};
pub use model::{MeanRegressor, Regressor};
pub use nn::NeuralNetwork;
