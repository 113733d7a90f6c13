//! Model Module
//!
//! Defines the regressor contract the pipeline trains and evaluates
//! against, plus a trivial mean baseline

mod baseline;
mod regressor;

pub use baseline::MeanRegressor;
pub use regressor::Regressor;
