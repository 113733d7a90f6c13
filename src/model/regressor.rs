//! Regressor Capability Trait
//!
//! The evaluation harness only needs a fit/predict contract over
//! fixed-width feature rows and scalar labels. Anything satisfying it can
//! sit behind this seam: the feedforward network in `crate::nn`, the mean
//! baseline, or a test stub.

use ndarray::{Array1, Array2};

/// Contract for a trainable scalar regressor.
///
/// `predict` must return exactly one scalar per input row. Callers are
/// expected not to interleave `fit` with an in-flight sequence of `predict`
/// calls; the rolling evaluation assumes a stable, already-trained model.
pub trait Regressor {
    /// Fit the model to training rows and their scalar labels.
    fn fit(&mut self, features: &Array2<f64>, labels: &Array1<f64>);

    /// Predict one scalar per input row.
    fn predict(&mut self, features: &Array2<f64>) -> Array1<f64>;
}
