//! Baseline Regressor
//!
//! Predicts the mean of its training labels for every input row. Useful as
//! the naive benchmark a trained network has to beat, and as a
//! deterministic stand-in for unit tests.

use ndarray::{Array1, Array2};

use super::regressor::Regressor;

/// Regressor that always predicts the mean of its training labels
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor {
    mean: f64,
}

impl MeanRegressor {
    pub fn new() -> Self {
        Self { mean: 0.0 }
    }

    /// The fitted mean (0.0 before `fit`)
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl Regressor for MeanRegressor {
    fn fit(&mut self, _features: &Array2<f64>, labels: &Array1<f64>) {
        self.mean = labels.mean().unwrap_or(0.0);
    }

    fn predict(&mut self, features: &Array2<f64>) -> Array1<f64> {
        Array1::from_elem(features.nrows(), self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_regressor_fits_label_mean() {
        let mut model = MeanRegressor::new();
        let x = Array2::zeros((4, 3));
        let y = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0]);

        model.fit(&x, &y);
        assert!((model.mean() - 2.5).abs() < 1e-12);

        let predictions = model.predict(&Array2::zeros((2, 3)));
        assert_eq!(predictions.len(), 2);
        assert!((predictions[0] - 2.5).abs() < 1e-12);
        assert!((predictions[1] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_unfitted_predicts_zero() {
        let mut model = MeanRegressor::new();
        let predictions = model.predict(&Array2::zeros((3, 5)));
        assert!(predictions.iter().all(|&p| p == 0.0));
    }
}
