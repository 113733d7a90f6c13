//! Regression Evaluation Metrics
//!
//! Error metrics for predicted versus actual return series

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean squared error between two equal-length series
pub fn mean_squared_error(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    if predicted.is_empty() {
        return Err(Error::invalid("mean_squared_error requires at least one sample"));
    }
    if predicted.len() != actual.len() {
        return Err(Error::invalid(format!(
            "mean_squared_error length mismatch: {} predicted vs {} actual",
            predicted.len(),
            actual.len()
        )));
    }

    let sum: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum();

    Ok(sum / predicted.len() as f64)
}

/// Summary metrics for a regression evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Percentage of samples where predicted and actual are both positive or both negative
    pub direction_accuracy: f64,
    /// Pearson correlation between predicted and actual
    pub correlation: f64,
    /// Number of samples
    pub n: usize,
}

impl RegressionMetrics {
    /// Calculate metrics from predicted and actual values
    pub fn calculate(predicted: &[f64], actual: &[f64]) -> Result<Self> {
        let mse = mean_squared_error(predicted, actual)?;
        let n = predicted.len();

        let mae = predicted
            .iter()
            .zip(actual.iter())
            .map(|(p, a)| (p - a).abs())
            .sum::<f64>()
            / n as f64;

        let same_direction = predicted
            .iter()
            .zip(actual.iter())
            .filter(|&(&p, &a)| (p > 0.0 && a > 0.0) || (p < 0.0 && a < 0.0))
            .count();
        let direction_accuracy = same_direction as f64 / n as f64 * 100.0;

        let correlation = Self::pearson(predicted, actual);

        Ok(Self {
            mse,
            rmse: mse.sqrt(),
            mae,
            direction_accuracy,
            correlation,
            n,
        })
    }

    fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;

        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        let denom = (var_x * var_y).sqrt();
        if denom > 0.0 {
            cov / denom
        } else {
            0.0
        }
    }

    /// Print summary report
    pub fn print_report(&self, title: &str) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║ {:<60} ║", title);
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║ Samples:              {:>12}                            ║", self.n);
        println!("║ MSE:                  {:>12.6e}                        ║", self.mse);
        println!("║ RMSE:                 {:>12.6}                          ║", self.rmse);
        println!("║ MAE:                  {:>12.6}                          ║", self.mae);
        println!("║ Direction Accuracy:   {:>12.2}%                          ║", self.direction_accuracy);
        println!("║ Correlation:          {:>12.4}                          ║", self.correlation);
        println!("╚══════════════════════════════════════════════════════════════╝");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mse_empty_errors() {
        assert!(mean_squared_error(&[], &[]).is_err());
    }

    #[test]
    fn test_mse_length_mismatch_errors() {
        assert!(mean_squared_error(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_mse_perfect_prediction() {
        let values = vec![0.01, -0.02, 0.005];
        let mse = mean_squared_error(&values, &values).unwrap();
        assert_relative_eq!(mse, 0.0);
    }

    #[test]
    fn test_mse_unit_offset() {
        // Each error is exactly 1, so the mean of squares is 1
        let mse = mean_squared_error(&[1.0, 2.0], &[2.0, 3.0]).unwrap();
        assert_relative_eq!(mse, 1.0);
    }

    #[test]
    fn test_direction_accuracy() {
        let predicted = vec![0.5, -0.5, 0.5, -0.5];
        let actual = vec![1.0, -1.0, -1.0, -1.0];

        let metrics = RegressionMetrics::calculate(&predicted, &actual).unwrap();
        assert_relative_eq!(metrics.direction_accuracy, 75.0);
    }

    #[test]
    fn test_zero_prediction_counts_as_no_direction() {
        // A flat prediction calls neither an up day nor a down day
        let predicted = vec![0.0, 0.5, -0.5, 0.0];
        let actual = vec![1.0, 1.0, -1.0, -1.0];

        let metrics = RegressionMetrics::calculate(&predicted, &actual).unwrap();
        assert_relative_eq!(metrics.direction_accuracy, 50.0);
    }

    #[test]
    fn test_correlation_of_linear_series() {
        let predicted = vec![1.0, 2.0, 3.0, 4.0];
        let actual = vec![2.0, 4.0, 6.0, 8.0];

        let metrics = RegressionMetrics::calculate(&predicted, &actual).unwrap();
        assert_relative_eq!(metrics.correlation, 1.0, epsilon = 1e-12);
    }
}
