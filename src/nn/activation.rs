//! Activation Functions
//!
//! The activations a scalar regression network needs, with derivatives for
//! backpropagation. Hidden layers use ReLU/LeakyReLU/Tanh; the output layer
//! is Linear so predictions can take any sign.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Types of activation functions available
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ActivationType {
    /// Rectified Linear Unit: max(0, x)
    ReLU,
    /// Leaky ReLU: x for x > 0, alpha * x otherwise
    LeakyReLU,
    /// Hyperbolic tangent
    Tanh,
    /// Identity, for the regression output layer
    Linear,
}

/// Activation function applied to a whole pre-activation batch
pub trait Activation: Send + Sync {
    /// Apply the activation elementwise
    fn apply(&self, z: &Array2<f64>) -> Array2<f64>;

    /// Elementwise derivative with respect to the pre-activation
    fn derivative(&self, z: &Array2<f64>) -> Array2<f64>;
}

/// ReLU activation function
pub struct ReLU;

impl Activation for ReLU {
    fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|v| v.max(0.0))
    }

    fn derivative(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
    }
}

/// Leaky ReLU activation function
pub struct LeakyReLU {
    pub alpha: f64,
}

impl Default for LeakyReLU {
    fn default() -> Self {
        Self { alpha: 0.01 }
    }
}

impl Activation for LeakyReLU {
    fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|v| if v > 0.0 { v } else { self.alpha * v })
    }

    fn derivative(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|v| if v > 0.0 { 1.0 } else { self.alpha })
    }
}

/// Tanh activation function
pub struct Tanh;

impl Activation for Tanh {
    fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(f64::tanh)
    }

    fn derivative(&self, z: &Array2<f64>) -> Array2<f64> {
        let t = self.apply(z);
        1.0 - &t * &t
    }
}

/// Linear (identity) activation function
pub struct Linear;

impl Activation for Linear {
    fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        z.clone()
    }

    fn derivative(&self, z: &Array2<f64>) -> Array2<f64> {
        Array2::ones(z.dim())
    }
}

/// Create an activation function from type
pub fn create_activation(activation_type: ActivationType) -> Box<dyn Activation> {
    match activation_type {
        ActivationType::ReLU => Box::new(ReLU),
        ActivationType::LeakyReLU => Box::new(LeakyReLU::default()),
        ActivationType::Tanh => Box::new(Tanh),
        ActivationType::Linear => Box::new(Linear),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relu() {
        let relu = ReLU;
        let z = Array2::from_shape_vec((1, 4), vec![-1.0, 0.0, 1.0, 2.0]).unwrap();
        let out = relu.apply(&z);
        assert_eq!(
            out,
            Array2::from_shape_vec((1, 4), vec![0.0, 0.0, 1.0, 2.0]).unwrap()
        );

        let grad = relu.derivative(&z);
        assert_eq!(
            grad,
            Array2::from_shape_vec((1, 4), vec![0.0, 0.0, 1.0, 1.0]).unwrap()
        );
    }

    #[test]
    fn test_leaky_relu_keeps_negative_slope() {
        let leaky = LeakyReLU::default();
        let z = Array2::from_shape_vec((1, 2), vec![-2.0, 2.0]).unwrap();
        let out = leaky.apply(&z);
        assert_relative_eq!(out[[0, 0]], -0.02, epsilon = 1e-12);
        assert_relative_eq!(out[[0, 1]], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tanh_zero() {
        let tanh = Tanh;
        let z = Array2::zeros((1, 1));
        assert_relative_eq!(tanh.apply(&z)[[0, 0]], 0.0, epsilon = 1e-12);
        assert_relative_eq!(tanh.derivative(&z)[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_is_identity() {
        let linear = Linear;
        let z = Array2::from_shape_vec((2, 1), vec![-3.5, 7.0]).unwrap();
        assert_eq!(linear.apply(&z), z);
        assert_eq!(linear.derivative(&z), Array2::<f64>::ones((2, 1)));
    }
}
