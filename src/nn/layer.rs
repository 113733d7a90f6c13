//! Dense (Fully Connected) Layer
//!
//! Performs output = activation(input @ weights + bias), caching the values
//! backpropagation needs.

use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::{create_activation, ActivationType};

/// Dense layer with weights, biases, and activation function
#[derive(Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weight matrix (input_size x output_size)
    pub weights: Array2<f64>,
    /// Bias vector (output_size)
    pub biases: Array1<f64>,
    /// Activation function type
    pub activation_type: ActivationType,
    /// Input size
    pub input_size: usize,
    /// Output size (number of neurons)
    pub output_size: usize,
    /// Dropout rate (0.0 = no dropout)
    pub dropout_rate: f64,

    // Cached values for backpropagation (not serialized)
    #[serde(skip)]
    input_cache: Option<Array2<f64>>,
    #[serde(skip)]
    preact_cache: Option<Array2<f64>>,
    #[serde(skip)]
    dropout_mask: Option<Array2<f64>>,
}

impl DenseLayer {
    /// Create a new dense layer with Xavier initialization
    pub fn new(input_size: usize, output_size: usize, activation: ActivationType) -> Self {
        let limit = (6.0 / (input_size + output_size) as f64).sqrt();
        let weights = Array2::random((input_size, output_size), Uniform::new(-limit, limit));
        let biases = Array1::zeros(output_size);

        Self {
            weights,
            biases,
            activation_type: activation,
            input_size,
            output_size,
            dropout_rate: 0.0,
            input_cache: None,
            preact_cache: None,
            dropout_mask: None,
        }
    }

    /// Create layer with specific dropout rate
    pub fn with_dropout(mut self, rate: f64) -> Self {
        self.dropout_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Forward pass through the layer
    pub fn forward(&mut self, input: &Array2<f64>, training: bool) -> Array2<f64> {
        self.input_cache = Some(input.clone());

        let mut z = input.dot(&self.weights);
        for mut row in z.rows_mut() {
            row += &self.biases;
        }
        self.preact_cache = Some(z.clone());

        let activation = create_activation(self.activation_type);
        let mut output = activation.apply(&z);

        if training && self.dropout_rate > 0.0 {
            let mut rng = rand::thread_rng();
            // Inverted dropout: survivors scaled to keep the expected value
            let mask = Array2::from_shape_fn(output.dim(), |_| {
                if rng.gen::<f64>() > self.dropout_rate {
                    1.0 / (1.0 - self.dropout_rate)
                } else {
                    0.0
                }
            });
            output = &output * &mask;
            self.dropout_mask = Some(mask);
        } else {
            self.dropout_mask = None;
        }

        output
    }

    /// Backward pass - compute gradients
    /// Returns: (input_gradient, weight_gradient, bias_gradient)
    pub fn backward(&self, output_gradient: &Array2<f64>) -> (Array2<f64>, Array2<f64>, Array1<f64>) {
        let z = self
            .preact_cache
            .as_ref()
            .expect("Must call forward before backward");
        let input = self
            .input_cache
            .as_ref()
            .expect("Must call forward before backward");

        let grad = if let Some(mask) = &self.dropout_mask {
            output_gradient * mask
        } else {
            output_gradient.clone()
        };

        let activation = create_activation(self.activation_type);
        let delta = &grad * &activation.derivative(z);

        let weight_gradient = input.t().dot(&delta);
        let bias_gradient = delta.sum_axis(Axis(0));
        let input_gradient = delta.dot(&self.weights.t());

        (input_gradient, weight_gradient, bias_gradient)
    }

    /// Get number of parameters
    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}

impl Clone for DenseLayer {
    fn clone(&self) -> Self {
        Self {
            weights: self.weights.clone(),
            biases: self.biases.clone(),
            activation_type: self.activation_type,
            input_size: self.input_size,
            output_size: self.output_size,
            dropout_rate: self.dropout_rate,
            input_cache: None,
            preact_cache: None,
            dropout_mask: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_creation() {
        let layer = DenseLayer::new(10, 5, ActivationType::ReLU);
        assert_eq!(layer.weights.dim(), (10, 5));
        assert_eq!(layer.biases.len(), 5);
    }

    #[test]
    fn test_forward_pass_dims() {
        let mut layer = DenseLayer::new(4, 3, ActivationType::ReLU);
        let input = Array2::ones((2, 4));
        let output = layer.forward(&input, false);
        assert_eq!(output.dim(), (2, 3));
    }

    #[test]
    fn test_backward_gradient_dims() {
        let mut layer = DenseLayer::new(4, 3, ActivationType::Linear);
        let input = Array2::ones((2, 4));
        layer.forward(&input, false);

        let output_gradient = Array2::ones((2, 3));
        let (input_grad, weight_grad, bias_grad) = layer.backward(&output_gradient);

        assert_eq!(input_grad.dim(), (2, 4));
        assert_eq!(weight_grad.dim(), (4, 3));
        assert_eq!(bias_grad.len(), 3);
    }

    #[test]
    fn test_dropout_masks_in_training_only() {
        let mut layer = DenseLayer::new(4, 6, ActivationType::ReLU).with_dropout(1.0);
        let input = Array2::ones((2, 4));

        // At rate 1.0 every unit is dropped during training
        let trained = layer.forward(&input, true);
        assert!(trained.iter().all(|&v| v == 0.0));

        // Inference never applies the mask, so repeated passes agree
        let inferred = layer.forward(&input, false);
        let again = layer.forward(&input, false);
        assert_eq!(inferred, again);
    }

    #[test]
    fn test_num_parameters() {
        let layer = DenseLayer::new(10, 5, ActivationType::ReLU);
        assert_eq!(layer.num_parameters(), 10 * 5 + 5);
    }
}
