//! Feedforward Regression Network
//!
//! Small fully connected network trained with minibatch gradient descent
//! under MSE loss. The output layer is Linear and scalar-capable, which is
//! all this pipeline needs; classification heads are out of scope.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};

use super::activation::ActivationType;
use super::layer::DenseLayer;
use super::optimizer::{Adam, Optimizer};
use crate::error::Result;
use crate::model::Regressor;

/// Network architecture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub layer_sizes: Vec<usize>,
    pub activations: Vec<ActivationType>,
    pub dropout_rates: Vec<f64>,
}

impl NetworkConfig {
    pub fn new(input_size: usize) -> Self {
        Self {
            layer_sizes: vec![input_size],
            activations: vec![],
            dropout_rates: vec![],
        }
    }

    /// Add a hidden layer
    pub fn add_layer(mut self, size: usize, activation: ActivationType) -> Self {
        self.layer_sizes.push(size);
        self.activations.push(activation);
        self.dropout_rates.push(0.0);
        self
    }

    /// Add a hidden layer with dropout
    pub fn add_layer_with_dropout(
        mut self,
        size: usize,
        activation: ActivationType,
        dropout: f64,
    ) -> Self {
        self.layer_sizes.push(size);
        self.activations.push(activation);
        self.dropout_rates.push(dropout);
        self
    }

    /// Set output layer
    pub fn output_layer(mut self, size: usize, activation: ActivationType) -> Self {
        self.layer_sizes.push(size);
        self.activations.push(activation);
        self.dropout_rates.push(0.0);
        self
    }
}

/// Training hyperparameters used when the network is driven through the
/// `Regressor` contract (which has no room for them in `fit`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainOptions {
    pub epochs: usize,
    pub batch_size: usize,
    pub verbose: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 32,
            verbose: false,
        }
    }
}

/// Feedforward neural network for scalar regression
pub struct NeuralNetwork {
    pub layers: Vec<DenseLayer>,
    pub config: NetworkConfig,
    pub train_options: TrainOptions,
    optimizers: Vec<Box<dyn Optimizer>>,
}

impl NeuralNetwork {
    /// Create network from configuration
    pub fn from_config(config: NetworkConfig) -> Self {
        let mut layers = Vec::new();

        for i in 0..config.activations.len() {
            let input_size = config.layer_sizes[i];
            let output_size = config.layer_sizes[i + 1];
            let activation = config.activations[i];
            let dropout = config.dropout_rates[i];

            let layer = DenseLayer::new(input_size, output_size, activation).with_dropout(dropout);
            layers.push(layer);
        }

        // Default optimizer: Adam
        let optimizers: Vec<Box<dyn Optimizer>> = (0..layers.len())
            .map(|_| Box::new(Adam::new(0.001)) as Box<dyn Optimizer>)
            .collect();

        Self {
            layers,
            config,
            train_options: TrainOptions::default(),
            optimizers,
        }
    }

    /// Create a scalar regression network: ReLU hidden layers, Linear output
    pub fn regression(input_size: usize, hidden_sizes: &[usize]) -> Self {
        let mut config = NetworkConfig::new(input_size);

        for &size in hidden_sizes {
            config = config.add_layer(size, ActivationType::ReLU);
        }

        config = config.output_layer(1, ActivationType::Linear);

        Self::from_config(config)
    }

    /// Set training hyperparameters
    pub fn with_train_options(mut self, options: TrainOptions) -> Self {
        self.train_options = options;
        self
    }

    /// Set optimizer for all layers
    pub fn set_optimizer(&mut self, optimizer: Box<dyn Optimizer>) {
        self.optimizers = self.layers.iter().map(|_| optimizer.clone_box()).collect();
    }

    /// Width of the input layer (the feature window size)
    pub fn input_size(&self) -> usize {
        self.config.layer_sizes[0]
    }

    /// Forward pass through the network
    pub fn forward(&mut self, input: &Array2<f64>, training: bool) -> Array2<f64> {
        let mut output = input.clone();
        for layer in &mut self.layers {
            output = layer.forward(&output, training);
        }
        output
    }

    /// Mean squared error over all output elements
    fn mse(predictions: &Array2<f64>, targets: &Array2<f64>) -> f64 {
        let n = predictions.len() as f64;
        let diff = predictions - targets;
        (&diff * &diff).sum() / n
    }

    fn mse_gradient(predictions: &Array2<f64>, targets: &Array2<f64>) -> Array2<f64> {
        let n = predictions.len() as f64;
        2.0 * (predictions - targets) / n
    }

    /// Backward pass and weight update
    pub fn backward(&mut self, predictions: &Array2<f64>, targets: &Array2<f64>) {
        let mut gradient = Self::mse_gradient(predictions, targets);

        for i in (0..self.layers.len()).rev() {
            let (input_grad, weight_grad, bias_grad) = self.layers[i].backward(&gradient);

            let layer = &mut self.layers[i];
            self.optimizers[i].step(
                &mut layer.weights,
                &mut layer.biases,
                &weight_grad,
                &bias_grad,
            );

            gradient = input_grad;
        }
    }

    /// Train for one epoch, returning the mean batch loss
    pub fn train_epoch(
        &mut self,
        x_train: &Array2<f64>,
        y_train: &Array2<f64>,
        batch_size: usize,
    ) -> f64 {
        let batch_size = batch_size.max(1);
        let n_samples = x_train.nrows();
        let n_batches = (n_samples + batch_size - 1) / batch_size;
        let mut total_loss = 0.0;

        // Shuffle batch order; the chronological split happened upstream
        let mut indices: Vec<usize> = (0..n_samples).collect();
        use rand::seq::SliceRandom;
        indices.shuffle(&mut rand::thread_rng());

        for batch_idx in 0..n_batches {
            let start = batch_idx * batch_size;
            let end = (start + batch_size).min(n_samples);
            let batch_indices = &indices[start..end];

            let x_batch = x_train.select(Axis(0), batch_indices);
            let y_batch = y_train.select(Axis(0), batch_indices);

            let predictions = self.forward(&x_batch, true);
            total_loss += Self::mse(&predictions, &y_batch);

            self.backward(&predictions, &y_batch);
        }

        total_loss / n_batches as f64
    }

    /// Train the network, returning the per-epoch loss history
    pub fn train(
        &mut self,
        x_train: &Array2<f64>,
        y_train: &Array2<f64>,
        epochs: usize,
        batch_size: usize,
        verbose: bool,
    ) -> Vec<f64> {
        let mut losses = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let loss = self.train_epoch(x_train, y_train, batch_size);
            losses.push(loss);

            if verbose && (epoch + 1) % 10 == 0 {
                println!("Epoch {}/{}: loss = {:.6}", epoch + 1, epochs, loss);
            }
        }

        losses
    }

    /// MSE on held-out data
    pub fn evaluate(&mut self, x_test: &Array2<f64>, y_test: &Array2<f64>) -> f64 {
        let predictions = self.forward(x_test, false);
        Self::mse(&predictions, y_test)
    }

    /// Get total number of parameters
    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.num_parameters()).sum()
    }

    /// Save model to file
    pub fn save(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        let data = (&self.config, &self.layers);
        serde_json::to_writer(writer, &data)?;

        Ok(())
    }

    /// Load model from file
    pub fn load(path: &str) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let (config, layers): (NetworkConfig, Vec<DenseLayer>) = serde_json::from_reader(reader)?;

        let optimizers: Vec<Box<dyn Optimizer>> = (0..layers.len())
            .map(|_| Box::new(Adam::new(0.001)) as Box<dyn Optimizer>)
            .collect();

        Ok(Self {
            layers,
            config,
            train_options: TrainOptions::default(),
            optimizers,
        })
    }

    /// Print network summary
    pub fn summary(&self) {
        println!("Neural Network Summary");
        println!("======================");
        println!("Input size: {}", self.config.layer_sizes[0]);

        for (i, layer) in self.layers.iter().enumerate() {
            println!(
                "Layer {}: {} -> {} ({:?}), params: {}",
                i + 1,
                layer.input_size,
                layer.output_size,
                layer.activation_type,
                layer.num_parameters()
            );
        }

        println!("======================");
        println!("Total parameters: {}", self.num_parameters());
    }
}

impl Regressor for NeuralNetwork {
    fn fit(&mut self, features: &Array2<f64>, labels: &Array1<f64>) {
        let targets = labels.to_owned().insert_axis(Axis(1));
        let options = self.train_options;
        self.train(
            features,
            &targets,
            options.epochs,
            options.batch_size,
            options.verbose,
        );
    }

    fn predict(&mut self, features: &Array2<f64>) -> Array1<f64> {
        self.forward(features, false).column(0).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_network_creation() {
        let config = NetworkConfig::new(10)
            .add_layer(32, ActivationType::ReLU)
            .add_layer(16, ActivationType::ReLU)
            .output_layer(1, ActivationType::Linear);

        let network = NeuralNetwork::from_config(config);
        assert_eq!(network.layers.len(), 3);
        assert_eq!(network.input_size(), 10);
    }

    #[test]
    fn test_forward_pass_dims() {
        let mut network = NeuralNetwork::regression(4, &[8, 4]);
        let input = Array2::ones((10, 4));
        let output = network.forward(&input, false);
        assert_eq!(output.dim(), (10, 1));
    }

    #[test]
    fn test_training_reduces_loss() {
        let mut network = NeuralNetwork::regression(2, &[8]);

        // y = x0 + x1, easily learnable
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                0.0, 0.0, 0.1, 0.2, 0.3, 0.1, 0.5, 0.5, 0.2, 0.7, 0.9, 0.1, 0.4, 0.4, 0.6, 0.3,
            ],
        )
        .unwrap();
        let y_vec: Vec<f64> = x.rows().into_iter().map(|r| r[0] + r[1]).collect();
        let y = Array2::from_shape_vec((8, 1), y_vec).unwrap();

        let initial_loss = network.evaluate(&x, &y);
        network.train(&x, &y, 200, 8, false);
        let final_loss = network.evaluate(&x, &y);

        assert!(final_loss < initial_loss);
    }

    #[test]
    fn test_dropout_layer_trains_and_infers() {
        let config = NetworkConfig::new(4)
            .add_layer_with_dropout(8, ActivationType::ReLU, 0.5)
            .output_layer(1, ActivationType::Linear);
        let mut network = NeuralNetwork::from_config(config);

        let x = Array2::ones((6, 4));
        let y = Array2::zeros((6, 1));

        // Backward must route gradients through the dropout mask
        let loss = network.train_epoch(&x, &y, 3);
        assert!(loss.is_finite());

        // Inference keeps every unit active
        let output = network.forward(&x, false);
        assert_eq!(output.dim(), (6, 1));
        assert!(output.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_zero_batch_size_trains_as_batch_of_one() {
        let mut network = NeuralNetwork::regression(2, &[4]);
        let x = Array2::ones((4, 2));
        let y = Array2::zeros((4, 1));

        let loss = network.train_epoch(&x, &y, 0);
        assert!(loss.is_finite());
    }

    #[test]
    fn test_regressor_contract() {
        let mut network = NeuralNetwork::regression(3, &[4]).with_train_options(TrainOptions {
            epochs: 5,
            batch_size: 4,
            verbose: false,
        });

        let x = Array2::ones((6, 3));
        let y = Array1::from_elem(6, 0.5);

        network.fit(&x, &y);
        let predictions = network.predict(&x);

        // One prediction per input row
        assert_eq!(predictions.len(), 6);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut network = NeuralNetwork::regression(4, &[6]);
        let input = Array2::from_shape_fn((3, 4), |(i, j)| (i + j) as f64 * 0.1);
        let before = network.predict(&input);

        let path = std::env::temp_dir().join("rust_nn_stocks_model_test.json");
        let path = path.to_str().unwrap();

        network.save(path).unwrap();
        let mut restored = NeuralNetwork::load(path).unwrap();
        let after = restored.predict(&input);

        for (a, b) in before.iter().zip(after.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }

        std::fs::remove_file(path).ok();
    }
}
