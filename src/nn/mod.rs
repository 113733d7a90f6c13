//! Neural Network Module
//!
//! Provides building blocks for feedforward regression networks:
//! - Activation functions (ReLU, LeakyReLU, Tanh, Linear)
//! - Dense layers with forward and backward propagation
//! - Full network with training, persistence, and the `Regressor` contract

mod activation;
mod layer;
mod network;
mod optimizer;

pub use activation::{Activation, ActivationType};
pub use layer::DenseLayer;
pub use network::{NetworkConfig, NeuralNetwork, TrainOptions};
pub use optimizer::{Adam, Optimizer, SGD};
