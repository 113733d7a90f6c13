//! Optimization Algorithms
//!
//! Weight-update rules for training:
//! - SGD (optionally with momentum)
//! - Adam (adaptive moment estimation)
//!
//! One optimizer instance is held per layer; `step` applies a full layer
//! update so the internal timestep advances exactly once per update.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Optimizer trait for per-layer parameter updates
pub trait Optimizer: Send + Sync {
    /// Apply one update to a layer's weights and biases given gradients
    fn step(
        &mut self,
        weights: &mut Array2<f64>,
        biases: &mut Array1<f64>,
        weight_grad: &Array2<f64>,
        bias_grad: &Array1<f64>,
    );

    /// Reset optimizer state (for a new training run)
    fn reset(&mut self);

    /// Clone the optimizer for each layer
    fn clone_box(&self) -> Box<dyn Optimizer>;
}

/// Stochastic Gradient Descent with optional momentum
#[derive(Clone, Serialize, Deserialize)]
pub struct SGD {
    pub learning_rate: f64,
    pub momentum: f64,
    #[serde(skip)]
    velocity_w: Option<Array2<f64>>,
    #[serde(skip)]
    velocity_b: Option<Array1<f64>>,
}

impl SGD {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            momentum: 0.0,
            velocity_w: None,
            velocity_b: None,
        }
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }
}

impl Optimizer for SGD {
    fn step(
        &mut self,
        weights: &mut Array2<f64>,
        biases: &mut Array1<f64>,
        weight_grad: &Array2<f64>,
        bias_grad: &Array1<f64>,
    ) {
        if self.momentum > 0.0 {
            let vw = self
                .velocity_w
                .get_or_insert_with(|| Array2::zeros(weights.dim()));
            *vw = &*vw * self.momentum - weight_grad * self.learning_rate;
            *weights = &*weights + &*vw;

            let vb = self
                .velocity_b
                .get_or_insert_with(|| Array1::zeros(biases.len()));
            *vb = &*vb * self.momentum - bias_grad * self.learning_rate;
            *biases = &*biases + &*vb;
        } else {
            *weights = &*weights - &(weight_grad * self.learning_rate);
            *biases = &*biases - &(bias_grad * self.learning_rate);
        }
    }

    fn reset(&mut self) {
        self.velocity_w = None;
        self.velocity_b = None;
    }

    fn clone_box(&self) -> Box<dyn Optimizer> {
        Box::new(self.clone())
    }
}

/// Adam optimizer (Adaptive Moment Estimation)
#[derive(Clone, Serialize, Deserialize)]
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    #[serde(skip)]
    t: usize,
    #[serde(skip)]
    m_w: Option<Array2<f64>>,
    #[serde(skip)]
    v_w: Option<Array2<f64>>,
    #[serde(skip)]
    m_b: Option<Array1<f64>>,
    #[serde(skip)]
    v_b: Option<Array1<f64>>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            m_w: None,
            v_w: None,
            m_b: None,
            v_b: None,
        }
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }
}

impl Optimizer for Adam {
    fn step(
        &mut self,
        weights: &mut Array2<f64>,
        biases: &mut Array1<f64>,
        weight_grad: &Array2<f64>,
        bias_grad: &Array1<f64>,
    ) {
        self.t += 1;
        let correction1 = 1.0 - self.beta1.powi(self.t as i32);
        let correction2 = 1.0 - self.beta2.powi(self.t as i32);

        let m = self.m_w.get_or_insert_with(|| Array2::zeros(weights.dim()));
        let v = self.v_w.get_or_insert_with(|| Array2::zeros(weights.dim()));

        *m = &*m * self.beta1 + weight_grad * (1.0 - self.beta1);
        *v = &*v * self.beta2 + &(weight_grad * weight_grad) * (1.0 - self.beta2);

        let m_hat = &*m / correction1;
        let v_hat = &*v / correction2;
        *weights =
            &*weights - &(&m_hat * self.learning_rate / &(v_hat.mapv(f64::sqrt) + self.epsilon));

        let m = self.m_b.get_or_insert_with(|| Array1::zeros(biases.len()));
        let v = self.v_b.get_or_insert_with(|| Array1::zeros(biases.len()));

        *m = &*m * self.beta1 + bias_grad * (1.0 - self.beta1);
        *v = &*v * self.beta2 + &(bias_grad * bias_grad) * (1.0 - self.beta2);

        let m_hat = &*m / correction1;
        let v_hat = &*v / correction2;
        *biases =
            &*biases - &(&m_hat * self.learning_rate / &(v_hat.mapv(f64::sqrt) + self.epsilon));
    }

    fn reset(&mut self) {
        self.t = 0;
        self.m_w = None;
        self.v_w = None;
        self.m_b = None;
        self.v_b = None;
    }

    fn clone_box(&self) -> Box<dyn Optimizer> {
        Box::new(self.clone())
    }
}
