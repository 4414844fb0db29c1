//! Fixed-topology feed-forward networks that pilot the birds.
//!
//! Supports the genetic operations the population needs: random
//! initialisation, mutation, crossover and a distance for speciation.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::{MutationParams, NetworkParams};

pub mod mlp;

pub use mlp::Mlp;

/// Activation applied after every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Hyperbolic tangent, output in (-1, 1).
    #[default]
    Tanh,
    /// Logistic sigmoid, output in (0, 1).
    Sigmoid,
    /// Rectified linear unit.
    Relu,
}

impl Activation {
    /// Applies the activation to one value.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Relu => x.max(0.0),
        }
    }
}

/// Multi-layer perceptron used as a bird's controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
    /// Activation used by every layer.
    pub activation: Activation,
}

impl Brain {
    /// Creates a new brain with random weights.
    pub fn new(layer_sizes: &[usize], activation: Activation, scale: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Mlp::new_random(pair[0], pair[1], scale))
            .collect();

        Brain { layers, activation }
    }

    /// Creates a random brain shaped by the network parameters.
    pub fn from_params(network: &NetworkParams) -> Self {
        Self::new(&network.layer_sizes(), network.activation, network.init_scale)
    }

    /// Runs a forward pass through the brain.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output, self.activation);
        }
        output
    }

    /// Creates a new brain by averaging two parent brains of the same shape.
    pub fn crossover(parent1: &Brain, parent2: &Brain) -> Self {
        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Mlp::crossover(layer1, layer2))
            .collect();
        Brain {
            layers,
            activation: parent1.activation,
        }
    }

    /// Mutates all parameters in the brain.
    pub fn mutate(&mut self, mutation: &MutationParams, init_scale: f32) {
        for layer in &mut self.layers {
            layer.mutate(mutation, init_scale);
        }
    }

    /// Euclidean distance between the parameters of two brains.
    pub fn distance(brain1: &Brain, brain2: &Brain) -> f32 {
        let mut sum_sq = 0.0;
        for (layer1, layer2) in brain1.layers.iter().zip(&brain2.layers) {
            for (w1, w2) in layer1.weights.iter().zip(layer2.weights.iter()) {
                let diff = w1 - w2;
                sum_sq += diff * diff;
            }
            for (b1, b2) in layer1.biases.iter().zip(layer2.biases.iter()) {
                let diff = b1 - b2;
                sum_sq += diff * diff;
            }
        }
        sum_sq.sqrt()
    }

    /// Checks that the layers form a network taking `num_inputs` inputs.
    ///
    /// The first layer must accept `num_inputs`, each layer must accept the
    /// previous layer's outputs, and every bias vector must match its
    /// layer's outputs.
    pub fn check_shape(&self, num_inputs: usize) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::InvalidConfig("brain has no layers".into()));
        }

        let mut expected = num_inputs;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.input_size() != expected {
                return Err(Error::InvalidConfig(format!(
                    "layer {} takes {} inputs, expected {}",
                    i,
                    layer.input_size(),
                    expected
                )));
            }
            if layer.biases.len() != layer.output_size() {
                return Err(Error::InvalidConfig(format!(
                    "layer {} has {} biases for {} outputs",
                    i,
                    layer.biases.len(),
                    layer.output_size()
                )));
            }
            expected = layer.output_size();
        }
        if expected == 0 {
            return Err(Error::InvalidConfig("brain has no outputs".into()));
        }
        Ok(())
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.weights.len() + layer.biases.len())
            .sum()
    }
}
