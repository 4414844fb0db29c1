//! Single fully connected layer.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Activation;
use crate::params::MutationParams;

/// A single layer of a multi-layer perceptron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Mlp {
    /// Creates a new layer with random weights and biases in `[-scale, scale)`.
    pub fn new_random(input_size: usize, output_size: usize, scale: f32) -> Self {
        if scale <= 0.0 {
            return Self::zeros(input_size, output_size);
        }
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-scale, scale)),
            biases: Array1::random(output_size, Uniform::new(-scale, scale)),
        }
    }

    /// Creates a layer with every weight and bias set to zero.
    pub fn zeros(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::zeros((output_size, input_size)),
            biases: Array1::zeros(output_size),
        }
    }

    /// Number of inputs the layer expects.
    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of outputs the layer produces.
    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Performs a forward pass followed by `activation`.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>, activation: Activation) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(|x| activation.apply(x));
        output
    }

    /// Perturbs or replaces individual weights and biases.
    ///
    /// Each parameter is replaced with probability `weight_replace_rate`,
    /// otherwise perturbed with probability `weight_mutate_rate` by a uniform
    /// step of at most `weight_mutate_power`.
    pub fn mutate(&mut self, mutation: &MutationParams, init_scale: f32) {
        let mut rng = rand::rng();
        let mut mutate_one = |w: f32| -> f32 {
            let roll: f32 = rng.random();
            if roll < mutation.weight_replace_rate {
                symmetric(&mut rng, init_scale)
            } else if roll < mutation.weight_replace_rate + mutation.weight_mutate_rate {
                w + symmetric(&mut rng, mutation.weight_mutate_power)
            } else {
                w
            }
        };
        self.weights.mapv_inplace(&mut mutate_one);
        self.biases.mapv_inplace(&mut mutate_one);
    }

    /// Creates a new layer by averaging two parent layers.
    pub fn crossover(parent1: &Mlp, parent2: &Mlp) -> Self {
        Self {
            weights: &parent1.weights * 0.5 + &parent2.weights * 0.5,
            biases: &parent1.biases * 0.5 + &parent2.biases * 0.5,
        }
    }
}

/// Uniform sample in `[-half, half)`, or zero for a degenerate range.
fn symmetric<R: Rng>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.random_range(-half..half)
    } else {
        0.0
    }
}
