//! Genomes carry a brain and the fitness it earned; networks are the
//! evaluation-ready form handed to a bird.

use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::brain::Brain;
use crate::error::Result;
use crate::simulation::episode::NETWORK_INPUTS;

/// A candidate controller and its fitness in the current generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Unique identifier within a population's lifetime.
    pub id: u64,
    /// Network weights.
    pub brain: Brain,
    /// Fitness accumulated during the latest evaluation.
    pub fitness: f32,
    /// Species the genome was assigned to, if speciated.
    pub species: Option<u32>,
}

impl Genome {
    /// Creates an unevaluated genome.
    pub fn new(id: u64, brain: Brain) -> Self {
        Self {
            id,
            brain,
            fitness: 0.0,
            species: None,
        }
    }

    /// Saves the genome to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a genome from a JSON file, rejecting brains that cannot take
    /// the bird's inputs.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let genome: Self = serde_json::from_str(&json)?;
        genome.brain.check_shape(NETWORK_INPUTS)?;
        Ok(genome)
    }
}

/// Feed-forward network compiled from a genome.
///
/// Owns a snapshot of the weights so the genome can keep accumulating
/// fitness while the network is queried.
#[derive(Debug, Clone)]
pub struct Network {
    brain: Brain,
}

impl Network {
    /// Compiles the genome's brain into an evaluable network.
    pub fn create(genome: &Genome) -> Self {
        Self {
            brain: genome.brain.clone(),
        }
    }

    /// Evaluates the network on `inputs`.
    pub fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        self.brain
            .think(&Array1::from_vec(inputs.to_vec()))
            .to_vec()
    }
}
