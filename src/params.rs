//! Training configuration loaded from `config.json`.
//!
//! Every section falls back to its defaults, so a config file only needs to
//! name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evolution::brain::Activation;
use crate::simulation::episode::NETWORK_INPUTS;

/// Top-level training parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Population size and termination rules.
    pub population: PopulationParams,
    /// Network shape shared by every genome.
    pub network: NetworkParams,
    /// Weight mutation rates.
    pub mutation: MutationParams,
    /// Speciation, stagnation and selection.
    pub species: SpeciesParams,
    /// Rewards and thresholds used while a generation plays.
    pub episode: EpisodeParams,
}

/// Population size and termination rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationParams {
    /// Number of genomes per generation.
    pub pop_size: usize,
    /// Best fitness at which training stops early.
    pub fitness_threshold: f32,
    /// Ignore `fitness_threshold` and always run the requested generations.
    pub no_fitness_termination: bool,
    /// Seed a fresh random population instead of failing when every species
    /// is removed.
    pub reset_on_extinction: bool,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            pop_size: 50,
            fitness_threshold: 100.0,
            no_fitness_termination: false,
            reset_on_extinction: false,
        }
    }
}

/// Network shape shared by every genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Input count. The episode always feeds three values.
    pub num_inputs: usize,
    /// Sizes of the hidden layers, empty for a direct input-output net.
    pub hidden_layers: Vec<usize>,
    /// Output count. Only the first output is read.
    pub num_outputs: usize,
    /// Activation applied after every layer.
    pub activation: Activation,
    /// Half-width of the uniform range for initial weights and biases.
    pub init_scale: f32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            num_inputs: 3,
            hidden_layers: Vec::new(),
            num_outputs: 1,
            activation: Activation::Tanh,
            init_scale: 1.0,
        }
    }
}

impl NetworkParams {
    /// Layer sizes from input to output.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.num_inputs);
        sizes.extend(&self.hidden_layers);
        sizes.push(self.num_outputs);
        sizes
    }
}

/// Weight mutation rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationParams {
    /// Probability that a weight is perturbed.
    pub weight_mutate_rate: f32,
    /// Half-width of the uniform perturbation.
    pub weight_mutate_power: f32,
    /// Probability that a weight is replaced by a fresh random value.
    pub weight_replace_rate: f32,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            weight_mutate_rate: 0.8,
            weight_mutate_power: 0.5,
            weight_replace_rate: 0.1,
        }
    }
}

/// Speciation, stagnation and selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesParams {
    /// Maximum brain distance to a species representative for membership.
    pub compatibility_threshold: f32,
    /// Generations without improvement before a species is removed.
    pub max_stagnation: u32,
    /// Number of best species protected from stagnation removal.
    pub species_elitism: usize,
    /// Champions copied unchanged into the next generation, per species.
    pub elitism: usize,
    /// Fraction of each species allowed to reproduce.
    pub survival_threshold: f32,
    /// Lower bound on the offspring allotted to a surviving species.
    pub min_species_size: usize,
}

impl Default for SpeciesParams {
    fn default() -> Self {
        Self {
            compatibility_threshold: 3.0,
            max_stagnation: 20,
            species_elitism: 2,
            elitism: 2,
            survival_threshold: 0.2,
            min_species_size: 2,
        }
    }
}

/// Rewards and thresholds used while a generation plays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeParams {
    /// Network output above which the bird jumps.
    pub jump_threshold: f32,
    /// Fitness added to every surviving bird each tick.
    pub survival_reward: f32,
    /// Fitness added to every surviving bird when a pipe is passed.
    pub pass_bonus: f32,
    /// Fitness removed from a bird that hits a pipe.
    pub collision_penalty: f32,
    /// Optional tick budget after which the episode ends regardless.
    pub max_ticks: Option<u64>,
}

impl Default for EpisodeParams {
    fn default() -> Self {
        Self {
            jump_threshold: 0.3,
            survival_reward: 0.1,
            pass_bonus: 4.0,
            collision_penalty: 1.0,
            max_ticks: None,
        }
    }
}

impl Params {
    /// Checks the values the simulation depends on.
    pub fn validate(&self) -> Result<()> {
        if self.population.pop_size == 0 {
            return Err(Error::InvalidConfig("population.pop_size must be > 0".into()));
        }
        if self.network.num_inputs != NETWORK_INPUTS {
            return Err(Error::InvalidConfig(format!(
                "network.num_inputs must be {}, got {}",
                NETWORK_INPUTS, self.network.num_inputs
            )));
        }
        if self.network.num_outputs == 0 {
            return Err(Error::InvalidConfig("network.num_outputs must be > 0".into()));
        }
        if self.network.hidden_layers.contains(&0) {
            return Err(Error::InvalidConfig("network.hidden_layers may not contain 0".into()));
        }
        let survival = self.species.survival_threshold;
        if !(survival > 0.0 && survival <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "species.survival_threshold must be in (0, 1], got {survival}"
            )));
        }
        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
