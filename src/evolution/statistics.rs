//! Per-generation fitness statistics.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::genome::Genome;
use crate::error::Result;

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number, starting at 0.
    pub generation: u32,
    /// Highest fitness in the generation.
    pub best_fitness: f32,
    /// Mean fitness.
    pub mean_fitness: f32,
    /// Population standard deviation of fitness.
    pub stdev_fitness: f32,
    /// Number of genomes evaluated.
    pub population_size: usize,
    /// Number of species after speciation.
    pub species_count: usize,
}

impl GenerationStats {
    /// Summarises the fitness of `genomes`.
    pub fn from_genomes(generation: u32, genomes: &[Genome], species_count: usize) -> Self {
        let n = genomes.len();
        let (mean, stdev, best) = if n == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let mean = genomes.iter().map(|g| g.fitness).sum::<f32>() / n as f32;
            let variance = genomes
                .iter()
                .map(|g| (g.fitness - mean).powi(2))
                .sum::<f32>()
                / n as f32;
            let best = genomes.iter().map(|g| g.fitness).fold(f32::MIN, f32::max);
            (mean, variance.sqrt(), best)
        };

        Self {
            generation,
            best_fitness: best,
            mean_fitness: mean,
            stdev_fitness: stdev,
            population_size: n,
            species_count,
        }
    }
}

/// History of every generation a population has evaluated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// One entry per generation, oldest first.
    pub generations: Vec<GenerationStats>,
    /// Fittest genome of each generation.
    pub most_fit_genomes: Vec<Genome>,
}

impl Statistics {
    /// Records a generation and its champion.
    pub fn record(&mut self, stats: GenerationStats, best: &Genome) {
        self.generations.push(stats);
        self.most_fit_genomes.push(best.clone());
    }

    /// Best fitness per generation as plot points.
    pub fn best_fitness_points(&self) -> Vec<[f64; 2]> {
        self.generations
            .iter()
            .map(|s| [s.generation as f64, s.best_fitness as f64])
            .collect()
    }

    /// Mean fitness per generation as plot points.
    pub fn mean_fitness_points(&self) -> Vec<[f64; 2]> {
        self.generations
            .iter()
            .map(|s| [s.generation as f64, s.mean_fitness as f64])
            .collect()
    }

    /// Saves the history to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
