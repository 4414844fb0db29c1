//! Generational loop: evaluate, speciate, cull stagnant species, breed.
//!
//! The population owns every genome. Evaluation is supplied by the caller,
//! either as a closure through [`Population::run`] or by driving
//! [`Population::begin_generation`] / [`Population::finish_generation`] by
//! hand when evaluation spans several frames.

use std::time::Instant;

use log::debug;
use rand::Rng;

use super::brain::Brain;
use super::genome::Genome;
use super::reporter::Reporter;
use super::species::SpeciesSet;
use super::statistics::{GenerationStats, Statistics};
use crate::error::{Error, Result};
use crate::params::Params;

/// What happened when a generation was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A new generation was bred and is ready for evaluation.
    Continue,
    /// The fitness threshold was met by this genome.
    Solved(Genome),
}

/// A population of genomes evolving across generations.
pub struct Population {
    params: Params,
    genomes: Vec<Genome>,
    species: SpeciesSet,
    generation: u32,
    next_genome_id: u64,
    best_genome: Option<Genome>,
    statistics: Statistics,
    reporters: Vec<Box<dyn Reporter>>,
    generation_start: Instant,
}

impl Population {
    /// Creates a random initial population.
    pub fn new(params: Params) -> Result<Self> {
        params.validate()?;
        let mut population = Self {
            species: SpeciesSet::new(params.species.compatibility_threshold),
            params,
            genomes: Vec::new(),
            generation: 0,
            next_genome_id: 0,
            best_genome: None,
            statistics: Statistics::default(),
            reporters: Vec::new(),
            generation_start: Instant::now(),
        };
        population.genomes = population.random_genomes();
        Ok(population)
    }

    /// Registers a progress reporter.
    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    /// Number of the generation currently being evaluated.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Current genomes.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Current genomes, for evaluation.
    pub fn genomes_mut(&mut self) -> &mut [Genome] {
        &mut self.genomes
    }

    /// Live species.
    pub fn species(&self) -> &SpeciesSet {
        &self.species
    }

    /// Fitness history.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Fittest genome seen so far.
    pub fn best_genome(&self) -> Option<&Genome> {
        self.best_genome.as_ref()
    }

    /// Parameters the population was created with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Runs up to `generations` generations (forever when `None`), calling
    /// `fitness_fn` once per generation to fill in every genome's fitness.
    ///
    /// Returns the fittest genome seen, or `None` if no generation ran.
    pub fn run<F>(&mut self, mut fitness_fn: F, generations: Option<u32>) -> Result<Option<Genome>>
    where
        F: FnMut(&mut [Genome], u32),
    {
        let mut completed = 0;
        while generations.is_none_or(|limit| completed < limit) {
            self.begin_generation();
            fitness_fn(&mut self.genomes, self.generation);
            completed += 1;

            if let GenerationOutcome::Solved(winner) = self.finish_generation()? {
                return Ok(Some(winner));
            }
        }
        Ok(self.best_genome.clone())
    }

    /// Marks the start of an evaluation.
    pub fn begin_generation(&mut self) {
        self.generation_start = Instant::now();
        for reporter in &mut self.reporters {
            reporter.start_generation(self.generation);
        }
    }

    /// Closes the evaluated generation and breeds the next one.
    pub fn finish_generation(&mut self) -> Result<GenerationOutcome> {
        if self.genomes.is_empty() {
            return Err(Error::CompleteExtinction {
                generation: self.generation,
            });
        }

        self.species.speciate(&mut self.genomes, self.generation);

        let best = self
            .genomes
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
            .cloned()
            .ok_or(Error::CompleteExtinction {
                generation: self.generation,
            })?;
        if self
            .best_genome
            .as_ref()
            .is_none_or(|current| best.fitness > current.fitness)
        {
            self.best_genome = Some(best.clone());
        }

        let stats = GenerationStats::from_genomes(self.generation, &self.genomes, self.species.len());
        for reporter in &mut self.reporters {
            reporter.post_evaluate(&stats, &self.species, &best);
        }
        self.statistics.record(stats, &best);

        if !self.params.population.no_fitness_termination
            && best.fitness >= self.params.population.fitness_threshold
        {
            for reporter in &mut self.reporters {
                reporter.found_solution(self.generation, &best);
            }
            return Ok(GenerationOutcome::Solved(best));
        }

        let removed = self.species.remove_stagnant(
            self.params.species.max_stagnation,
            self.params.species.species_elitism,
        );
        for species in &removed {
            for reporter in &mut self.reporters {
                reporter.species_stagnant(species.id, species.members.len());
            }
        }

        if self.species.is_empty() {
            for reporter in &mut self.reporters {
                reporter.complete_extinction(self.generation);
            }
            if !self.params.population.reset_on_extinction {
                return Err(Error::CompleteExtinction {
                    generation: self.generation,
                });
            }
            self.genomes = self.random_genomes();
        } else {
            self.genomes = self.reproduce();
        }

        for reporter in &mut self.reporters {
            reporter.end_generation(
                self.generation,
                self.genomes.len(),
                &self.species,
                self.generation_start.elapsed(),
            );
        }
        self.generation += 1;
        Ok(GenerationOutcome::Continue)
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_genome_id;
        self.next_genome_id += 1;
        id
    }

    fn random_genomes(&mut self) -> Vec<Genome> {
        (0..self.params.population.pop_size)
            .map(|_| {
                let id = self.next_id();
                Genome::new(id, Brain::from_params(&self.params.network))
            })
            .collect()
    }

    /// Breeds the next generation from the surviving species.
    fn reproduce(&mut self) -> Vec<Genome> {
        let adjusted: Vec<f32> = self.species.iter().map(|s| s.adjusted_fitness).collect();
        let spawn_amounts = compute_spawn(
            &adjusted,
            self.params.population.pop_size,
            self.params.species.min_species_size,
        );

        let mut rng = rand::rng();
        let mut offspring = Vec::with_capacity(self.params.population.pop_size);

        let species_members: Vec<Vec<Genome>> = self
            .species
            .iter()
            .map(|s| {
                let mut members: Vec<Genome> =
                    s.members.iter().map(|&idx| self.genomes[idx].clone()).collect();
                members.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
                members
            })
            .collect();

        for (members, spawn) in species_members.iter().zip(spawn_amounts) {
            let elites = self.params.species.elitism.min(spawn).min(members.len());
            for elite in &members[..elites] {
                let mut champion = elite.clone();
                champion.fitness = 0.0;
                offspring.push(champion);
            }

            let cutoff = ((self.params.species.survival_threshold * members.len() as f32).ceil()
                as usize)
                .max(2)
                .min(members.len());
            let parents = &members[..cutoff];

            for _ in elites..spawn {
                let parent1 = &parents[rng.random_range(0..parents.len())];
                let parent2 = &parents[rng.random_range(0..parents.len())];

                let mut brain = if parent1.id == parent2.id {
                    parent1.brain.clone()
                } else {
                    Brain::crossover(&parent1.brain, &parent2.brain)
                };
                brain.mutate(&self.params.mutation, self.params.network.init_scale);

                let id = self.next_id();
                debug!("genome {} bred from {} x {}", id, parent1.id, parent2.id);
                offspring.push(Genome::new(id, brain));
            }
        }

        offspring
    }
}

/// Splits `pop_size` offspring between species in proportion to their
/// adjusted fitness, giving each at least `min_size`.
///
/// When `min_size` times the number of species exceeds `pop_size`, every
/// species still gets `min_size` and the total is larger than `pop_size`.
pub fn compute_spawn(adjusted: &[f32], pop_size: usize, min_size: usize) -> Vec<usize> {
    if adjusted.is_empty() {
        return Vec::new();
    }

    let total: f32 = adjusted.iter().sum();
    let shares: Vec<f32> = if total > 0.0 {
        adjusted.iter().map(|a| a / total).collect()
    } else {
        vec![1.0 / adjusted.len() as f32; adjusted.len()]
    };

    let mut amounts: Vec<usize> = shares
        .iter()
        .map(|share| ((share * pop_size as f32).round() as usize).max(min_size))
        .collect();

    // Trim or pad towards the target, never pushing a species below min_size.
    let mut sum: usize = amounts.iter().sum();
    while sum > pop_size {
        let Some(largest) = (0..amounts.len())
            .filter(|&i| amounts[i] > min_size)
            .max_by_key(|&i| amounts[i])
        else {
            break;
        };
        amounts[largest] -= 1;
        sum -= 1;
    }
    if sum > pop_size {
        debug!(
            "{} species at minimum size {} spawn {} offspring, above the target of {}",
            amounts.len(),
            min_size,
            sum,
            pop_size
        );
    }
    if sum < pop_size {
        let favourite = (0..shares.len())
            .max_by(|&a, &b| shares[a].total_cmp(&shares[b]))
            .unwrap_or(0);
        amounts[favourite] += pop_size - sum;
    }
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_proportional_and_sums_to_target() {
        let amounts = compute_spawn(&[0.75, 0.25], 40, 2);
        assert_eq!(amounts, vec![30, 10]);
    }

    #[test]
    fn spawn_respects_minimum_size() {
        let amounts = compute_spawn(&[1.0, 0.0, 0.0], 10, 2);
        assert_eq!(amounts, vec![6, 2, 2]);
        assert_eq!(amounts.iter().sum::<usize>(), 10);
    }

    #[test]
    fn spawn_exceeds_target_when_minimums_do() {
        let amounts = compute_spawn(&[0.5, 0.3, 0.2], 4, 2);
        assert_eq!(amounts, vec![2, 2, 2]);
    }

    #[test]
    fn zero_fitness_splits_evenly() {
        let amounts = compute_spawn(&[0.0, 0.0], 10, 1);
        assert_eq!(amounts, vec![5, 5]);
    }
}
