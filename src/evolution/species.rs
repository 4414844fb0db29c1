//! Distance-based speciation with stagnation tracking.
//!
//! A genome joins the first species whose representative brain lies within
//! the compatibility threshold; otherwise it founds a new species.

use serde::{Deserialize, Serialize};

use super::brain::Brain;
use super::genome::Genome;

/// A group of genomes with similar weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    /// Stable identifier.
    pub id: u32,
    /// Generation the species appeared in.
    pub created: u32,
    /// Brain new genomes are compared against.
    pub representative: Brain,
    /// Indices of the current members in the population's genome list.
    pub members: Vec<usize>,
    /// Best member fitness ever observed.
    pub best_fitness: f32,
    /// Mean member fitness in the latest generation.
    pub mean_fitness: f32,
    /// Mean fitness rescaled against the whole population, in [0, 1].
    pub adjusted_fitness: f32,
    /// Generations since `best_fitness` last improved.
    pub stagnation: u32,
}

impl Species {
    /// Creates an empty species around a representative.
    pub fn new(id: u32, created: u32, representative: Brain) -> Self {
        Self {
            id,
            created,
            representative,
            members: Vec::new(),
            best_fitness: f32::MIN,
            mean_fitness: 0.0,
            adjusted_fitness: 0.0,
            stagnation: 0,
        }
    }

    /// Check if a genome is close enough to join this species.
    pub fn belongs(&self, genome: &Genome, threshold: f32) -> bool {
        Brain::distance(&self.representative, &genome.brain) < threshold
    }

    /// Update fitness statistics after a generation was evaluated.
    pub fn update(&mut self, genomes: &[Genome]) {
        let fitnesses: Vec<f32> = self
            .members
            .iter()
            .filter_map(|&idx| genomes.get(idx))
            .map(|g| g.fitness)
            .collect();
        if fitnesses.is_empty() {
            return;
        }

        self.mean_fitness = fitnesses.iter().sum::<f32>() / fitnesses.len() as f32;
        let current_best = fitnesses.iter().copied().fold(f32::MIN, f32::max);

        if current_best > self.best_fitness {
            self.best_fitness = current_best;
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }
    }

    /// Age in generations.
    pub fn age(&self, generation: u32) -> u32 {
        generation.saturating_sub(self.created)
    }
}

/// All species of a population.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesSet {
    /// Live species, oldest first.
    pub species: Vec<Species>,
    /// Next identifier to hand out.
    pub next_species_id: u32,
    /// Maximum brain distance for membership.
    pub compatibility_threshold: f32,
}

impl SpeciesSet {
    /// Creates an empty set.
    pub fn new(compatibility_threshold: f32) -> Self {
        Self {
            species: Vec::new(),
            next_species_id: 0,
            compatibility_threshold,
        }
    }

    /// Assign genomes to species and refresh species statistics.
    pub fn speciate(&mut self, genomes: &mut [Genome], generation: u32) {
        for species in &mut self.species {
            species.members.clear();
        }

        for (idx, genome) in genomes.iter_mut().enumerate() {
            let threshold = self.compatibility_threshold;
            let slot = match self.species.iter().position(|s| s.belongs(genome, threshold)) {
                Some(slot) => slot,
                None => {
                    let id = self.next_species_id;
                    self.next_species_id += 1;
                    self.species
                        .push(Species::new(id, generation, genome.brain.clone()));
                    self.species.len() - 1
                }
            };
            let species = &mut self.species[slot];
            species.members.push(idx);
            genome.species = Some(species.id);
        }

        self.species.retain(|s| !s.members.is_empty());

        for species in &mut self.species {
            // The member closest to the old representative takes over.
            let closest = species.members.iter().copied().min_by(|&a, &b| {
                let da = Brain::distance(&species.representative, &genomes[a].brain);
                let db = Brain::distance(&species.representative, &genomes[b].brain);
                da.total_cmp(&db)
            });
            if let Some(closest) = closest {
                species.representative = genomes[closest].brain.clone();
            }
            species.update(genomes);
        }

        let (min, max) = genomes
            .iter()
            .map(|g| g.fitness)
            .fold((f32::MAX, f32::MIN), |(lo, hi), f| (lo.min(f), hi.max(f)));
        let range = (max - min).max(1.0);
        for species in &mut self.species {
            species.adjusted_fitness = (species.mean_fitness - min) / range;
        }
    }

    /// Removes species that have not improved for more than `max_stagnation`
    /// generations, sparing the `species_elitism` best ones.
    ///
    /// Returns the removed species.
    pub fn remove_stagnant(&mut self, max_stagnation: u32, species_elitism: usize) -> Vec<Species> {
        let mut ranked: Vec<(u32, f32)> = self
            .species
            .iter()
            .map(|s| (s.id, s.best_fitness))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let protected: Vec<u32> = ranked
            .iter()
            .take(species_elitism)
            .map(|&(id, _)| id)
            .collect();

        let (kept, removed): (Vec<Species>, Vec<Species>) =
            self.species.drain(..).partition(|s| {
                s.stagnation <= max_stagnation || protected.contains(&s.id)
            });
        self.species = kept;
        removed
    }

    /// Get species count
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether no species is alive.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Iterates over live species.
    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }
}
