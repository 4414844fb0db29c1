//! Progress hooks invoked by the population at fixed points of a generation.

use std::collections::VecDeque;
use std::time::Duration;

use log::{info, warn};

use super::genome::Genome;
use super::species::SpeciesSet;
use super::statistics::GenerationStats;

/// Observer of the generational loop. Every hook defaults to doing nothing.
pub trait Reporter {
    /// A generation is about to be evaluated.
    fn start_generation(&mut self, _generation: u32) {}

    /// The generation was evaluated and speciated.
    fn post_evaluate(&mut self, _stats: &GenerationStats, _species: &SpeciesSet, _best: &Genome) {}

    /// A species was removed for stagnation.
    fn species_stagnant(&mut self, _species_id: u32, _size: usize) {}

    /// The fitness threshold was reached.
    fn found_solution(&mut self, _generation: u32, _best: &Genome) {}

    /// Every species was removed.
    fn complete_extinction(&mut self, _generation: u32) {}

    /// The next generation was bred.
    fn end_generation(
        &mut self,
        _generation: u32,
        _population_size: usize,
        _species: &SpeciesSet,
        _elapsed: Duration,
    ) {
    }
}

/// Writes progress to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogReporter {
    show_species_detail: bool,
    generation_times: VecDeque<f64>,
}

impl LogReporter {
    /// Creates a reporter; `show_species_detail` adds a per-species table.
    pub fn new(show_species_detail: bool) -> Self {
        Self {
            show_species_detail,
            generation_times: VecDeque::with_capacity(10),
        }
    }
}

impl Reporter for LogReporter {
    fn start_generation(&mut self, generation: u32) {
        info!("****** Running generation {} ******", generation);
    }

    fn post_evaluate(&mut self, stats: &GenerationStats, _species: &SpeciesSet, best: &Genome) {
        info!(
            "Population's average fitness: {:.5} stdev: {:.5}",
            stats.mean_fitness, stats.stdev_fitness
        );
        info!(
            "Best fitness: {:.5} - size: {} - species {} - id {}",
            best.fitness,
            best.brain.parameter_count(),
            best.species.map_or_else(|| "-".to_string(), |s| s.to_string()),
            best.id
        );
    }

    fn species_stagnant(&mut self, species_id: u32, size: usize) {
        info!(
            "Species {} with {} members is stagnated: removing it",
            species_id, size
        );
    }

    fn found_solution(&mut self, generation: u32, best: &Genome) {
        info!(
            "Best individual in generation {} meets fitness threshold - id {}",
            generation, best.id
        );
    }

    fn complete_extinction(&mut self, generation: u32) {
        warn!("All species extinct in generation {}", generation);
    }

    fn end_generation(
        &mut self,
        generation: u32,
        population_size: usize,
        species: &SpeciesSet,
        elapsed: Duration,
    ) {
        info!(
            "Population of {} members in {} species",
            population_size,
            species.len()
        );
        if self.show_species_detail {
            info!("   ID   age  size   fitness   adj fit  stag");
            info!("  ====  ===  ====  =========  =======  ====");
            for s in species.iter() {
                info!(
                    "  {:>4}  {:>3}  {:>4}  {:>9.3}  {:>7.3}  {:>4}",
                    s.id,
                    s.age(generation),
                    s.members.len(),
                    s.best_fitness,
                    s.adjusted_fitness,
                    s.stagnation
                );
            }
        }

        let secs = elapsed.as_secs_f64();
        self.generation_times.push_back(secs);
        if self.generation_times.len() > 10 {
            self.generation_times.pop_front();
        }
        let average = self.generation_times.iter().sum::<f64>() / self.generation_times.len() as f64;
        info!("Generation time: {:.3} sec ({:.3} average)", secs, average);
    }
}
