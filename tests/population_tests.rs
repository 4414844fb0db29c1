#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use flappy_evo::error::Error;
use flappy_evo::evolution::brain::{Activation, Brain};
use flappy_evo::evolution::genome::Genome;
use flappy_evo::evolution::population::{GenerationOutcome, Population};
use flappy_evo::evolution::reporter::Reporter;
use flappy_evo::evolution::species::SpeciesSet;
use flappy_evo::evolution::statistics::GenerationStats;
use flappy_evo::params::{EpisodeParams, Params};
use flappy_evo::simulation::episode::Episode;
use flappy_evo::simulation::scene::SpriteMasks;

fn create_test_params(pop_size: usize) -> Params {
    let mut params = Params::default();
    params.population.pop_size = pop_size;
    params.population.no_fitness_termination = true;
    params.species.compatibility_threshold = 100.0;
    params
}

fn brain_with_bias(bias: f32) -> Brain {
    let mut brain = Brain::new(&[3, 1], Activation::Tanh, 0.0);
    brain.layers[0].biases[0] = bias;
    brain
}

#[test]
fn test_initial_population() {
    let population = Population::new(create_test_params(20)).unwrap();
    assert_eq!(population.genomes().len(), 20);
    assert_eq!(population.generation(), 0);
    assert!(population.best_genome().is_none());

    let mut ids: Vec<u64> = population.genomes().iter().map(|g| g.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    for genome in population.genomes() {
        assert_eq!(genome.brain.parameter_count(), 4);
    }
}

#[test]
fn test_invalid_params_rejected() {
    let mut params = Params::default();
    params.population.pop_size = 0;
    assert!(matches!(
        Population::new(params),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_elites_survive_unchanged() {
    let mut population = Population::new(create_test_params(50)).unwrap();
    population.begin_generation();
    for genome in population.genomes_mut() {
        genome.fitness = genome.id as f32;
    }
    let champion = population.genomes()[49].clone();
    let runner_up = population.genomes()[48].clone();

    let outcome = population.finish_generation().unwrap();
    assert_eq!(outcome, GenerationOutcome::Continue);
    assert_eq!(population.generation(), 1);
    assert_eq!(population.genomes().len(), 50);
    assert_eq!(population.species().len(), 1);

    let next = population.genomes();
    let kept = next.iter().find(|g| g.id == champion.id).unwrap();
    assert_eq!(kept.brain, champion.brain);
    assert_eq!(kept.fitness, 0.0);
    assert!(next.iter().any(|g| g.id == runner_up.id && g.brain == runner_up.brain));

    // Offspring get fresh ids
    assert!(next.iter().filter(|g| g.id >= 50).count() == 48);
    assert_eq!(population.best_genome().map(|g| g.id), Some(champion.id));
}

#[test]
fn test_run_stops_at_fitness_threshold() {
    let mut params = create_test_params(10);
    params.population.no_fitness_termination = false;
    params.population.fitness_threshold = 50.0;
    let mut population = Population::new(params).unwrap();

    let winner = population
        .run(
            |genomes, generation| {
                for genome in genomes.iter_mut() {
                    genome.fitness = 20.0 * generation as f32;
                }
                genomes[0].fitness += 1.0;
            },
            Some(10),
        )
        .unwrap()
        .unwrap();

    // Generation 3 is the first to reach 50
    assert_eq!(winner.fitness, 61.0);
    assert_eq!(population.generation(), 3);
    assert_eq!(population.statistics().generations.len(), 4);
}

#[test]
fn test_run_respects_generation_limit() {
    let mut population = Population::new(create_test_params(10)).unwrap();
    let mut calls = 0;
    let best = population
        .run(
            |genomes, _| {
                calls += 1;
                for genome in genomes.iter_mut() {
                    genome.fitness = 1.0;
                }
            },
            Some(3),
        )
        .unwrap();
    assert_eq!(calls, 3);
    assert!(best.is_some());
    assert_eq!(population.generation(), 3);

    let history = population.statistics();
    assert_eq!(history.best_fitness_points(), vec![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]);
    assert_eq!(history.generations[0].population_size, 10);
}

#[test]
fn test_complete_extinction() {
    let mut params = create_test_params(10);
    params.species.max_stagnation = 0;
    params.species.species_elitism = 0;
    let mut population = Population::new(params.clone()).unwrap();

    let result = population.run(
        |genomes, _| {
            for genome in genomes.iter_mut() {
                genome.fitness = 1.0;
            }
        },
        Some(5),
    );
    assert!(matches!(
        result,
        Err(Error::CompleteExtinction { generation: 1 })
    ));

    params.population.reset_on_extinction = true;
    let mut population = Population::new(params).unwrap();
    let result = population.run(
        |genomes, _| {
            for genome in genomes.iter_mut() {
                genome.fitness = 1.0;
            }
        },
        Some(3),
    );
    assert!(result.is_ok());
    assert_eq!(population.genomes().len(), 10);
}

#[test]
fn test_speciation_by_distance() {
    let mut genomes: Vec<Genome> = (0..6)
        .map(|id| {
            let bias = if id < 3 { 0.0 } else { 10.0 };
            Genome::new(id, brain_with_bias(bias))
        })
        .collect();

    let mut species = SpeciesSet::new(3.0);
    species.speciate(&mut genomes, 0);

    assert_eq!(species.len(), 2);
    let first = genomes[0].species;
    let second = genomes[3].species;
    assert!(first.is_some());
    assert_ne!(first, second);
    assert!(genomes[..3].iter().all(|g| g.species == first));
    assert!(genomes[3..].iter().all(|g| g.species == second));

    let sizes: Vec<usize> = species.iter().map(|s| s.members.len()).collect();
    assert_eq!(sizes, vec![3, 3]);
}

#[test]
fn test_stagnant_species_removed_except_elite() {
    let mut genomes: Vec<Genome> = (0..4)
        .map(|id| {
            let (bias, fitness) = if id < 2 { (0.0, 1.0) } else { (10.0, 5.0) };
            let mut genome = Genome::new(id, brain_with_bias(bias));
            genome.fitness = fitness;
            genome
        })
        .collect();

    let mut species = SpeciesSet::new(3.0);
    for generation in 0..4 {
        species.speciate(&mut genomes, generation);
    }
    assert!(species.iter().all(|s| s.stagnation == 3));

    let removed = species.remove_stagnant(2, 1);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].best_fitness, 1.0);
    assert_eq!(species.len(), 1);
    assert_eq!(species.iter().next().map(|s| s.best_fitness), Some(5.0));
}

#[test]
fn test_adjusted_fitness_is_normalised() {
    let mut genomes: Vec<Genome> = (0..4)
        .map(|id| {
            let (bias, fitness) = if id < 2 { (0.0, 2.0) } else { (10.0, 12.0) };
            let mut genome = Genome::new(id, brain_with_bias(bias));
            genome.fitness = fitness;
            genome
        })
        .collect();

    let mut species = SpeciesSet::new(3.0);
    species.speciate(&mut genomes, 0);
    let adjusted: Vec<f32> = species.iter().map(|s| s.adjusted_fitness).collect();
    assert_eq!(adjusted, vec![0.0, 1.0]);
}

#[derive(Clone, Default)]
struct RecordingReporter {
    events: Rc<RefCell<Vec<String>>>,
}

impl Reporter for RecordingReporter {
    fn start_generation(&mut self, generation: u32) {
        self.events.borrow_mut().push(format!("start {}", generation));
    }

    fn post_evaluate(&mut self, stats: &GenerationStats, _species: &SpeciesSet, _best: &Genome) {
        self.events
            .borrow_mut()
            .push(format!("evaluate {}", stats.generation));
    }

    fn end_generation(
        &mut self,
        generation: u32,
        population_size: usize,
        _species: &SpeciesSet,
        _elapsed: std::time::Duration,
    ) {
        self.events
            .borrow_mut()
            .push(format!("end {} {}", generation, population_size));
    }
}

#[test]
fn test_reporter_hooks_in_order() {
    let reporter = RecordingReporter::default();
    let events = Rc::clone(&reporter.events);

    let mut population = Population::new(create_test_params(8)).unwrap();
    population.add_reporter(Box::new(reporter));
    population.run(|_, _| {}, Some(2)).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            "start 0",
            "evaluate 0",
            "end 0 8",
            "start 1",
            "evaluate 1",
            "end 1 8"
        ]
    );
}

#[test]
fn test_evolve_with_episodes() {
    let mut params = create_test_params(12);
    params.episode = EpisodeParams {
        max_ticks: Some(300),
        ..EpisodeParams::default()
    };
    let masks = SpriteMasks::procedural();
    let episode_params = params.episode.clone();
    let mut population = Population::new(params).unwrap();

    let best = population
        .run(
            |genomes, generation| {
                let seed = Some(u64::from(generation));
                Episode::new(genomes, generation, &masks, episode_params.clone(), seed).run();
            },
            Some(3),
        )
        .unwrap()
        .unwrap();

    assert_eq!(population.statistics().generations.len(), 3);
    // Every bird survives at least a few ticks
    assert!(best.fitness > 0.0);
    assert!(best.fitness <= 300.0 * 0.1 + 4.0 * 300.0 / 20.0);
}
