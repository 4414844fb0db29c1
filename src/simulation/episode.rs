//! One generation's game: every genome flies a bird until all have crashed.
//!
//! Each bird travels with its compiled network and a mutable borrow of its
//! genome, so eliminating a contestant removes all three at once. Fitness
//! written through the borrow stays with the population after the episode
//! ends.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::base::Base;
use super::bird::Bird;
use super::pipe::Pipe;
use super::scene::{BIRD_START, GROUND_Y, SCENE_WIDTH, SpriteMasks};
use crate::evolution::genome::{Genome, Network};
use crate::params::EpisodeParams;

/// Number of values fed to a bird's network each tick.
pub const NETWORK_INPUTS: usize = 3;

/// Lifecycle of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    /// At least one bird is flying.
    Running,
    /// No bird is left, or the tick budget ran out.
    Terminated,
}

/// Why a bird left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elimination {
    /// Hit a pipe; the collision penalty applies.
    Collision,
    /// Reached the ground.
    Ground,
}

/// A bird that left the game, kept after its contestant is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliminationRecord {
    /// Genome that flew the bird.
    pub genome_id: u64,
    /// What ended its flight.
    pub reason: Elimination,
    /// Tick on which it happened.
    pub tick: u64,
}

/// A bird, the network flying it and the genome collecting its fitness.
#[derive(Debug)]
pub struct Contestant<'a> {
    /// The bird on screen.
    pub bird: Bird,
    network: Network,
    genome: &'a mut Genome,
    eliminated: Option<Elimination>,
}

impl Contestant<'_> {
    /// Id of the genome behind this bird.
    pub fn genome_id(&self) -> u64 {
        self.genome.id
    }

    /// Fitness accumulated so far.
    pub fn fitness(&self) -> f32 {
        self.genome.fitness
    }

    fn is_active(&self) -> bool {
        self.eliminated.is_none()
    }
}

/// Index of the pipe a bird at `bird_x` should steer towards.
///
/// The second pipe is chosen once the bird is past the first pipe's right
/// edge and a second pipe exists; otherwise the first pipe is used, even if
/// the bird has already cleared it.
pub fn pipe_of_interest(bird_x: f32, pipes: &[Pipe]) -> Option<usize> {
    let first = pipes.first()?;
    if pipes.len() > 1 && bird_x > first.right() {
        Some(1)
    } else {
        Some(0)
    }
}

/// Network inputs for a bird steering towards `pipe`: its height and the
/// signed distances to the gap's upper and lower edges.
pub fn network_inputs(bird: &Bird, pipe: &Pipe) -> [f32; NETWORK_INPUTS] {
    [bird.y, bird.y - pipe.gap_top, bird.y - pipe.bottom]
}

/// The game state of one generation.
#[derive(Debug)]
pub struct Episode<'a> {
    contestants: Vec<Contestant<'a>>,
    eliminations: Vec<EliminationRecord>,
    pipes: Vec<Pipe>,
    base: Base,
    masks: &'a SpriteMasks,
    params: EpisodeParams,
    rng: StdRng,
    generation: u32,
    score: u32,
    ticks: u64,
    state: EpisodeState,
}

impl<'a> Episode<'a> {
    /// Sets up a fresh game for `genomes`, resetting their fitness.
    ///
    /// `seed` fixes the pipe sequence; `None` draws one from the thread RNG.
    pub fn new(
        genomes: &'a mut [Genome],
        generation: u32,
        masks: &'a SpriteMasks,
        params: EpisodeParams,
        seed: Option<u64>,
    ) -> Self {
        let contestants = genomes
            .iter_mut()
            .map(|genome| {
                genome.fitness = 0.0;
                Contestant {
                    bird: Bird::new(BIRD_START.0, BIRD_START.1),
                    network: Network::create(genome),
                    genome,
                    eliminated: None,
                }
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
        let pipes = vec![Pipe::new_random(SCENE_WIDTH, &mut rng, masks)];

        Self {
            contestants,
            eliminations: Vec::new(),
            pipes,
            base: Base::new(GROUND_Y),
            masks,
            params,
            rng,
            generation,
            score: 0,
            ticks: 0,
            state: EpisodeState::Running,
        }
    }

    /// Replaces the pipes, for scripted scenarios.
    pub fn with_pipes(mut self, pipes: Vec<Pipe>) -> Self {
        self.pipes = pipes;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// Whether the episode has ended.
    pub fn is_terminated(&self) -> bool {
        self.state == EpisodeState::Terminated
    }

    /// Generation this episode evaluates.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Pipes passed so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Birds still flying.
    pub fn alive(&self) -> usize {
        self.contestants.len()
    }

    /// Contestants still flying.
    pub fn contestants(&self) -> &[Contestant<'a>] {
        &self.contestants
    }

    /// Every bird eliminated so far, in order.
    pub fn eliminations(&self) -> &[EliminationRecord] {
        &self.eliminations
    }

    /// Birds still flying.
    pub fn birds(&self) -> impl Iterator<Item = &Bird> {
        self.contestants.iter().map(|c| &c.bird)
    }

    /// Pipes on screen, oldest first.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// The ground.
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Sprite masks used for collision.
    pub fn masks(&self) -> &SpriteMasks {
        self.masks
    }

    /// Simulates ticks until the episode terminates.
    pub fn run(&mut self) -> u32 {
        while self.tick() == EpisodeState::Running {}
        self.score
    }

    /// Advances the game by one tick.
    pub fn tick(&mut self) -> EpisodeState {
        if self.state == EpisodeState::Terminated {
            return self.state;
        }
        if self.contestants.is_empty()
            || self.params.max_ticks.is_some_and(|budget| self.ticks >= budget)
        {
            self.state = EpisodeState::Terminated;
            return self.state;
        }
        self.ticks += 1;

        self.fly();
        self.check_collisions();
        self.advance_pipes();
        self.check_ground();

        let tick = self.ticks;
        self.eliminations
            .extend(self.contestants.iter().filter_map(|c| {
                c.eliminated.map(|reason| EliminationRecord {
                    genome_id: c.genome.id,
                    reason,
                    tick,
                })
            }));
        self.contestants.retain(Contestant::is_active);
        self.base.scroll();
        for contestant in &mut self.contestants {
            contestant.bird.flap();
        }

        if self.contestants.is_empty() {
            debug!(
                "generation {} ended after {} ticks with score {}",
                self.generation, self.ticks, self.score
            );
            self.state = EpisodeState::Terminated;
        }
        self.state
    }

    /// Moves every bird, pays the survival reward and lets the networks
    /// decide whether to jump.
    fn fly(&mut self) {
        let pipes = &self.pipes;
        let params = &self.params;
        for contestant in &mut self.contestants {
            contestant.bird.advance();
            contestant.genome.fitness += params.survival_reward;

            let Some(target) = pipe_of_interest(contestant.bird.x, pipes) else {
                continue;
            };
            let inputs = network_inputs(&contestant.bird, &pipes[target]);
            let output = contestant.network.activate(&inputs);
            if output.first().is_some_and(|&o| o > params.jump_threshold) {
                contestant.bird.jump();
            }
        }
    }

    fn check_collisions(&mut self) {
        for pipe in &self.pipes {
            for contestant in self.contestants.iter_mut().filter(|c| c.is_active()) {
                if pipe.collides(&contestant.bird, self.masks) {
                    contestant.genome.fitness -= self.params.collision_penalty;
                    contestant.eliminated = Some(Elimination::Collision);
                    debug!("genome {} hit a pipe", contestant.genome.id);
                }
            }
        }
    }

    /// Updates pass flags, scrolls pipes, scores, spawns and drops pipes that
    /// had already left the scene at the start of the tick.
    fn advance_pipes(&mut self) {
        let mut add_pipe = false;
        let mut off_scene = Vec::with_capacity(self.pipes.len() + 1);
        for pipe in &mut self.pipes {
            for contestant in self.contestants.iter().filter(|c| c.is_active()) {
                if pipe.update_pass(contestant.bird.x) {
                    add_pipe = true;
                }
            }
            off_scene.push(pipe.is_off_scene());
            pipe.scroll();
        }

        if add_pipe {
            self.score += 1;
            for contestant in self.contestants.iter_mut().filter(|c| c.is_active()) {
                contestant.genome.fitness += self.params.pass_bonus;
            }
            self.pipes
                .push(Pipe::new_random(SCENE_WIDTH, &mut self.rng, self.masks));
            off_scene.push(false);
            debug!("score {} in generation {}", self.score, self.generation);
        }

        let mut marks = off_scene.into_iter();
        self.pipes.retain(|_| !marks.next().unwrap_or(false));
    }

    fn check_ground(&mut self) {
        for contestant in self.contestants.iter_mut().filter(|c| c.is_active()) {
            let height = self.masks.bird[contestant.bird.frame].height() as f32;
            if contestant.bird.hit_floor(height) {
                contestant.eliminated = Some(Elimination::Ground);
                debug!("genome {} hit the ground", contestant.genome.id);
            }
        }
    }
}
