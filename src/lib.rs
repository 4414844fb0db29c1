//! # Flappy Evo - Neuroevolution in a side-scrolling game
//!
//! Birds piloted by small feed-forward networks fly through an endless
//! stream of pipes. Each generation plays one episode; the fitness each bird
//! earns drives a speciated genetic algorithm that breeds the next
//! generation.
//!
//! ## Features
//!
//! - Closed-form jump kinematics with tilt
//! - Pixel-accurate collision on precomputed opacity masks
//! - Pipe scoring, spawning and scrolling ground
//! - Fixed-topology MLP brains with mutation and crossover
//! - Distance-based speciation with stagnation and elitism
//! - JSON configuration, genome snapshots and fitness statistics
//!
//! ## Core Modules
//!
//! - [`simulation::episode`] - One generation's game loop
//! - [`simulation::bird`], [`simulation::pipe`], [`simulation::base`] - Entities
//! - [`simulation::mask`] - Opacity masks and overlap tests
//! - [`evolution::population`] - Generational loop
//! - [`params`] - Configuration

/// Game simulation: entities, collision and the per-generation episode.
pub mod simulation {
    /// Scrolling ground.
    pub mod base;
    /// The bird and its animation.
    pub mod bird;
    /// One generation's game loop.
    pub mod episode;
    /// Bounding-box helpers for the collision broad phase.
    pub mod geometric_utils;
    /// Jump and gravity rules.
    pub mod kinematics;
    /// Trait for entities that move every tick.
    ///
    /// The [`locatable::Locatable`] trait is implemented by every scene entity
    /// (Bird, Pipe, Base).
    pub mod locatable;
    /// Opacity masks for pixel-accurate collision.
    pub mod mask;
    /// Pipe pairs, scoring and collision.
    pub mod pipe;
    /// Scene constants and sprite masks.
    pub mod scene;
}

/// Neuroevolution driver.
pub mod evolution {
    /// Feed-forward networks.
    pub mod brain;
    /// Genomes and compiled networks.
    pub mod genome;
    /// Generational loop.
    pub mod population;
    /// Progress reporting hooks.
    pub mod reporter;
    /// Speciation.
    pub mod species;
    /// Fitness history.
    pub mod statistics;
}

pub mod error;
pub mod params;
