//! Windowed trainer: watch every generation fly, or replay a saved genome.

use std::path::PathBuf;

use clap::Parser;
use flappy_evo::error::Result;
use flappy_evo::evolution::genome::Genome;
use flappy_evo::evolution::population::{GenerationOutcome, Population};
use flappy_evo::evolution::reporter::LogReporter;
use flappy_evo::evolution::statistics::Statistics;
use flappy_evo::params::Params;
use flappy_evo::simulation::episode::{Episode, EpisodeState};
use flappy_evo::simulation::scene::SpriteMasks;
use log::{error, info};
use macroquad::prelude::*;

mod assets;
mod graphics;
mod ui;

use assets::Sprites;
use ui::{FitnessHistory, UIState};

#[derive(Parser, Debug)]
#[command(name = "flappy-evo")]
#[command(version)]
#[command(about = "Evolve neural networks that play a side-scrolling flapping game")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Maximum number of generations
    #[arg(short, long, default_value = "50")]
    generations: u32,

    /// Directory with bird1-3.png, pipe.png, bg.png and base.png
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Seed for the pipe sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Replay a saved genome instead of training
    #[arg(long)]
    replay: Option<PathBuf>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Flappy Evo".to_owned(),
        window_width: 500,
        window_height: 800,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let params = Params::load_from_file(&cli.config)?;
    info!("Loaded config from {}", cli.config.display());

    let (sprites, masks) = match &cli.assets {
        Some(dir) => {
            let (textures, masks) = assets::load(dir).await?;
            (Sprites::Textured(textures), masks)
        }
        None => (Sprites::Procedural, SpriteMasks::procedural()),
    };

    let mut ui_state = UIState::new();

    if let Some(path) = &cli.replay {
        let genome = Genome::load_from_file(path)?;
        info!("Replaying genome {} from {}", genome.id, path.display());
        replay(&genome, &params, &sprites, &masks, cli.seed, &mut ui_state).await;
        return Ok(());
    }

    let mut population = Population::new(params)?;
    population.add_reporter(Box::new(LogReporter::new(true)));

    let mut winner = None;
    for _ in 0..cli.generations {
        population.begin_generation();
        let generation = population.generation();
        let history = FitnessHistory::new(population.statistics(), population.species().len());
        let episode_params = population.params().episode.clone();
        let seed = cli.seed.map(|s| s.wrapping_add(u64::from(generation)));

        let finished = {
            let mut episode = Episode::new(
                population.genomes_mut(),
                generation,
                &masks,
                episode_params,
                seed,
            );
            play(&mut episode, &sprites, &mut ui_state, &history).await
        };
        if !finished {
            info!("Training interrupted in generation {}", generation);
            break;
        }

        if let GenerationOutcome::Solved(genome) = population.finish_generation()? {
            winner = Some(genome);
            break;
        }
    }

    let best = winner.or_else(|| population.best_genome().cloned());
    save_results(best.as_ref(), population.statistics())
}

/// Steps and draws `episode` until it terminates. Returns `false` if the
/// user pressed Escape.
async fn play(
    episode: &mut Episode<'_>,
    sprites: &Sprites,
    ui_state: &mut UIState,
    history: &FitnessHistory,
) -> bool {
    loop {
        if is_key_pressed(KeyCode::Escape) {
            return false;
        }
        ui_state.handle_input();

        for _ in 0..ui_state.ticks_per_frame {
            if episode.tick() == EpisodeState::Terminated {
                break;
            }
        }

        graphics::draw_scene(episode, sprites);
        if ui_state.show_stats {
            ui::draw_ui(ui_state, episode, history);
            ui::process_egui();
        }

        next_frame().await;

        if episode.is_terminated() {
            return true;
        }
    }
}

/// Flies `genome` alone, one episode after another, until Escape.
async fn replay(
    genome: &Genome,
    params: &Params,
    sprites: &Sprites,
    masks: &SpriteMasks,
    seed: Option<u64>,
    ui_state: &mut UIState,
) {
    let history = FitnessHistory::default();
    let mut round: u32 = 0;
    loop {
        let mut genomes = vec![genome.clone()];
        let seed = seed.map(|s| s.wrapping_add(u64::from(round)));
        let mut episode = Episode::new(&mut genomes, round, masks, params.episode.clone(), seed);
        if !play(&mut episode, sprites, ui_state, &history).await {
            return;
        }
        info!("Replay {} scored {}", round, episode.score());
        round += 1;
    }
}

fn save_results(best: Option<&Genome>, statistics: &Statistics) -> Result<()> {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");

    if let Some(best) = best {
        let path = format!("winner-{}.json", timestamp);
        best.save_to_file(&path)?;
        info!("Best genome {} ({:.2}) saved to {}", best.id, best.fitness, path);
    }
    if !statistics.generations.is_empty() {
        let path = format!("stats-{}.json", timestamp);
        statistics.save_to_file(&path)?;
        info!("Statistics saved to {}", path);
    }
    Ok(())
}
