//! Headless trainer: evolves a population without a window and writes the
//! winner and the fitness history as JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use flappy_evo::error::Result;
use flappy_evo::evolution::population::Population;
use flappy_evo::evolution::reporter::LogReporter;
use flappy_evo::params::Params;
use flappy_evo::simulation::episode::Episode;
use flappy_evo::simulation::scene::SpriteMasks;
use log::{error, info, warn};

#[derive(Parser)]
#[command(name = "train")]
#[command(version)]
#[command(about = "Headless neuroevolution of flapping-game controllers")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Maximum number of generations
    #[arg(short, long, default_value = "50")]
    generations: u32,

    /// Seed for the pipe sequence of generation 0; later generations add
    /// their number
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for the winner and statistics
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Log a per-species table after each generation
    #[arg(long)]
    species_detail: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let params = Params::load_from_file(&cli.config)?;
    info!("Loaded config from {}", cli.config.display());
    std::fs::create_dir_all(&cli.output)?;

    let masks = SpriteMasks::procedural();
    let episode_params = params.episode.clone();
    let seed = cli.seed;

    let mut population = Population::new(params)?;
    population.add_reporter(Box::new(LogReporter::new(cli.species_detail)));

    let start = Instant::now();
    let winner = population.run(
        |genomes, generation| {
            let seed = seed.map(|s| s.wrapping_add(u64::from(generation)));
            let mut episode =
                Episode::new(genomes, generation, &masks, episode_params.clone(), seed);
            let score = episode.run();
            info!(
                "Generation {} scored {} in {} ticks",
                generation,
                score,
                episode.ticks()
            );
        },
        Some(cli.generations),
    )?;
    info!("Training finished in {:.2}s", start.elapsed().as_secs_f64());

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    match winner {
        Some(winner) => {
            let path = cli.output.join(format!("winner-{}.json", timestamp));
            winner.save_to_file(&path)?;
            info!(
                "Winner {} with fitness {:.2} saved to {}",
                winner.id,
                winner.fitness,
                path.display()
            );
        }
        None => warn!("No generation was evaluated; nothing to save"),
    }

    let path = cli.output.join(format!("stats-{}.json", timestamp));
    population.statistics().save_to_file(&path)?;
    info!("Statistics saved to {}", path.display());
    Ok(())
}
