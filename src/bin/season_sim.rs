use clap::Parser;
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use season_core::{
    all_game_leverage, DomainBound, GameRecord, SeasonWinSimulator, SimConfig, SimError,
    BOWL_ELIGIBLE_WINS,
};

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sim(#[from] SimError),
}

#[derive(Parser, Debug)]
#[command(name = "season-sim")]
#[command(about = "Project a team's final regular-season win total", long_about = None)]
struct Args {
    /// JSON array of game records (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Monte Carlo draws (overrides SEASON_SIM_SAMPLES)
    #[arg(short, long)]
    samples: Option<usize>,

    /// Seed for reproducible output (overrides SEASON_SIM_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Size the win domain from the schedule instead of the fixed 0-13
    #[arg(long)]
    from_schedule: bool,

    /// Compute the exact distribution instead of simulating
    #[arg(long)]
    exact: bool,

    /// Include per-game leverage for remaining games
    #[arg(long)]
    leverage: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = SimConfig::from_env()?;
    if let Some(samples) = args.samples {
        config.sample_count = samples;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.from_schedule {
        config.domain = DomainBound::FromSchedule;
    }
    let sim = SeasonWinSimulator::new(config)?;

    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let games: Vec<GameRecord> = serde_json::from_str(&raw)?;
    info!(games = games.len(), exact = args.exact, "loaded schedule");

    let dist = if args.exact {
        sim.exact(&games)?
    } else {
        sim.simulate(&games)?
    };

    let mut output = json!({
        "distribution": dist,
        "expected_wins": dist.expected_wins(),
        "most_likely": dist.most_likely(),
        "bowl_eligible_probability": dist.prob_at_least(BOWL_ELIGIBLE_WINS),
    });
    if args.leverage {
        output["leverage"] = serde_json::to_value(all_game_leverage(&sim, &games)?)?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
