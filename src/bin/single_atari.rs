use ale_driver::{init_logger, RunConfig, SimBackend, SingleEnvDriver};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Steps one environment with random actions and reports the throughput.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run configuration in YAML.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of steps.
    #[arg(long)]
    steps: Option<usize>,

    /// Name of the game.
    #[arg(long)]
    game: Option<String>,

    /// Random seed.
    #[arg(long)]
    seed: Option<i32>,
}

fn run_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(game) = &args.game {
        config.env.game = game.clone();
    }
    if let Some(seed) = args.seed {
        config.env.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = run_config(&args)?;
    init_logger(config.logger_mode);

    let mut driver = SingleEnvDriver::initialize(&SimBackend::new(), &config.env)?
        .validate_actions(config.validate_actions);
    println!("{}", driver.action_set());
    driver.reset()?;

    let report = driver.run(config.steps)?;
    println!("{:?}", report.elapsed);
    println!("FPS: {:.2}", report.fps());
    println!("{}", "=".repeat(100));
    Ok(())
}
