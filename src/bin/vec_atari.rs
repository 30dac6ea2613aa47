use ale_driver::{init_logger, RunConfig, SimBackend, VectorEnvDriver};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Steps a batch of environments with random actions and reports the throughput.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run configuration in YAML.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of batched steps.
    #[arg(long)]
    steps: Option<usize>,

    /// Number of environments.
    #[arg(long)]
    num_envs: Option<usize>,

    /// Name of the game.
    #[arg(long)]
    game: Option<String>,

    /// Random seed of the first environment.
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
    if let Some(num_envs) = args.num_envs {
        config.num_envs = num_envs;
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

    let mut driver = VectorEnvDriver::initialize(&SimBackend::new(), config.num_envs, &config.env)?
        .validate_actions(config.validate_actions);
    println!("{}", driver.action_space());
    driver.reset()?;

    let report = driver.run(config.steps)?;
    println!("{:?}", report.rewards);
    println!("{:?}", report.elapsed);
    println!("FPS: {:.2}", report.fps());
    Ok(())
}
