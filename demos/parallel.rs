use ale_driver::{init_logger, EnvConfig, LoggerMode, SimAtari, VecAtari, VecEmulator};
use anyhow::Result;
use rand::prelude::*;

fn main() -> Result<()> {
    let num_envs = 16;
    init_logger(LoggerMode::Error);
    let config = EnvConfig::default().game("breakout").seed(42);
    let mut envs = VecAtari::build(num_envs, &config, SimAtari::new)?;

    let actions = envs.action_space();
    let mut rng = StdRng::seed_from_u64(0);
    envs.reset()?;

    let start_time = std::time::Instant::now();
    for _ in 0..50_000 {
        let batch: Vec<i32> = (0..num_envs).map(|_| actions.sample(&mut rng)).collect();
        let transitions = envs.step(&batch)?;
        for t in transitions.iter().filter(|t| t.is_done()) {
            envs.reset_slot(t.index)?;
        }
    }
    let elapsed = start_time.elapsed();
    println!("Time elapsed: {:?}", elapsed);
    Ok(())
}
