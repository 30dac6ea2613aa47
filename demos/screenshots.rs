use std::path::Path;

use anyhow::Result;
use rand::prelude::*;

use ale_driver::{Emulator, EnvConfig, SimAtari};

fn main() -> Result<()> {
	let screenshots_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("screenshots").join("breakout");
	std::fs::create_dir_all(&screenshots_dir)?;

	let mut env = SimAtari::new(&EnvConfig::default().game("breakout"))?;
	let actions = env.action_set();
	let (h, w) = env.screen_dim();
	let mut rng = StdRng::seed_from_u64(0);
	env.reset()?;

	for i in 0..100 {
		let filename = screenshots_dir.join(format!("{:04}.png", i));
		let obs = env.obs();
		image::save_buffer(&filename, &obs, w as u32, h as u32, image::ColorType::L8)?;
		let outcome = env.step(actions.sample(&mut rng))?;
		if outcome.is_done() {
			env.reset()?;
		}
	}
	Ok(())
}
