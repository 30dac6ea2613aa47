//! Synthetic backend.
//!
//! [`SimAtari`] stands in for a real emulator: it honours the handle contract
//! (seeding, action validation, lives, frame budget, reset-after-done) but the
//! rewards and life losses are drawn from a seeded random generator instead of
//! a game. Runs are fully determined by the configuration and the actions.
use crate::{
    action::ActionSet,
    backend::{Backend, Emulator, Observation, StepOutcome},
    config::EnvConfig,
    error::{AleError, Result},
    parallel::VecAtari,
    rom::BundledRom,
};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const SCREEN_HEIGHT: usize = 210;
pub const SCREEN_WIDTH: usize = 160;

const START_LIVES: i32 = 5;
const LIFE_LOSS_PROBABILITY: f64 = 0.004;
const BASE_REWARD_PROBABILITY: f64 = 0.01;
const REWARD_PROBABILITY_PER_ACTION: f64 = 0.002;

/// A seeded stand-in for one emulator instance.
pub struct SimAtari {
    rom: BundledRom,
    rng: StdRng,
    action_set: ActionSet,
    screen_size: (usize, usize),
    gray_scale: bool,
    score: i32,
    lives: i32,
    frame_count: u32,
    max_frames: u32,
    ready: bool,
}

impl SimAtari {
    pub fn new(config: &EnvConfig) -> Result<Self> {
        Self::with_screen(config, (SCREEN_HEIGHT, SCREEN_WIDTH))
    }

    /// Creates an instance with a `(height, width)` screen.
    pub fn with_screen(config: &EnvConfig, screen_size: (usize, usize)) -> Result<Self> {
        let rom = config.validate()?;
        if screen_size.0 == 0 || screen_size.1 == 0 {
            return Err(AleError::Initialization(format!(
                "empty screen: {:?}",
                screen_size
            )));
        }
        debug!("Loaded {} with seed {}", rom.filename(), config.seed);

        Ok(SimAtari {
            rom,
            rng: StdRng::seed_from_u64(config.seed as u64),
            action_set: ActionSet::legal(),
            screen_size,
            gray_scale: config.gray_scale,
            score: 0,
            lives: 0,
            frame_count: 0,
            max_frames: config.max_frames,
            ready: false,
        })
    }

    /// Frames played in the current episode.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    // return (height, width) of screen
    pub fn screen_dim(&self) -> (usize, usize) {
        self.screen_size
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }
}

impl Emulator for SimAtari {
    fn action_set(&self) -> ActionSet {
        self.action_set.clone()
    }

    fn reset(&mut self) -> Result<Observation> {
        self.lives = START_LIVES;
        self.score = 0;
        self.frame_count = 0;
        self.ready = true;
        Ok(self.obs())
    }

    fn step(&mut self, action: i32) -> Result<StepOutcome> {
        if !self.ready {
            return Err(AleError::ResetRequired { index: 0 });
        }
        let ix = self
            .action_set
            .index_of(action)
            .ok_or(AleError::InvalidAction { action })?;

        self.frame_count += 1;
        let p = BASE_REWARD_PROBABILITY + REWARD_PROBABILITY_PER_ACTION * ix as f64;
        let reward = if self.rng.gen_bool(p) { 1 } else { 0 };
        let life_loss = self.rng.gen_bool(LIFE_LOSS_PROBABILITY);
        if life_loss {
            self.lives -= 1;
        }
        self.score += reward;

        let terminal = self.is_game_over();
        let truncation = self.frame_count >= self.max_frames;
        if terminal || truncation {
            self.ready = false;
        }
        Ok(StepOutcome {
            reward,
            terminal,
            truncation,
            life_loss,
        })
    }

    fn obs(&mut self) -> Observation {
        let (h, w) = self.screen_size;
        let channels = if self.gray_scale { 1 } else { 3 };
        let mut screen = vec![0u8; h * w * channels];

        // score bar on the top row, a marker for the frame clock on the bottom row
        let bar = (self.score.max(0) as usize).min(w);
        screen[..bar * channels].iter_mut().for_each(|p| *p = 255);
        let col = self.frame_count as usize % w;
        let offset = ((h - 1) * w + col) * channels;
        screen[offset..offset + channels]
            .iter_mut()
            .for_each(|p| *p = 100 + 20 * self.lives.max(0) as u8);
        screen
    }

    fn score(&self) -> i32 {
        self.score
    }
}

impl Drop for SimAtari {
    fn drop(&mut self) {
        debug!("Released {}", self.rom.name());
    }
}

/// Backend constructing [`SimAtari`] instances.
#[derive(Clone, Debug)]
pub struct SimBackend {
    screen_size: (usize, usize),
}

impl Default for SimBackend {
    fn default() -> Self {
        SimBackend {
            screen_size: (SCREEN_HEIGHT, SCREEN_WIDTH),
        }
    }
}

impl SimBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `(height, width)` of the screens of constructed instances.
    pub fn with_screen(mut self, height: usize, width: usize) -> Self {
        self.screen_size = (height, width);
        self
    }
}

impl Backend for SimBackend {
    type Env = SimAtari;
    type VecEnv = VecAtari<SimAtari>;

    fn construct_single(&self, config: &EnvConfig) -> Result<SimAtari> {
        SimAtari::with_screen(config, self.screen_size)
    }

    fn construct_vector(&self, batch_size: usize, config: &EnvConfig) -> Result<VecAtari<SimAtari>> {
        VecAtari::build(batch_size, config, |c| {
            SimAtari::with_screen(c, self.screen_size)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnvConfig {
        EnvConfig::default().max_frames(100).seed(3)
    }

    #[test]
    fn step_before_reset_is_rejected() {
        let mut env = SimAtari::new(&config()).unwrap();
        assert!(matches!(env.step(0), Err(AleError::ResetRequired { .. })));
        env.reset().unwrap();
        assert!(env.step(0).is_ok());
    }

    #[test]
    fn actions_outside_the_set_are_rejected() {
        let mut env = SimAtari::new(&config()).unwrap();
        env.reset().unwrap();
        assert!(matches!(
            env.step(18),
            Err(AleError::InvalidAction { action: 18 })
        ));
        assert_eq!(env.frame_count(), 0);
    }

    #[test]
    fn episodes_are_truncated_at_the_frame_budget() {
        let mut env = SimAtari::new(&config().max_frames(10)).unwrap();
        env.reset().unwrap();
        let mut last = StepOutcome::default();
        let mut steps = 0;
        while !last.is_done() {
            last = env.step(1).unwrap();
            steps += 1;
        }
        assert!(steps <= 10);
        if !last.terminal {
            assert!(last.truncation);
            assert_eq!(steps, 10);
        }
        assert!(matches!(env.step(1), Err(AleError::ResetRequired { .. })));
    }

    #[test]
    fn games_end_when_lives_run_out() {
        let mut env = SimAtari::new(&config().max_frames(1_000_000)).unwrap();
        env.reset().unwrap();
        let mut life_losses = 0;
        loop {
            let outcome = env.step(0).unwrap();
            if outcome.life_loss {
                life_losses += 1;
            }
            if outcome.is_done() {
                assert!(outcome.terminal);
                break;
            }
        }
        assert_eq!(life_losses, START_LIVES);
        assert!(env.is_game_over());
    }

    #[test]
    fn observation_size_follows_capture_mode() {
        let mut gray = SimAtari::with_screen(&config(), (21, 16)).unwrap();
        let mut rgb = SimAtari::with_screen(&config().gray_scale(false), (21, 16)).unwrap();
        assert_eq!(gray.reset().unwrap().len(), 21 * 16);
        assert_eq!(rgb.reset().unwrap().len(), 21 * 16 * 3);
    }

    #[test]
    fn unknown_games_fail_to_load() {
        let backend = SimBackend::new();
        assert!(matches!(
            backend.construct_single(&config().game("space_harrier")),
            Err(AleError::Initialization(_))
        ));
    }
}
