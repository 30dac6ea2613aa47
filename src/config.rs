//! Configuration of environments and driver runs.
use crate::{
    error::{AleError, Result},
    logger::LoggerMode,
    rom::BundledRom,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of a single environment.
///
/// A vectorized environment applies the same configuration to every slot,
/// seeding slot `i` with `seed + i`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct EnvConfig {
    /// Name of the game, see [`BundledRom`].
    pub game: String,

    /// Frame budget of an episode. An episode reaching it is truncated.
    pub max_frames: u32,

    /// Capture the screen in grayscale (one byte per pixel) instead of RGB.
    pub gray_scale: bool,

    /// Random seed of the emulator.
    pub seed: i32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            game: "breakout".to_string(),
            max_frames: 108_000,
            gray_scale: true,
            seed: 42,
        }
    }
}

impl EnvConfig {
    /// Sets the name of the game.
    pub fn game(mut self, game: impl Into<String>) -> Self {
        self.game = game.into();
        self
    }

    /// Sets the frame budget of an episode.
    pub fn max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Sets the screen capture mode.
    pub fn gray_scale(mut self, gray_scale: bool) -> Self {
        self.gray_scale = gray_scale;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the configuration and returns the ROM it names.
    pub fn validate(&self) -> Result<BundledRom> {
        let rom = BundledRom::from_name(&self.game)?;
        if self.max_frames == 0 {
            return Err(AleError::Initialization(
                "max_frames must be positive".to_string(),
            ));
        }
        if self.seed < 0 {
            return Err(AleError::Initialization(format!(
                "seed must be non-negative, got {}",
                self.seed
            )));
        }
        Ok(rom)
    }

    /// Configuration of slot `index` in a batch: same settings, seed offset by `index`.
    pub fn for_slot(&self, index: usize) -> Result<Self> {
        let seed = i32::try_from(index)
            .ok()
            .and_then(|ix| self.seed.checked_add(ix))
            .ok_or_else(|| {
                AleError::Initialization(format!(
                    "seed {} overflows for slot {}",
                    self.seed, index
                ))
            })?;
        Ok(self.clone().seed(seed))
    }

    /// Constructs [`EnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_yaml(path)
    }

    /// Saves [`EnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_yaml(self, path)
    }
}

/// Configuration of a driver run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct RunConfig {
    /// Step budget. For vectorized runs, the number of batched steps.
    pub steps: usize,

    /// Number of environments in a vectorized run.
    pub num_envs: usize,

    /// Reject actions outside the action set before they reach the backend.
    pub validate_actions: bool,

    /// Verbosity of the logger.
    pub logger_mode: LoggerMode,

    /// Environment configuration.
    pub env: EnvConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 20_000,
            num_envs: 16,
            validate_actions: true,
            logger_mode: LoggerMode::Error,
            env: EnvConfig::default(),
        }
    }
}

impl RunConfig {
    /// Sets the step budget.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the number of environments of a vectorized run.
    pub fn num_envs(mut self, num_envs: usize) -> Self {
        self.num_envs = num_envs;
        self
    }

    /// Enables or disables action validation in drivers.
    pub fn validate_actions(mut self, validate_actions: bool) -> Self {
        self.validate_actions = validate_actions;
        self
    }

    /// Sets the logger verbosity.
    pub fn logger_mode(mut self, logger_mode: LoggerMode) -> Self {
        self.logger_mode = logger_mode;
        self
    }

    /// Sets the environment configuration.
    pub fn env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }

    /// Constructs [`RunConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_yaml(path)
    }

    /// Saves [`RunConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_yaml(self, path)
    }
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = File::open(path)?;
    let rdr = BufReader::new(file);
    let b = serde_yaml::from_reader(rdr)?;
    Ok(b)
}

fn save_yaml<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_yaml::to_string(value)?.as_bytes())?;
    Ok(())
}
