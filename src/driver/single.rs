use super::SlotState;
use crate::{
    action::ActionSet,
    backend::{Backend, Emulator, Observation, StepOutcome},
    config::EnvConfig,
    error::{AleError, Result},
};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};

/// Summary of a [`SingleEnvDriver::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Steps executed.
    pub steps: usize,

    /// Episodes that ended during the run.
    pub episodes: usize,

    /// Sum of rewards over the run.
    pub total_reward: i64,

    /// Wall-clock time from just before the first step to just after the last.
    pub elapsed: Duration,
}

impl RunReport {
    /// Steps per second.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.steps as f64 / secs
        } else {
            0.0
        }
    }
}

/// Drives one environment handle.
pub struct SingleEnvDriver<E: Emulator> {
    env: E,
    action_set: ActionSet,
    rng: StdRng,
    state: SlotState,
    validate_actions: bool,
}

impl<E: Emulator> SingleEnvDriver<E> {
    /// Constructs the environment and fetches its action set.
    pub fn initialize<B>(backend: &B, config: &EnvConfig) -> Result<Self>
    where
        B: Backend<Env = E>,
    {
        let env = backend.construct_single(config)?;
        Ok(Self::new(env, config.seed as u64))
    }

    /// Wraps an existing handle; `seed` seeds action sampling.
    pub fn new(env: E, seed: u64) -> Self {
        let action_set = env.action_set();
        SingleEnvDriver {
            env,
            action_set,
            rng: StdRng::seed_from_u64(seed),
            state: SlotState::Uninitialized,
            validate_actions: true,
        }
    }

    /// Enables or disables action membership checks before dispatch.
    pub fn validate_actions(mut self, v: bool) -> Self {
        self.validate_actions = v;
        self
    }

    pub fn action_set(&self) -> &ActionSet {
        &self.action_set
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn reset(&mut self) -> Result<Observation> {
        let obs = self.env.reset()?;
        self.state = SlotState::Ready;
        Ok(obs)
    }

    pub fn step(&mut self, action: i32) -> Result<StepOutcome> {
        if !self.state.is_ready() {
            return Err(AleError::ResetRequired { index: 0 });
        }
        if self.validate_actions && !self.action_set.contains(action) {
            return Err(AleError::InvalidAction { action });
        }
        let outcome = self.env.step(action)?;
        if outcome.is_done() {
            self.state = SlotState::Done;
        }
        Ok(outcome)
    }

    /// Runs `budget` steps with uniformly random actions, resetting whenever an
    /// episode ends. Resets the environment first if it is not ready.
    ///
    /// The clock stops after the last step, so a reset following it is not timed.
    pub fn run(&mut self, budget: usize) -> Result<RunReport> {
        if !self.state.is_ready() {
            self.reset()?;
        }
        let mut episodes = 0;
        let mut total_reward = 0i64;

        info!("Running {} steps", budget);
        let start = Instant::now();
        for _ in 0..budget {
            if !self.state.is_ready() {
                self.reset()?;
            }
            let action = self.action_set.sample(&mut self.rng);
            let outcome = self.step(action)?;
            total_reward += outcome.reward as i64;
            if outcome.is_done() {
                episodes += 1;
                debug!(
                    "Episode {} ended with score {} (terminal: {}, truncation: {})",
                    episodes,
                    self.env.score(),
                    outcome.terminal,
                    outcome.truncation
                );
            }
        }
        let elapsed = start.elapsed();
        if !self.state.is_ready() {
            self.reset()?;
        }

        let report = RunReport {
            steps: budget,
            episodes,
            total_reward,
            elapsed,
        };
        info!("{} steps in {:?}, FPS: {:.2}", budget, elapsed, report.fps());
        Ok(report)
    }
}
