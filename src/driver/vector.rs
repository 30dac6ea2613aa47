use super::SlotState;
use crate::{
    action::ActionSet,
    backend::{Backend, SlotReset, VecEmulator, VecStep},
    config::EnvConfig,
    error::{AleError, Result},
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};

/// Summary of a [`VectorEnvDriver::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct VecRunReport {
    /// Batched steps executed.
    pub iterations: usize,

    pub batch_size: usize,

    /// Cumulative reward of every slot over the run.
    pub rewards: Vec<i64>,

    /// Episodes that ended in every slot during the run.
    pub episodes: Vec<usize>,

    /// Wall-clock time from just before the first step to just after the last.
    pub elapsed: Duration,
}

impl VecRunReport {
    /// Frames over all slots, `iterations * batch_size`.
    pub fn frames(&self) -> usize {
        self.iterations * self.batch_size
    }

    /// Frames per second over all slots.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Drives a batch of environment handles with one batched step per iteration.
pub struct VectorEnvDriver<V: VecEmulator> {
    envs: V,
    action_space: ActionSet,
    rng: StdRng,
    states: Vec<SlotState>,
    validate_actions: bool,
}

impl<V: VecEmulator> VectorEnvDriver<V> {
    /// Constructs `batch_size` environments sharing one action space.
    pub fn initialize<B>(backend: &B, batch_size: usize, config: &EnvConfig) -> Result<Self>
    where
        B: Backend<VecEnv = V>,
    {
        if batch_size == 0 {
            return Err(AleError::Initialization(
                "batch size must be positive".to_string(),
            ));
        }
        let envs = backend.construct_vector(batch_size, config)?;
        if envs.batch_size() != batch_size {
            return Err(AleError::Initialization(format!(
                "backend built {} environments, {} requested",
                envs.batch_size(),
                batch_size
            )));
        }
        Ok(Self::new(envs, config.seed as u64))
    }

    /// Wraps an existing batch; `seed` seeds action sampling.
    pub fn new(envs: V, seed: u64) -> Self {
        let action_space = envs.action_space();
        let states = vec![SlotState::Uninitialized; envs.batch_size()];
        VectorEnvDriver {
            envs,
            action_space,
            rng: StdRng::seed_from_u64(seed),
            states,
            validate_actions: true,
        }
    }

    /// Enables or disables action membership checks before dispatch.
    pub fn validate_actions(mut self, v: bool) -> Self {
        self.validate_actions = v;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.states.len()
    }

    pub fn action_space(&self) -> &ActionSet {
        &self.action_space
    }

    pub fn states(&self) -> &[SlotState] {
        &self.states
    }

    pub fn envs(&self) -> &V {
        &self.envs
    }

    /// Resets every slot.
    pub fn reset(&mut self) -> Result<Vec<SlotReset>> {
        let resets = self.envs.reset()?;
        self.states.iter_mut().for_each(|s| *s = SlotState::Ready);
        Ok(resets)
    }

    /// Resets one slot.
    pub fn reset_slot(&mut self, index: usize) -> Result<()> {
        if index >= self.states.len() {
            return Err(AleError::SlotOutOfRange {
                index,
                batch_size: self.states.len(),
            });
        }
        self.envs.reset_slot(index)?;
        self.states[index] = SlotState::Ready;
        Ok(())
    }

    /// Steps every slot; `actions[i]` drives slot `i`.
    ///
    /// The batch is checked before dispatch: a wrong length, a slot that is not
    /// ready or, if enabled, an action outside the action space rejects the
    /// whole call and no slot advances.
    pub fn step(&mut self, actions: &[i32]) -> Result<Vec<VecStep>> {
        if actions.len() != self.states.len() {
            warn!(
                "Rejected batch of {} actions for {} environments",
                actions.len(),
                self.states.len()
            );
            return Err(AleError::BatchSizeMismatch {
                expected: self.states.len(),
                got: actions.len(),
            });
        }
        if let Some(index) = self.states.iter().position(|s| !s.is_ready()) {
            return Err(AleError::ResetRequired { index });
        }
        if self.validate_actions {
            if let Some(&action) = actions.iter().find(|&&a| !self.action_space.contains(a)) {
                return Err(AleError::InvalidAction { action });
            }
        }

        let results = match self.envs.step(actions) {
            Ok(results) => results,
            Err(e) => {
                // slots may have advanced or finished before the failure
                self.mark_all_done();
                return Err(e);
            }
        };
        if results.len() != actions.len() {
            self.mark_all_done();
            return Err(AleError::Backend(format!(
                "{} results for {} actions",
                results.len(),
                actions.len()
            )));
        }
        if let Some((i, r)) = results.iter().enumerate().find(|(i, r)| r.index != *i) {
            self.mark_all_done();
            return Err(AleError::Backend(format!(
                "result {} reports slot {}",
                i, r.index
            )));
        }
        for r in results.iter().filter(|r| r.is_done()) {
            self.states[r.index] = SlotState::Done;
        }
        Ok(results)
    }

    fn mark_all_done(&mut self) {
        self.states.iter_mut().for_each(|s| *s = SlotState::Done);
    }

    /// Resets every slot whose episode ended. Returns the reset slot indices.
    pub fn reset_finished(&mut self) -> Result<Vec<usize>> {
        let finished = self
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == SlotState::Done)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        for &i in finished.iter() {
            self.reset_slot(i)?;
        }
        Ok(finished)
    }

    /// Draws one uniformly random action per slot.
    pub fn sample_actions(&mut self) -> Vec<i32> {
        let n = self.states.len();
        (0..n)
            .map(|_| self.action_space.sample(&mut self.rng))
            .collect()
    }

    /// Runs `iterations` batched steps with random actions. Every slot whose
    /// episode ends is reset before the next batched step.
    pub fn run(&mut self, iterations: usize) -> Result<VecRunReport> {
        if self.states.iter().any(|s| *s == SlotState::Uninitialized) {
            self.reset()?;
        } else {
            self.reset_finished()?;
        }
        let n = self.states.len();
        let mut rewards = vec![0i64; n];
        let mut episodes = vec![0usize; n];

        info!("Running {} iterations over {} environments", iterations, n);
        let start = Instant::now();
        for _ in 0..iterations {
            self.reset_finished()?;
            let actions = self.sample_actions();
            let results = self.step(&actions)?;
            for r in results.iter() {
                rewards[r.index] += r.reward as i64;
                if let Some(score) = r.episode_score() {
                    episodes[r.index] += 1;
                    debug!("Environment {} finished an episode with score {}", r.index, score);
                }
            }
        }
        let elapsed = start.elapsed();
        self.reset_finished()?;

        let report = VecRunReport {
            iterations,
            batch_size: n,
            rewards,
            episodes,
            elapsed,
        };
        info!(
            "{} frames in {:?}, FPS: {:.2}",
            report.frames(),
            elapsed,
            report.fps()
        );
        Ok(report)
    }
}
