//! Batch of emulators stepped in parallel.
use crate::{
    action::ActionSet,
    backend::{Emulator, Observation, SlotReset, VecEmulator, VecStep},
    config::EnvConfig,
    error::{AleError, Result},
};
use log::{debug, warn};
use rayon::prelude::*;

/// `N` independent emulators sharing one action space.
///
/// A batched step runs the `N` emulators on the rayon thread pool and returns
/// the results in slot order. Slots are never reset implicitly: a slot whose
/// episode ended rejects further steps until [`VecEmulator::reset_slot`] is
/// called for it.
pub struct VecAtari<E> {
    envs: Vec<E>,
    ready: Vec<bool>,
    action_space: ActionSet,
}

impl<E: Emulator> VecAtari<E> {
    /// Wraps already constructed emulators.
    pub fn new(envs: Vec<E>) -> Result<Self> {
        let action_space = match envs.first() {
            Some(env) => env.action_set(),
            None => {
                return Err(AleError::Initialization(
                    "batch size must be positive".to_string(),
                ))
            }
        };
        if let Some(ix) = envs.iter().position(|e| e.action_set() != action_space) {
            return Err(AleError::Initialization(format!(
                "slot {} does not share the action space of slot 0",
                ix
            )));
        }
        let ready = vec![false; envs.len()];
        debug!("Created a batch of {} environments", envs.len());
        Ok(VecAtari {
            envs,
            ready,
            action_space,
        })
    }

    /// Builds `num_envs` emulators with `make`, seeding slot `i` with `config.seed + i`.
    ///
    /// If any slot fails, the slots built so far are dropped and the error is returned.
    pub fn build<F>(num_envs: usize, config: &EnvConfig, mut make: F) -> Result<Self>
    where
        F: FnMut(&EnvConfig) -> Result<E>,
    {
        if num_envs == 0 {
            return Err(AleError::Initialization(
                "batch size must be positive".to_string(),
            ));
        }
        let envs = (0..num_envs)
            .map(|i| config.for_slot(i).and_then(|c| make(&c)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(envs)
    }

    fn check_actions(&self, actions: &[i32]) -> Result<()> {
        if actions.len() != self.envs.len() {
            warn!(
                "Rejected batch of {} actions for {} environments",
                actions.len(),
                self.envs.len()
            );
            return Err(AleError::BatchSizeMismatch {
                expected: self.envs.len(),
                got: actions.len(),
            });
        }
        if let Some(index) = self.ready.iter().position(|r| !r) {
            return Err(AleError::ResetRequired { index });
        }
        if let Some(&action) = actions.iter().find(|&&a| !self.action_space.contains(a)) {
            return Err(AleError::InvalidAction { action });
        }
        Ok(())
    }
}

impl<E: Emulator> VecEmulator for VecAtari<E> {
    fn batch_size(&self) -> usize {
        self.envs.len()
    }

    fn action_space(&self) -> ActionSet {
        self.action_space.clone()
    }

    fn reset(&mut self) -> Result<Vec<SlotReset>> {
        let resets = self
            .envs
            .par_iter_mut()
            .enumerate()
            .map(|(index, env)| env.reset().map(|obs| SlotReset { index, obs }))
            .collect::<Result<Vec<_>>>()?;
        self.ready.iter_mut().for_each(|r| *r = true);
        Ok(resets)
    }

    fn reset_slot(&mut self, index: usize) -> Result<Observation> {
        let batch_size = self.envs.len();
        let env = self
            .envs
            .get_mut(index)
            .ok_or(AleError::SlotOutOfRange { index, batch_size })?;
        let obs = env.reset()?;
        self.ready[index] = true;
        Ok(obs)
    }

    fn step(&mut self, actions: &[i32]) -> Result<Vec<VecStep>> {
        self.check_actions(actions)?;

        let transitions = self
            .envs
            .par_iter_mut()
            .zip(actions.par_iter())
            .enumerate()
            .map(|(index, (env, &action))| -> Result<VecStep> {
                let outcome = env.step(action)?;
                Ok(VecStep {
                    index,
                    obs: env.obs(),
                    reward: outcome.reward,
                    terminal: outcome.terminal,
                    truncation: outcome.truncation,
                    life_loss: outcome.life_loss,
                    score: env.score(),
                })
            })
            .collect::<Vec<_>>();

        // a slot that finished or failed must be reset, even if the batch fails
        for (index, t) in transitions.iter().enumerate() {
            match t {
                Ok(t) if !t.is_done() => {}
                _ => self.ready[index] = false,
            }
        }
        transitions.into_iter().collect()
    }
}
