//! Interface between drivers and an emulation backend.
//!
//! A backend constructs environment handles. Handles own all emulator state;
//! drivers only see what these traits expose. Dropping a handle releases it.
use crate::{action::ActionSet, config::EnvConfig, error::Result};

/// Screen buffer of an environment.
pub type Observation = Vec<u8>;

/// Outcome of a single environment step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub reward: i32,

    /// The game ended.
    pub terminal: bool,

    /// The episode hit the frame budget.
    pub truncation: bool,

    /// A life was lost during the step.
    pub life_loss: bool,
}

impl StepOutcome {
    /// Terminated or truncated.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.terminal || self.truncation
    }
}

/// Outcome of one slot of a batched step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VecStep {
    /// Slot index, equal to the position of the action in the submitted batch.
    pub index: usize,
    pub obs: Observation,
    pub reward: i32,
    pub terminal: bool,
    pub truncation: bool,
    pub life_loss: bool,

    /// Score of the slot's current episode, this step included.
    pub score: i32,
}

impl VecStep {
    /// Terminated or truncated.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.terminal || self.truncation
    }

    /// Final score of the episode, if this step ended it.
    pub fn episode_score(&self) -> Option<i32> {
        if self.is_done() {
            Some(self.score)
        } else {
            None
        }
    }
}

/// Outcome of resetting one slot of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotReset {
    pub index: usize,
    pub obs: Observation,
}

/// A single running emulation instance.
pub trait Emulator: Send {
    /// Legal actions of the game. Returns the same set for the lifetime of the handle.
    fn action_set(&self) -> ActionSet;

    /// Restarts the episode and returns the first observation.
    fn reset(&mut self) -> Result<Observation>;

    /// Advances one frame with `action`.
    fn step(&mut self, action: i32) -> Result<StepOutcome>;

    /// Captures the current screen.
    fn obs(&mut self) -> Observation;

    /// Score of the current episode.
    fn score(&self) -> i32;
}

/// A batch of emulation instances stepped together.
pub trait VecEmulator {
    fn batch_size(&self) -> usize;

    /// Action space shared by every slot.
    fn action_space(&self) -> ActionSet;

    /// Resets every slot. The result is ordered by slot index.
    fn reset(&mut self) -> Result<Vec<SlotReset>>;

    /// Resets slot `index` only.
    fn reset_slot(&mut self, index: usize) -> Result<Observation>;

    /// Advances every slot by one frame. `actions[i]` drives slot `i` and
    /// produces the `i`-th result. `actions.len()` must equal the batch size.
    fn step(&mut self, actions: &[i32]) -> Result<Vec<VecStep>>;
}

/// Constructs environment handles.
pub trait Backend {
    type Env: Emulator;
    type VecEnv: VecEmulator;

    fn construct_single(&self, config: &EnvConfig) -> Result<Self::Env>;

    fn construct_vector(&self, batch_size: usize, config: &EnvConfig) -> Result<Self::VecEnv>;
}
