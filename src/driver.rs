//! Drivers running random-action loops over a [`Backend`](crate::Backend).
//!
//! Both drivers own their environment handles, an explicitly seeded random
//! generator for action sampling, and the state of every slot:
//!
//! ```text
//! Uninitialized --reset--> Ready --step--> Ready
//!                            ^               |
//!                            |         terminal/truncation
//!                          reset             v
//!                            +----------- Done
//! ```
//!
//! Stepping a slot that is not `Ready` fails with
//! [`AleError::ResetRequired`](crate::AleError::ResetRequired).
mod single;
mod vector;
pub use single::{RunReport, SingleEnvDriver};
pub use vector::{VecRunReport, VectorEnvDriver};

/// State of one environment slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Constructed, never reset.
    Uninitialized,
    /// Reset, or stepped without ending the episode.
    Ready,
    /// The last step was terminal or truncated.
    Done,
}

impl SlotState {
    pub fn is_ready(&self) -> bool {
        *self == SlotState::Ready
    }
}
