//! Drivers for Arcade Learning Environment style backends.
//!
//! [`SingleEnvDriver`] steps one environment in a random-action loop;
//! [`VectorEnvDriver`] steps a batch of environments with one batched call per
//! iteration. Both measure throughput and enforce the reset contract: once an
//! environment reports `terminal` or `truncation`, it must be reset before it
//! is stepped again.
//!
//! Backends implement [`Backend`], [`Emulator`] and [`VecEmulator`].
//! [`VecAtari`] vectorizes any [`Emulator`] over the rayon thread pool, and
//! [`SimBackend`] provides a seeded synthetic emulator that needs no ROMs.
//!
//! ```no_run
//! use ale_driver::{EnvConfig, SimBackend, VectorEnvDriver};
//!
//! # fn main() -> ale_driver::Result<()> {
//! let config = EnvConfig::default().game("breakout").seed(42);
//! let mut driver = VectorEnvDriver::initialize(&SimBackend::new(), 16, &config)?;
//! println!("{}", driver.action_space());
//! driver.reset()?;
//! let report = driver.run(20_000)?;
//! println!("{:?}", report.rewards);
//! println!("FPS: {:.2}", report.fps());
//! # Ok(())
//! # }
//! ```
mod action;
mod backend;
mod config;
pub mod driver;
mod error;
mod logger;
mod parallel;
mod rom;
pub mod sim;

pub use action::{ActionSet, AleAction};
pub use backend::{Backend, Emulator, Observation, SlotReset, StepOutcome, VecEmulator, VecStep};
pub use config::{EnvConfig, RunConfig};
pub use driver::{RunReport, SingleEnvDriver, SlotState, VecRunReport, VectorEnvDriver};
pub use error::{AleError, Result};
pub use logger::{init_logger, LoggerMode};
pub use parallel::VecAtari;
pub use rom::BundledRom;
pub use sim::{SimAtari, SimBackend};
