//! Logger verbosity.
use serde::{Deserialize, Serialize};

/// Verbosity of the emulator's logger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoggerMode {
    Info = 0,
    Warning = 1,
    Error = 2,
}

impl Default for LoggerMode {
    fn default() -> Self {
        LoggerMode::Error
    }
}

impl LoggerMode {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            LoggerMode::Info => log::LevelFilter::Info,
            LoggerMode::Warning => log::LevelFilter::Warn,
            LoggerMode::Error => log::LevelFilter::Error,
        }
    }
}

/// Initializes `env_logger` with `mode` as the default filter.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is harmless.
pub fn init_logger(mode: LoggerMode) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(mode.level_filter().to_string()),
    )
    .try_init();
}
