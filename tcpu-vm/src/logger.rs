//! Process-wide diagnostics, gated by a level read once from `CPU_LOG_LEVEL`.
//!
//! The machine and assembler never call into `tracing` directly; they go
//! through [`debug`]/[`info`]/[`err`]/[`abort`] here, which keeps the level
//! vocabulary to the four names this crate's contract actually promises
//! instead of `tracing`'s full five-level `Level` set.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;

/// The four severities this crate's logging contract distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Verbose, high-volume diagnostics.
    Debug,
    /// Routine progress messages.
    Info,
    /// A recoverable problem worth surfacing.
    Err,
    /// A fatal problem; logging at this level terminates the process.
    Abort,
}

impl LogLevel {
    fn from_env_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "err" | "error" => Some(Self::Err),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }

    fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Err => LevelFilter::ERROR,
            Self::Abort => LevelFilter::ERROR,
        }
    }
}

/// Read and parse `CPU_LOG_LEVEL`. Unset or unrecognized values default to
/// [`LogLevel::Info`], per the crate's documented contract.
fn level_from_env() -> LogLevel {
    std::env::var("CPU_LOG_LEVEL")
        .ok()
        .and_then(|v| LogLevel::from_env_str(&v))
        .unwrap_or(LogLevel::Info)
}

static INIT: OnceLock<LogLevel> = OnceLock::new();

/// Install the `tracing-subscriber` backend, reading the minimum level from
/// `CPU_LOG_LEVEL` the first time this is called. Idempotent: later calls are
/// no-ops, matching the once-per-process contract.
pub fn init() -> LogLevel {
    *INIT.get_or_init(|| {
        let level = level_from_env();
        let _ = tracing_subscriber::fmt()
            .with_max_level(level.as_level_filter())
            .with_target(false)
            .try_init();
        level
    })
}

/// The level this process was configured with. Initializes the subscriber
/// on first call if nothing has done so yet.
pub fn level() -> LogLevel {
    init()
}

/// Emit a debug-level diagnostic.
pub fn debug(msg: impl std::fmt::Display) {
    init();
    tracing::debug!("{msg}");
}

/// Emit an info-level diagnostic.
pub fn info(msg: impl std::fmt::Display) {
    init();
    tracing::info!("{msg}");
}

/// Emit an error-level diagnostic.
pub fn err(msg: impl std::fmt::Display) {
    init();
    tracing::error!("{msg}");
}

/// Emit a fatal diagnostic and terminate the process once output is flushed.
///
/// The library core itself never calls this on a `CoreError` (see
/// `error.rs`) — it exists for the canonical CLI/test-harness integration
/// described by the crate's external contract.
pub fn abort(msg: impl std::fmt::Display) -> ! {
    init();
    tracing::error!("{msg}");
    std::process::exit(1)
}
