//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The level comes from `--log-level`, then the `REGION_GATE_LOG`
//! environment variable, then defaults to `info`. Logs go to stderr so that
//! stdout carries only the command's answer.

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::fmt;

pub(crate) const LOG_ENV_VAR: &str = "REGION_GATE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
pub(crate) fn init_logging(cli_level: Option<LogLevel>) {
    let env_level = std::env::var(LOG_ENV_VAR).ok();

    fmt()
        .with_max_level(resolve_level(cli_level, env_level.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    match cli_level {
        Some(level) => level.into(),
        None => env_level.and_then(parse_level_str).unwrap_or(Level::INFO),
    }
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
