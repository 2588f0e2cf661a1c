//! # repcount-logging
//!
//! Installs the `tracing` subscriber used by the `repcount` binary.
//!
//! ## Log Formats
//!
//! - `Pretty` - Multi-line human-readable output
//! - `Json` - Structured JSON lines
//! - `Compact` - Single-line text output
//!
//! `RUST_LOG` takes precedence over the level passed to [`init_tracing`].

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize tracing for the application. Logs go to stderr so that
/// command output on stdout stays clean.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = build_filter(level);

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
