//! Structured logging initialization for the bags CLI.
//!
//! All log output goes to stderr so that stdout stays reserved for command
//! results (text or JSON).

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// JSON lines, one event per line.
    Json,
    /// Colored multi-field output for an interactive terminal.
    Pretty,
    /// Plain single-line output for pipes and log files.
    Compact,
}

impl LogStyle {
    /// Pick a style from the output mode and whether stderr is a terminal.
    #[must_use]
    pub const fn select(json: bool, stderr_is_tty: bool) -> Self {
        match (json, stderr_is_tty) {
            (true, _) => Self::Json,
            (false, true) => Self::Pretty,
            (false, false) => Self::Compact,
        }
    }
}

/// Filter directive for the given verbosity flags.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "bags=error";
    }
    match verbose {
        0 => "bags=info",
        1 => "bags=debug",
        _ => "bags=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// # Arguments
///
/// * `json` - If true, output structured JSON logs for machine consumption
/// * `verbose` - Verbosity level: 0 = info, 1 = debug, 2+ = trace
/// * `quiet` - If true, suppress everything but errors
///
/// # Environment Variables
///
/// * `RUST_LOG` - Override default filter (e.g., "bags=debug")
///
/// | Mode | TTY | Output |
/// |------|-----|--------|
/// | JSON | any | JSON lines to stderr |
/// | Human | yes | Pretty colored output to stderr |
/// | Human | no | Compact plain output to stderr |
///
/// Decode failures during batch loads are logged at `warn`, so they show
/// up at the default verbosity.
pub fn init_logging(json: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let base = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    match LogStyle::select(json, io::stderr().is_terminal()) {
        LogStyle::Json => registry.with(base.json().with_target(true)).init(),
        LogStyle::Pretty => registry.with(base.with_target(false)).init(),
        LogStyle::Compact => registry
            .with(base.with_ansi(false).with_target(false).compact())
            .init(),
    }
}
