//! Logging for an editor session
//!
//! Two outputs are set up: the terminal, which only sees `Info` and above with
//! coloured level tags so the editor shell stays readable, and the session log
//! file, which gets every record down to the requested level in plain text
//! with timestamps and targets.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::fmt;

use colored::{ColoredString, Colorize};
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Most verbose level printed to the terminal.
const TERMINAL_LEVEL: LevelFilter = LevelFilter::Info;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a file log level of `INFO` or more verbose, found `{0}`")]
    InvalidFileLogLevel(log::LevelFilter),

    #[error("Could not open the session log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("A logger has already been set for this execution: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this editor session.
///
/// `file_level` sets what reaches the session log file and must be at least as
/// verbose as `Info`, since that's what the terminal shows.
///
/// Must only be called once per execution.
pub fn logger_init(
    file_level: LevelFilter,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if file_level < TERMINAL_LEVEL {
        return Err(LoggerInitError::InvalidFileLogLevel(file_level))
    }

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    let terminal = fern::Dispatch::new()
        .level(TERMINAL_LEVEL)
        .format(|out, message, record| {
            match record.level() {
                log::Level::Info => out.finish(format_args!("{}", message)),
                l => out.finish(format_args!("{} {}", level_tag(l), message))
            }
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                file_line(
                    session::get_elapsed_seconds(),
                    record.level(),
                    record.target(),
                    message
                )
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(file_level)
        .level_for("rustyline", LevelFilter::Info)
        .chain(terminal)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Editor session started at {}", session::get_epoch());
    info!("    Session directory: {:?}", session.session_root);
    info!("    Saved points directory: {:?}", session.saves_root);
    info!("    Log file ({:?}): {:?}", file_level, session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// A record as written to the log file.
fn file_line<M: fmt::Display>(
    elapsed_s: f64,
    level: log::Level,
    target: &str,
    message: M
) -> String {
    format!("[{:10.6} {:5}] {}: {}", elapsed_s, level, target, message)
}

/// Coloured tag shown before terminal messages
fn level_tag(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "trace:".dimmed().italic(),
        log::Level::Debug => "debug:".dimmed(),
        log::Level::Info  => "info:".normal(),
        log::Level::Warn  => "warning:".yellow(),
        log::Level::Error => "error:".red().bold()
    }
}
