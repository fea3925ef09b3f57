//! CLI command handlers
//!
//! Handlers for `cmakegen generate`, `cmakegen clear` and `cmakegen show`,
//! kept out of main.rs so they can be exercised from tests.

pub mod generate;
pub mod log;

use crate::config::Settings;
use crate::store::InvocationLog;
use std::path::Path;

/// The log named on the command line, or the configured one.
pub fn open_log(cli_path: Option<&Path>, settings: &Settings) -> InvocationLog {
    match cli_path {
        Some(path) => InvocationLog::new(path),
        None => InvocationLog::new(&settings.log_path),
    }
}
