//! Logging setup
//!
//! The binary draws on the alternate screen, so logs go to a file.
//!
//! ## Environment Variables
//!
//! 1. **`JUMPMARK_LOG`** (highest priority) - filter directives for jumpmark
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn`
//!
//! The log file defaults to `<temp dir>/jumpmark.log`; override it with
//! `JUMPMARK_LOG_FILE`.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Resolve the filter from `JUMPMARK_LOG`, then `RUST_LOG`, then `warn`
fn create_filter() -> Result<EnvFilter> {
    let directives = env::var("JUMPMARK_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    EnvFilter::try_new(&directives)
        .map_err(|e| Error::Message(format!("invalid log filter '{}': {}", directives, e)))
}

/// Where the log file goes
pub fn log_file_path() -> PathBuf {
    env::var_os("JUMPMARK_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("jumpmark.log"))
}

/// Initialize file logging.
///
/// Returns the log file path. Calling it again after a subscriber is set is
/// not an error.
pub fn init() -> Result<PathBuf> {
    let path = log_file_path();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(create_filter()?)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(path)
}

/// Initialize stdout logging for tests. Safe to call from every test.
pub fn test() {
    if let Ok(filter) = create_filter() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}
