//! File logging.
//!
//! The terminal belongs to the UI, so log records go to `drift.log` in the
//! platform data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Env, Target, WriteStyle};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DRIFT_LOG";

const LOG_FILE: &str = "drift.log";

/// Install the logger. Returns the log file path, or None if logging is off.
pub fn init() -> Option<PathBuf> {
    let dirs = drift_config::project_dirs()?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).ok()?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    Builder::from_env(Env::new().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()
        .ok()?;

    Some(path)
}
