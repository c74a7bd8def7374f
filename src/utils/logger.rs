use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{info, LevelFilter};

use crate::error::Result;

/// Log file for a run of `name` started now, e.g. `logs/discours_20240101_120000.log`.
pub fn log_file_path(log_dir: &Path, name: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("{}_{}.log", name, timestamp))
}

/// Route the `log` macros to a timestamped file under `log_dir`.
///
/// Returns the log file path. Fails if a logger is already installed.
pub fn init_file_logger(log_dir: &Path, name: &str, level: LevelFilter) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_file_path(log_dir, name);
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init()
        .map_err(|e| crate::error::Error::config(format!("Logger already initialised: {}", e)))?;

    info!("Logging at level {:?} to {}", level, path.display());
    Ok(path)
}
