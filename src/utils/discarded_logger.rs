// src/utils/discarded_logger.rs
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{debug, warn};

/// Optional side log of input rows dropped before they reach the matcher.
pub struct DiscardedRowLogger {
    file: Mutex<Option<File>>,
}

impl DiscardedRowLogger {
    pub fn new() -> Self {
        Self {
            file: Mutex::new(None),
        }
    }

    pub fn init(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        match self.file.lock() {
            Ok(mut guard) => *guard = Some(file),
            Err(poisoned) => *poisoned.into_inner() = Some(file),
        }

        debug!("Initialized discarded row logger at {:?}", path);
        Ok(())
    }

    /// Record one dropped row. A no-op until `init` has been called.
    pub fn log_row(&self, table: &str, row: usize, reason: &str, text: &str) {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(file) = guard.as_mut() {
            // Format: [TABLE] | ROW | REASON | TEXT
            let written = writeln!(
                file,
                "[{}] | {} | {} | {}",
                table,
                row,
                reason,
                text.replace('\n', " ")
            );
            if let Err(e) = written {
                warn!("Failed to log discarded {} row {}: {}", table, row, e);
            }
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        match self.file.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(file) => file.flush(),
                None => Ok(()),
            },
            Err(_) => Ok(()),
        }
    }
}

impl Default for DiscardedRowLogger {
    fn default() -> Self {
        Self::new()
    }
}

// Create a global singleton instance
lazy_static::lazy_static! {
    pub static ref DISCARDED_ROWS: DiscardedRowLogger = DiscardedRowLogger::new();
}
