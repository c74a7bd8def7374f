// utils/interrupt.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;

use crate::error::{Error, Result};

/// Ctrl-C flag shared with the pipeline, which polls it between batches.
#[derive(Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the process-wide Ctrl-C handler. Can only succeed once per
    /// process.
    pub fn install(&self) -> Result<()> {
        let raised = Arc::clone(&self.raised);
        ctrlc::set_handler(move || {
            if raised.swap(true, Ordering::SeqCst) {
                // Second Ctrl-C: the user wants out now
                std::process::exit(130);
            }
            eprintln!("\nInterrupt received, finishing the current batch...");
            warn!("Interrupt received, finishing the current batch");
        })
        .map_err(|e| Error::async_err(format!("Failed to install Ctrl-C handler: {}", e)))
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.raised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_handles_see_the_flag() {
        let flag = InterruptFlag::new();
        let shared = flag.shared();
        assert!(!flag.is_raised());
        shared.store(true, Ordering::SeqCst);
        assert!(flag.is_raised());
    }
}
