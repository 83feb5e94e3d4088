//! Cooperative cancellation for long simulation runs

use crate::error::{Result, SimulatorError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that asks a running simulation to stop
///
/// Clones share the same flag. The simulator polls it between shots and
/// between operations inside a shot, so a cancelled run stops at the next
/// operation boundary and fails with [`SimulatorError::Cancelled`].
///
/// # Example
///
/// ```
/// use qsim_sim::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every run holding this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SimulatorError::Cancelled)
        } else {
            Ok(())
        }
    }
}
