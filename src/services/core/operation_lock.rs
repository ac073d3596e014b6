//! Single-flight guard around history mutations.
//!
//! `HistoryStore` rewrites its whole log on every save or delete, so two
//! concurrent runs would lose one another's updates. Every mutating command
//! holds this lock for the full analyze-and-save (or delete) cycle.

use crate::types::errors::CommandError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

const DEFAULT_WAIT: Duration = Duration::from_millis(50);

pub struct OperationLock {
    lock: Arc<Mutex<()>>,
    wait: Duration,
}

impl OperationLock {
    pub fn new() -> Self {
        Self::with_wait(DEFAULT_WAIT)
    }

    pub fn with_wait(wait: Duration) -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
            wait,
        }
    }

    /// Wait up to the configured duration for the lock.
    /// Fails with `CommandError::Busy` if another run still holds it.
    pub async fn acquire(&self) -> Result<OwnedMutexGuard<()>, CommandError> {
        match tokio::time::timeout(self.wait, self.lock.clone().lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => Err(CommandError::Busy(
                "Operation in progress. Please wait.".to_string(),
            )),
        }
    }
}

impl Default for OperationLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/operation_lock_tests.rs"]
mod tests;
