//! Cooperative cancellation for compression calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::CompressError;

/// Checked by the compressors between encodes and between PDF pages.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);
}

/// Shared flag; clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Bail out with `Cancelled` once cancellation has been requested
pub fn ensure_active(cancel: &dyn Cancellable) -> Result<(), CompressError> {
    if cancel.is_cancelled() {
        return Err(CompressError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(ensure_active(&observer).is_ok());
        token.cancel();
        assert!(observer.is_cancelled());
        assert!(matches!(ensure_active(&observer), Err(CompressError::Cancelled)));
    }
}
