use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{MgcError, Result};

/// Shared flag for cooperative cancellation.
///
/// Clones share the same flag; the pipeline polls it between stages and
/// between decomposition layers.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns `Err(Cancelled)` once `cancel` has been called.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(MgcError::Cancelled)
        } else {
            Ok(())
        }
    }
}
