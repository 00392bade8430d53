//! Cooperative cancellation for long traces.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by the integrator between steps.
///
/// Clones share the same flag, so a token handed to a batch can be
/// cancelled from another thread. Rays stop at their next step boundary
/// with [`Termination::Cancelled`](wavetrace_core::Termination::Cancelled)
/// and keep the states recorded so far.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
