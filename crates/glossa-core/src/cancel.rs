//! Cooperative cancellation.
//!
//! The search engine polls a [`CancelFlag`] between tiers (and periodically
//! inside the fuzzy scan). Front ends usually hand it a
//! [`CancellationToken`] they can trip from the UI thread.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio_util::sync::CancellationToken;

/// Something the engine can ask "should I stop?".
pub trait CancelFlag {
    fn is_cancelled(&self) -> bool;
}

/// Flag that is never set. Use for calls that cannot be aborted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelFlag for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelFlag for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

impl CancelFlag for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: CancelFlag + ?Sized> CancelFlag for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
