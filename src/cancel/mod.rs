//! Cooperative cancellation.
//!
//! A [`CancelSource`] owns the right to cancel; the [`CancelSignal`] it hands
//! out can be cloned freely and observed by any number of operations. A signal
//! transitions at most once from pending to cancelled, broadcasting a
//! [`Cancelled`] reason to every registered listener when it does.
//!
//! Signals are tied to the single-threaded event loop in
//! [`runtime`](crate::runtime) and are therefore neither `Send` nor `Sync`.
//!
//! ```
//! use kitbag::cancel::CancelSource;
//!
//! let source = CancelSource::new();
//! let signal = source.signal();
//! assert!(signal.check().is_ok());
//!
//! source.cancel_with("shutting down");
//! assert_eq!(signal.check().unwrap_err().reason(), "shutting down");
//!
//! // Only the first cancellation counts.
//! assert!(!source.cancel());
//! ```

mod signal;

use std::io;
use std::sync::Arc;

pub use signal::{CancelSignal, CancelSource, Cancellation, Subscription};

const DEFAULT_REASON: &str = "the operation was cancelled";

/// The error produced when a cancellation signal fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{reason}")]
pub struct Cancelled {
    reason: Arc<str>,
}

impl Cancelled {
    /// Create a cancellation with the given reason.
    pub fn new(reason: impl Into<Arc<str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason the signal was cancelled with.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Default for Cancelled {
    fn default() -> Self {
        Self::new(DEFAULT_REASON)
    }
}

impl From<&str> for Cancelled {
    fn from(reason: &str) -> Self {
        Self::new(reason)
    }
}

impl From<String> for Cancelled {
    fn from(reason: String) -> Self {
        Self::new(reason)
    }
}

impl From<Cancelled> for io::Error {
    fn from(err: Cancelled) -> Self {
        crate::time::utils::cancelled_err(err.to_string())
    }
}
