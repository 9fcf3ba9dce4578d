use core::future::Future;

use super::{deadline, Deadline, DeadlineOptions};
use crate::time::Duration;

/// Extend `Future` with time-based operations.
pub trait FutureExt: Future {
    /// Return an error if a future does not complete within a given time span.
    ///
    /// When the deadline is exceeded, the future will be dropped together with
    /// the returned `Deadline` and destructors will be run.
    ///
    /// # Example
    ///
    /// ```
    /// use kitbag::prelude::*;
    /// use kitbag::future::{delay, DelayOptions};
    /// use kitbag::time::Duration;
    ///
    /// kitbag::runtime::block_on(async {
    ///     let res = delay(Duration::from_millis(100), DelayOptions::new())
    ///         .deadline(Duration::from_millis(10))
    ///         .await;
    ///     assert!(res.is_err());
    /// });
    /// ```
    fn deadline<D>(self, timeout: D) -> Deadline<Self>
    where
        Self: Sized,
        D: Into<Duration>,
    {
        deadline(self, timeout, DeadlineOptions::default())
    }

    /// Like [`FutureExt::deadline`], additionally expiring early when the
    /// signal in `options` is cancelled.
    fn deadline_with<D>(self, timeout: D, options: DeadlineOptions) -> Deadline<Self>
    where
        Self: Sized,
        D: Into<Duration>,
    {
        deadline(self, timeout, options)
    }
}

impl<T> FutureExt for T where T: Future {}
