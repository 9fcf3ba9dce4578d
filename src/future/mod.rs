//! Asynchronous values.
//!
//! # Timers and deadlines
//!
//! [`delay`] resolves once a span of time has passed, and [`deadline`] races
//! an operation against such a delay. Both accept a
//! [`CancelSignal`](crate::cancel::CancelSignal) through their options, so a
//! caller can abort the wait remotely.
//!
//! # Cancellation
//!
//! Futures can be cancelled by dropping them before they finish executing. This
//! is useful when we're no longer interested in the result of an operation, as
//! it allows us to stop doing needless work. Timers owned by a dropped
//! [`Delay`] or [`Deadline`] are cleared from the event loop right away.
//!
//! ```
//! use kitbag::cancel::CancelSource;
//! use kitbag::future::{delay, DeadlineOptions, DelayOptions, FutureExt};
//! use kitbag::time::Duration;
//!
//! kitbag::runtime::block_on(async {
//!     let source = CancelSource::new();
//!     let options = DeadlineOptions::new().signal(&source.signal());
//!     source.cancel();
//!
//!     let err = delay(Duration::from_millis(10), DelayOptions::new())
//!         .deadline_with(Duration::from_secs(1), options)
//!         .await
//!         .unwrap_err();
//!     assert!(err.is_cancelled());
//! });
//! ```

mod deadline;
mod delay;
mod future_ext;

pub use deadline::{
    deadline, try_deadline, Deadline, DeadlineExceeded, DeadlineOptions, TryDeadline,
};
pub use delay::{delay, Delay, DelayOptions};
pub use future_ext::FutureExt;
pub use std::future::IntoFuture;
