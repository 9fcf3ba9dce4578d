#![warn(future_incompatible, unreachable_pub)]
#![deny(missing_debug_implementations)]
#![warn(missing_docs)]

//! Small async timing combinators, cancellation signals and dynamic value
//! helpers.
//!
//! The heart of this library is a pair of timing combinators:
//! [`future::delay`] resolves after a span of time unless its
//! [`cancel::CancelSignal`] fires first, and [`future::deadline`] races an
//! operation against such a delay. Both run on the small single-threaded event
//! loop in [`runtime`].
//!
//! Next to that, [`lang`] classifies dynamically-typed values and [`object`]
//! copies subsets of their properties. Both live behind the default `json`
//! feature.
//!
//! # Examples
//!
//! **Racing an operation against a deadline**
//!
//! ```rust
//! use kitbag::future::{delay, DelayOptions};
//! use kitbag::prelude::*;
//! use kitbag::time::Duration;
//!
//! #[kitbag::main]
//! async fn main() {
//!     let slow = async {
//!         let _ = delay(Duration::from_millis(100), DelayOptions::new()).await;
//!         "X"
//!     };
//!     assert!(slow.deadline(Duration::from_millis(10)).await.is_err());
//!
//!     let fast = async {
//!         let _ = delay(Duration::from_millis(10), DelayOptions::new()).await;
//!         "X"
//!     };
//!     assert_eq!(fast.deadline(Duration::from_millis(100)).await, Ok("X"));
//! }
//! ```
//!
//! # Design Decisions
//!
//! Like the event loop it runs on, everything here is single-threaded:
//! cancellation signals are shared through `Rc`, and futures are not `Send`.
//! Timers are only ever scheduled while something is waiting on them, and are
//! cleared as soon as their future completes or is dropped.

pub mod cancel;
pub mod future;
#[cfg(feature = "json")]
pub mod lang;
#[cfg(feature = "json")]
pub mod object;
pub mod runtime;
pub mod task;
pub mod time;

pub use kitbag_macro::attr_macro_main as main;
pub use kitbag_macro::attr_macro_test as test;

/// The `kitbag` prelude.
pub mod prelude {
    pub use crate::future::FutureExt as _;
}
