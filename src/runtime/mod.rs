//! Async event loop support.
//!
//! The way to use this is to call [`block_on()`] to drive a future to
//! completion on the current thread. While it runs, [`Reactor::current`] gives
//! access to the event loop so timers can be scheduled against it. Every
//! scheduled timer is represented by a [`Registration`]; dropping it clears the
//! timer again.
//!
//! The event loop is single-threaded and cooperative: futures only make
//! progress when they are polled by [`block_on()`], and the loop parks the
//! thread until the earliest scheduled timer elapses whenever nothing is ready.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod block_on;
mod reactor;

use std::cell::RefCell;

pub use block_on::block_on;
pub use reactor::{Reactor, Registration};

std::thread_local! {
    pub(crate) static REACTOR: RefCell<Option<Reactor>> = const { RefCell::new(None) };
}
