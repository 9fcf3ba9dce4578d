//! Async time interfaces.

pub(crate) mod utils;

mod duration;
mod instant;
pub use duration::Duration;
pub use instant::Instant;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::runtime::{Reactor, Registration};

/// A timer which fires once its deadline has passed.
///
/// The deadline is fixed when the timer is created, but the timer is only
/// scheduled with the [`Reactor`] once it is first polled. It is cleared again
/// as soon as it completes or is dropped.
///
/// # Panics
///
/// Polling a pending timer outside of [`block_on`](crate::runtime::block_on)
/// panics.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct Timer {
    deadline: Option<Instant>,
    registration: Option<Registration>,
}

impl Timer {
    /// A timer which never fires.
    pub fn never() -> Timer {
        Timer {
            deadline: None,
            registration: None,
        }
    }

    /// A timer which fires at `deadline`.
    pub fn at(deadline: Instant) -> Timer {
        Timer {
            deadline: Some(deadline),
            registration: None,
        }
    }

    /// A timer which fires once `duration` has passed from now.
    ///
    /// A duration too long to be represented as an [`Instant`] never fires.
    pub fn after(duration: Duration) -> Timer {
        match Instant::now().checked_add(duration) {
            Some(deadline) => Self::at(deadline),
            None => Self::never(),
        }
    }

    /// Whether this timer is currently registered with the reactor.
    pub fn is_scheduled(&self) -> bool {
        self.registration.is_some()
    }

    /// Clear the timer. It will never fire afterwards.
    pub fn clear(&mut self) {
        *self = Self::never();
    }
}

impl Future for Timer {
    type Output = Instant;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(deadline) = self.deadline else {
            return Poll::Pending;
        };
        let now = Instant::now();
        if now >= deadline {
            self.registration = None;
            return Poll::Ready(now);
        }
        self.registration
            .get_or_insert_with(|| Reactor::current().schedule(deadline.into()))
            .set_waker(cx.waker());
        Poll::Pending
    }
}
