use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project_lite::pin_project;

use crate::time::{Instant, Timer};

/// Sleeps until the specified instant.
pub fn sleep_until(deadline: Instant) -> SleepUntil {
    SleepUntil {
        timer: Timer::at(deadline),
        completed: false,
    }
}

pin_project! {
    /// Sleeps until the specified instant.
    #[derive(Debug)]
    #[must_use = "futures do nothing unless polled or .awaited"]
    pub struct SleepUntil {
        #[pin]
        timer: Timer,
        completed: bool,
    }
}

impl Future for SleepUntil {
    type Output = Instant;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        assert!(!self.completed, "future polled after completing");
        let this = self.project();
        match this.timer.poll(cx) {
            Poll::Ready(instant) => {
                *this.completed = true;
                Poll::Ready(instant)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
