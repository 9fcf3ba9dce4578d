use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::cancel::{CancelSignal, Cancelled, Subscription};
use crate::time::{Duration, Timer};

/// Options for [`delay`].
#[derive(Debug, Clone, Default)]
pub struct DelayOptions {
    signal: Option<CancelSignal>,
}

impl DelayOptions {
    /// Options without a cancellation signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the delay when `signal` is cancelled.
    pub fn signal(mut self, signal: &CancelSignal) -> Self {
        self.signal = Some(signal.clone());
        self
    }
}

/// Resolve after `dur` has elapsed.
///
/// When the options carry a [`CancelSignal`], the delay fails with the
/// signal's [`Cancelled`] reason as soon as it is cancelled, and the timer is
/// cleared. A signal which is already cancelled when `delay` is called fails the
/// delay right away without ever scheduling a timer.
///
/// # Example
///
/// ```
/// use kitbag::cancel::CancelSource;
/// use kitbag::future::{delay, DelayOptions};
/// use kitbag::time::{Duration, Instant};
///
/// kitbag::runtime::block_on(async {
///     let start = Instant::now();
///     delay(Duration::from_millis(20), DelayOptions::new()).await.unwrap();
///     assert!(start.elapsed() >= Duration::from_millis(20));
///
///     let source = CancelSource::new();
///     source.cancel_with("not today");
///     let options = DelayOptions::new().signal(&source.signal());
///     let err = delay(Duration::from_secs(60), options).await.unwrap_err();
///     assert_eq!(err.reason(), "not today");
/// });
/// ```
pub fn delay(dur: impl Into<Duration>, options: DelayOptions) -> Delay {
    let dur = dur.into();
    let signal = options.signal;
    match signal.as_ref().and_then(CancelSignal::reason) {
        Some(reason) => Delay {
            timer: Timer::never(),
            signal: None,
            listener: None,
            state: State::Cancelled(reason),
        },
        None => Delay {
            timer: Timer::after(dur),
            signal,
            listener: None,
            state: State::Pending,
        },
    }
}

/// A cancellable timer.
///
/// This `struct` is created by the [`delay`] function. See its documentation
/// for more.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct Delay {
    timer: Timer,
    signal: Option<CancelSignal>,
    listener: Option<Subscription>,
    state: State,
}

/// The internal state
#[derive(Debug)]
enum State {
    Pending,
    /// The signal was cancelled before the delay was created.
    Cancelled(Cancelled),
    Completed,
}

impl Delay {
    /// Whether a timer is currently scheduled for this delay.
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_scheduled()
    }
}

impl Future for Delay {
    type Output = Result<(), Cancelled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match mem::replace(&mut this.state, State::Completed) {
            State::Pending => {}
            State::Cancelled(reason) => return Poll::Ready(Err(reason)),
            State::Completed => panic!("future polled after completing"),
        }

        if let Some(reason) = this.signal.as_ref().and_then(CancelSignal::reason) {
            tracing::debug!(%reason, "delay cancelled");
            this.timer.clear();
            this.listener = None;
            return Poll::Ready(Err(reason));
        }

        if Pin::new(&mut this.timer).poll(cx).is_ready() {
            this.listener = None;
            return Poll::Ready(Ok(()));
        }

        if let Some(signal) = &this.signal {
            signal.register_waker(&mut this.listener, cx.waker());
        }
        this.state = State::Pending;
        Poll::Pending
    }
}
