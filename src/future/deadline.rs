use std::future::{Future, IntoFuture};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::ready;
use pin_project_lite::pin_project;

use super::{delay, Delay, DelayOptions};
use crate::cancel::{CancelSignal, CancelSource, Cancelled};
use crate::time::utils::timeout_err;
use crate::time::Duration;

/// The error returned when an operation does not finish before its deadline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("deadline exceeded")]
pub struct DeadlineExceeded {
    cancelled: Option<Cancelled>,
}

impl DeadlineExceeded {
    fn elapsed() -> Self {
        Self { cancelled: None }
    }

    fn cancelled(reason: Cancelled) -> Self {
        Self {
            cancelled: Some(reason),
        }
    }

    /// Returns `true` if the deadline was cut short by a cancellation signal
    /// rather than by the timeout elapsing.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }

    /// The reason of the cancellation which cut the deadline short, if any.
    pub fn cancel_reason(&self) -> Option<&Cancelled> {
        self.cancelled.as_ref()
    }
}

impl From<DeadlineExceeded> for io::Error {
    fn from(err: DeadlineExceeded) -> Self {
        timeout_err(err.to_string())
    }
}

/// Options for [`deadline`].
#[derive(Debug, Clone, Default)]
pub struct DeadlineOptions {
    signal: Option<CancelSignal>,
}

impl DeadlineOptions {
    /// Options without a cancellation signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire the deadline early when `signal` is cancelled.
    pub fn signal(mut self, signal: &CancelSignal) -> Self {
        self.signal = Some(signal.clone());
        self
    }
}

/// Race `operation` against a timer of `timeout`.
///
/// The output of `operation` is returned if it finishes first. Otherwise the
/// deadline fails with [`DeadlineExceeded`], and the operation is dropped along
/// with the returned future. A cancellation signal in the options is treated
/// like an elapsed timeout; if it is already cancelled the deadline fails
/// without starting a timer or polling the operation.
///
/// The operation is always polled before the timer, so an operation which is
/// ready wins against a timer which elapsed in the same tick.
///
/// # Example
///
/// ```
/// use kitbag::future::{deadline, delay, DeadlineOptions, DelayOptions};
/// use kitbag::time::Duration;
///
/// kitbag::runtime::block_on(async {
///     let slow = async {
///         let _ = delay(Duration::from_millis(200), DelayOptions::new()).await;
///         "meow"
///     };
///     let res = deadline(slow, Duration::from_millis(20), DeadlineOptions::new()).await;
///     assert!(res.is_err());
///
///     let fast = async {
///         let _ = delay(Duration::from_millis(20), DelayOptions::new()).await;
///         "meow"
///     };
///     let res = deadline(fast, Duration::from_millis(200), DeadlineOptions::new()).await;
///     assert_eq!(res.unwrap(), "meow");
/// });
/// ```
pub fn deadline<F>(
    operation: F,
    timeout: impl Into<Duration>,
    options: DeadlineOptions,
) -> Deadline<F::IntoFuture>
where
    F: IntoFuture,
{
    let future = operation.into_future();
    let signal = options.signal;
    if let Some(reason) = signal.as_ref().and_then(CancelSignal::reason) {
        tracing::debug!(%reason, "deadline signal cancelled before start");
        return Deadline {
            future,
            race: None,
            expired: Some(DeadlineExceeded::cancelled(reason)),
            completed: false,
        };
    }

    let inner = match &signal {
        Some(signal) => CancelSource::child_of(signal),
        None => CancelSource::new(),
    };
    let timer = delay(timeout, DelayOptions::new().signal(&inner.signal()));
    Deadline {
        future,
        race: Some(Race { timer, inner }),
        expired: None,
        completed: false,
    }
}

/// Like [`deadline`], for operations which can fail themselves.
///
/// The operation's own error is forwarded unchanged; an exceeded deadline is
/// converted into the operation's error type.
///
/// ```
/// use kitbag::future::{try_deadline, DeadlineOptions};
/// use kitbag::time::Duration;
/// use std::io;
///
/// kitbag::runtime::block_on(async {
///     let failing = async { Err::<(), _>(io::Error::other("booom")) };
///     let err = try_deadline(failing, Duration::from_secs(1), DeadlineOptions::new())
///         .await
///         .unwrap_err();
///     assert_eq!(err.to_string(), "booom");
/// });
/// ```
pub fn try_deadline<F, T, E>(
    operation: F,
    timeout: impl Into<Duration>,
    options: DeadlineOptions,
) -> TryDeadline<F::IntoFuture>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    TryDeadline {
        inner: deadline(operation, timeout, options),
    }
}

/// The timer half of a deadline race.
#[derive(Debug)]
struct Race {
    timer: Delay,
    inner: CancelSource,
}

pin_project! {
    /// A future that fails once its deadline passes.
    ///
    /// This `struct` is created by the [`deadline`] function and the
    /// [`deadline`] method on [`FutureExt`]. See their documentation for more.
    ///
    /// [`deadline`]: crate::future::FutureExt::deadline
    /// [`FutureExt`]: crate::future::FutureExt
    #[derive(Debug)]
    #[must_use = "futures do nothing unless polled or .awaited"]
    pub struct Deadline<F> {
        #[pin]
        future: F,
        race: Option<Race>,
        expired: Option<DeadlineExceeded>,
        completed: bool,
    }
}

impl<F> Deadline<F> {
    /// Whether the deadline timer is currently scheduled.
    pub fn is_scheduled(&self) -> bool {
        self.race.as_ref().is_some_and(|race| race.timer.is_scheduled())
    }
}

impl<F: Future> Future for Deadline<F> {
    type Output = Result<F::Output, DeadlineExceeded>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        assert!(!*this.completed, "future polled after completing");

        if let Some(err) = this.expired.take() {
            *this.completed = true;
            return Poll::Ready(Err(err));
        }

        if let Poll::Ready(value) = this.future.poll(cx) {
            *this.completed = true;
            if let Some(race) = this.race.take() {
                race.inner.cancel();
            }
            return Poll::Ready(Ok(value));
        }

        let Some(race) = this.race.as_mut() else {
            unreachable!("deadline race missing while pending");
        };
        let err = match ready!(Pin::new(&mut race.timer).poll(cx)) {
            Ok(()) => DeadlineExceeded::elapsed(),
            // The timer only gets cancelled through the caller's signal.
            Err(reason) => DeadlineExceeded::cancelled(reason),
        };
        tracing::debug!(cancelled = err.is_cancelled(), "deadline exceeded");
        *this.completed = true;
        *this.race = None;
        Poll::Ready(Err(err))
    }
}

pin_project! {
    /// A deadline over a fallible operation.
    ///
    /// This `struct` is created by the [`try_deadline`] function. See its
    /// documentation for more.
    #[derive(Debug)]
    #[must_use = "futures do nothing unless polled or .awaited"]
    pub struct TryDeadline<F> {
        #[pin]
        inner: Deadline<F>,
    }
}

impl<F, T, E> Future for TryDeadline<F>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(self.project().inner.poll(cx)) {
            Ok(res) => Poll::Ready(res),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }
}
