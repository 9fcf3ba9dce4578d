use super::Cancelled;

use core::cell::RefCell;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use slab::Slab;
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnOnce(&Cancelled)>;

enum Listener {
    Waker(Waker),
    Callback(Callback),
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Waker(waker) => f.debug_tuple("Waker").field(waker).finish(),
            Listener::Callback(_) => f.write_str("Callback"),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    reason: Option<Cancelled>,
    listeners: Slab<Listener>,
}

/// An observable token which is cancelled at most once.
///
/// Obtained from [`CancelSource::signal`].
#[derive(Debug, Clone)]
pub struct CancelSignal {
    state: Rc<RefCell<State>>,
}

impl CancelSignal {
    fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    /// Returns `true` once the signal has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().reason.is_some()
    }

    /// The reason the signal was cancelled with, if it was.
    pub fn reason(&self) -> Option<Cancelled> {
        self.state.borrow().reason.clone()
    }

    /// Returns an error if the signal has been cancelled.
    pub fn check(&self) -> Result<(), Cancelled> {
        match self.reason() {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }

    /// Register a one-shot listener which runs when the signal is cancelled.
    ///
    /// If the signal was already cancelled the listener runs right away.
    /// Dropping the returned [`Subscription`] detaches the listener.
    pub fn on_cancel<F>(&self, listener: F) -> Subscription
    where
        F: FnOnce(&Cancelled) + 'static,
    {
        if let Some(reason) = self.reason() {
            listener(&reason);
            return Subscription::detached();
        }
        let key = self
            .state
            .borrow_mut()
            .listeners
            .insert(Listener::Callback(Box::new(listener)));
        Subscription {
            state: Rc::downgrade(&self.state),
            key: Some(key),
        }
    }

    /// Wait for the signal to be cancelled.
    pub fn cancelled(&self) -> Cancellation {
        Cancellation {
            signal: self.clone(),
            subscription: None,
        }
    }

    /// The number of listeners currently waiting on this signal.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Make sure `waker` is woken once the signal is cancelled.
    ///
    /// Re-registering through the same `slot` replaces the stored waker, so a
    /// caller only ever occupies a single listener entry.
    pub(crate) fn register_waker(&self, slot: &mut Option<Subscription>, waker: &Waker) {
        let mut state = self.state.borrow_mut();
        if state.reason.is_some() {
            return;
        }
        if let Some(key) = slot.as_ref().and_then(|subscription| subscription.key) {
            if let Some(Listener::Waker(existing)) = state.listeners.get_mut(key) {
                if !existing.will_wake(waker) {
                    *existing = waker.clone();
                }
                return;
            }
        }
        if let Some(stale) = slot.as_mut() {
            stale.key = None;
        }
        let key = state.listeners.insert(Listener::Waker(waker.clone()));
        drop(state);
        *slot = Some(Subscription {
            state: Rc::downgrade(&self.state),
            key: Some(key),
        });
    }

    fn fire(&self, reason: Cancelled) -> bool {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if state.reason.is_some() {
                return false;
            }
            state.reason = Some(reason.clone());
            std::mem::take(&mut state.listeners)
        };
        tracing::debug!(%reason, listeners = listeners.len(), "cancel signal fired");
        // Listeners may cancel other signals, so no borrow is held here.
        for (_, listener) in listeners {
            match listener {
                Listener::Waker(waker) => waker.wake(),
                Listener::Callback(callback) => callback(&reason),
            }
        }
        true
    }
}

/// The owning side of a [`CancelSignal`].
#[derive(Debug)]
pub struct CancelSource {
    signal: CancelSignal,
    _parent: Option<Subscription>,
}

impl CancelSource {
    /// Create a new, pending source.
    pub fn new() -> Self {
        Self {
            signal: CancelSignal::new(),
            _parent: None,
        }
    }

    /// Create a source which is also cancelled when `parent` is, with the
    /// parent's reason.
    ///
    /// If `parent` was already cancelled the new source starts out cancelled.
    /// The link to the parent is released when the source is dropped.
    pub fn child_of(parent: &CancelSignal) -> Self {
        let signal = CancelSignal::new();
        let child = Rc::downgrade(&signal.state);
        let link = parent.on_cancel(move |reason| {
            if let Some(state) = child.upgrade() {
                CancelSignal { state }.fire(reason.clone());
            }
        });
        Self {
            signal,
            _parent: Some(link),
        }
    }

    /// A signal observing this source.
    pub fn signal(&self) -> CancelSignal {
        self.signal.clone()
    }

    /// Cancel with the default reason.
    ///
    /// Returns `false` if the source had already been cancelled.
    pub fn cancel(&self) -> bool {
        self.cancel_with(Cancelled::default())
    }

    /// Cancel with the given reason.
    ///
    /// Returns `false` if the source had already been cancelled, in which case
    /// the original reason is kept.
    pub fn cancel_with(&self, reason: impl Into<Cancelled>) -> bool {
        self.signal.fire(reason.into())
    }

    /// Returns `true` once the source has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered cancellation listener.
///
/// The listener is removed when this is dropped.
#[derive(Debug)]
#[must_use = "dropping a subscription detaches its listener"]
pub struct Subscription {
    state: Weak<RefCell<State>>,
    key: Option<usize>,
}

impl Subscription {
    fn detached() -> Self {
        Self {
            state: Weak::new(),
            key: None,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let (Some(key), Some(state)) = (self.key.take(), self.state.upgrade()) else {
            return;
        };
        let mut state = state.borrow_mut();
        // Once fired the listener list has been drained already.
        if state.reason.is_none() {
            state.listeners.try_remove(key);
        }
    }
}

/// Waits for a [`CancelSignal`] to be cancelled.
///
/// This `struct` is created by [`CancelSignal::cancelled`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct Cancellation {
    signal: CancelSignal,
    subscription: Option<Subscription>,
}

impl Future for Cancellation {
    type Output = Cancelled;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match this.signal.reason() {
            Some(reason) => {
                this.subscription = None;
                Poll::Ready(reason)
            }
            None => {
                this.signal
                    .register_waker(&mut this.subscription, cx.waker());
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fires_listeners_once() {
        let source = CancelSource::new();
        let signal = source.signal();
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let _sub = signal.on_cancel(move |reason| {
            assert_eq!(reason.reason(), "stop");
            counter.set(counter.get() + 1);
        });
        assert_eq!(signal.listener_count(), 1);

        assert!(source.cancel_with("stop"));
        assert!(!source.cancel_with("again"));
        assert_eq!(calls.get(), 1);
        assert_eq!(signal.listener_count(), 0);
        assert_eq!(signal.reason().unwrap().reason(), "stop");
    }

    #[test]
    fn dropped_subscription_detaches() {
        let source = CancelSource::new();
        let signal = source.signal();
        let called = Rc::new(Cell::new(false));

        let flag = called.clone();
        let sub = signal.on_cancel(move |_| flag.set(true));
        drop(sub);
        assert_eq!(signal.listener_count(), 0);

        source.cancel();
        assert!(!called.get());
    }

    #[test]
    fn listener_on_cancelled_signal_runs_immediately() {
        let source = CancelSource::new();
        source.cancel();
        let called = Rc::new(Cell::new(false));
        let flag = called.clone();
        let _sub = source.signal().on_cancel(move |_| flag.set(true));
        assert!(called.get());
        assert_eq!(source.signal().listener_count(), 0);
    }

    #[test]
    fn child_follows_parent() {
        let parent = CancelSource::new();
        let child = CancelSource::child_of(&parent.signal());
        assert_eq!(parent.signal().listener_count(), 1);

        parent.cancel_with("parent went away");
        assert!(child.is_cancelled());
        assert_eq!(
            child.signal().reason().unwrap().reason(),
            "parent went away"
        );
    }

    #[test]
    fn child_does_not_cancel_parent() {
        let parent = CancelSource::new();
        let child = CancelSource::child_of(&parent.signal());
        child.cancel();
        assert!(!parent.is_cancelled());

        drop(child);
        assert_eq!(parent.signal().listener_count(), 0);
    }

    #[test]
    fn child_of_cancelled_parent_starts_cancelled() {
        let parent = CancelSource::new();
        parent.cancel_with("early");
        let child = CancelSource::child_of(&parent.signal());
        assert_eq!(child.signal().check().unwrap_err().reason(), "early");
    }

    #[test]
    fn default_reason() {
        let source = CancelSource::default();
        source.cancel();
        assert_eq!(
            source.signal().reason(),
            Some(Cancelled::new("the operation was cancelled"))
        );
    }
}
