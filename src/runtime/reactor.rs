use super::REACTOR;

use core::cell::RefCell;
use core::task::Waker;
use slab::Slab;
use std::rc::Rc;
use std::thread;
use std::time::Instant;

/// A scheduled timer, registered with a [`Reactor`].
///
/// Dropping the registration clears the timer.
#[derive(Debug)]
pub struct Registration {
    key: usize,
    reactor: Reactor,
}

impl Registration {
    /// Store the waker to call once the deadline has passed.
    pub fn set_waker(&self, waker: &Waker) {
        let mut reactor = self.reactor.inner.borrow_mut();
        let entry = &mut reactor.timers[self.key];
        if !entry
            .waker
            .as_ref()
            .is_some_and(|existing| existing.will_wake(waker))
        {
            entry.waker = Some(waker.clone());
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.reactor.deregister(self.key)
    }
}

#[derive(Debug)]
struct TimerEntry {
    deadline: Instant,
    waker: Option<Waker>,
}

/// Manage the timers of the current event loop.
#[derive(Debug, Clone)]
pub struct Reactor {
    inner: Rc<RefCell<InnerReactor>>,
}

/// The private, internal `Reactor` implementation - factored out so we can take
/// a lock of the whole.
#[derive(Debug)]
struct InnerReactor {
    timers: Slab<TimerEntry>,
}

impl InnerReactor {
    fn next_deadline(&self) -> Option<Instant> {
        // Timers which already fired have no waker until they are polled again.
        self.timers
            .iter()
            .filter(|(_, entry)| entry.waker.is_some())
            .map(|(_, entry)| entry.deadline)
            .min()
    }
}

impl Reactor {
    /// Return a `Reactor` for the currently running `kitbag::runtime::block_on`.
    ///
    /// # Panics
    /// This will panic if called outside of `kitbag::runtime::block_on`.
    pub fn current() -> Self {
        REACTOR.with(|r| {
            r.borrow()
                .as_ref()
                .expect("Reactor::current must be called within a kitbag runtime")
                .clone()
        })
    }

    /// Create a new instance of `Reactor`
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(InnerReactor {
                timers: Slab::new(),
            })),
        }
    }

    /// Wait for the next timer to become due, then call the wakers of every
    /// timer whose deadline has passed.
    ///
    /// When `block` is `false` the thread is not parked; only already-elapsed
    /// timers are woken.
    ///
    /// # On Wakers and single-threaded runtimes
    ///
    /// The waker handed to the root future only flags the loop as awake. It is
    /// common and encouraged to use wakers to distinguish between events, and
    /// we do not control the wakers constructed by other libraries, so every
    /// elapsed timer gets its own waker called.
    pub(crate) fn block_until(&self, block: bool) {
        if block {
            let next = self.inner.borrow().next_deadline();
            match next {
                Some(deadline) => {
                    let now = Instant::now();
                    if deadline > now {
                        thread::park_timeout(deadline - now);
                    }
                }
                None => {
                    tracing::warn!("event loop parked with no scheduled timers");
                    thread::park();
                }
            }
        }

        let now = Instant::now();
        let due: Vec<Waker> = self
            .inner
            .borrow_mut()
            .timers
            .iter_mut()
            .filter(|(_, entry)| entry.deadline <= now)
            .filter_map(|(_, entry)| entry.waker.take())
            .collect();
        // Wakers may re-enter the reactor, so call them without holding a borrow.
        for waker in due {
            waker.wake();
        }
    }

    /// Schedule a timer that fires at `deadline`.
    pub fn schedule(&self, deadline: Instant) -> Registration {
        let key = self.inner.borrow_mut().timers.insert(TimerEntry {
            deadline,
            waker: None,
        });
        tracing::trace!(key, ?deadline, "schedule timer");
        Registration {
            key,
            reactor: self.clone(),
        }
    }

    /// The number of timers which are currently scheduled.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    fn deregister(&self, key: usize) {
        let mut reactor = self.inner.borrow_mut();
        tracing::trace!(key, "clear timer");
        reactor.timers.remove(key);
    }
}
