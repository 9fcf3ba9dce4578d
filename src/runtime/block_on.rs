use super::{Reactor, REACTOR};

use core::future::Future;
use core::pin::pin;
use core::task::Waker;
use core::task::{Context, Poll};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::Wake;
use std::thread::{self, Thread};

/// Start the event loop
///
/// # Panics
///
/// Panics when called from within another `block_on` on the same thread.
pub fn block_on<Fut>(fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    // Construct the reactor
    let reactor = Reactor::new();
    // Store a copy as a singleton to be used elsewhere:
    let prev = REACTOR.replace(Some(reactor.clone()));
    if prev.is_some() {
        REACTOR.set(prev);
        panic!("cannot kitbag::runtime::block_on inside an existing block_on!")
    }
    let _guard = ClearOnDrop;

    // Pin the future so it can be polled
    let mut fut = pin!(fut);

    // Create a new context to be passed to the future.
    let waker_impl = Arc::new(ReactorWaker::new(thread::current()));
    let waker = Waker::from(Arc::clone(&waker_impl));
    let mut cx = Context::from_waker(&waker);

    // Either the future completes and we return, or some timer is pending
    // and we wait.
    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(res) => break res,
            Poll::Pending => reactor.block_until(!waker_impl.take_awake()),
        }
    }
}

/// Clears the reactor singleton, also when the future panics.
struct ClearOnDrop;

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        REACTOR.replace(None);
    }
}

struct ReactorWaker {
    awake: AtomicBool,
    thread: Thread,
}

impl ReactorWaker {
    fn new(thread: Thread) -> Self {
        Self {
            awake: AtomicBool::new(false),
            thread,
        }
    }

    #[inline]
    fn take_awake(&self) -> bool {
        self.awake.swap(false, Ordering::AcqRel)
    }
}

impl Wake for ReactorWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.awake.store(true, Ordering::Release);
        self.thread.unpark();
    }
}
