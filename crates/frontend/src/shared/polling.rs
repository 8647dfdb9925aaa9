//! Cancellable periodic task bound to a component's lifetime.
//!
//! The first tick runs immediately, then one tick per period until the
//! [`PollHandle`] is cancelled or the tick reports that its target is gone.
//! Cancelling during the wait drops the pending timer right away.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::Poll;
use std::time::Duration;

use futures::future::{self, Either};
use futures::pin_mut;
use futures::task::AtomicWaker;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    waker: AtomicWaker,
}

#[derive(Clone, Debug, Default)]
pub struct PollHandle {
    inner: Arc<Inner>,
}

impl PollHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the task; an in-flight tick finishes, a pending wait ends now
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.waker.wake();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called
    pub fn cancelled(&self) -> impl Future<Output = ()> + '_ {
        future::poll_fn(move |cx| {
            if self.is_cancelled() {
                return Poll::Ready(());
            }
            self.inner.waker.register(cx.waker());
            // cancel() may have run between the check and the register
            if self.is_cancelled() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
    }
}

/// Drive `tick` until cancelled.
///
/// `tick` receives the handle so it can drop a result that arrives after
/// cancellation, and returns `false` to stop polling on its own.
pub async fn poll_until_cancelled<T, TF, S, SF>(handle: PollHandle, mut tick: T, mut sleep: S)
where
    T: FnMut(PollHandle) -> TF,
    TF: Future<Output = bool>,
    S: FnMut() -> SF,
    SF: Future<Output = ()>,
{
    loop {
        if handle.is_cancelled() {
            break;
        }
        if !tick(handle.clone()).await {
            handle.cancel();
            break;
        }
        if handle.is_cancelled() {
            break;
        }
        let wait = sleep();
        let cancelled = handle.cancelled();
        pin_mut!(wait, cancelled);
        if let Either::Right(_) = future::select(wait, cancelled).await {
            break;
        }
    }
}

/// Spawn a browser timer loop on the local executor
pub fn spawn_poll<T, TF>(period: Duration, tick: T) -> PollHandle
where
    T: FnMut(PollHandle) -> TF + 'static,
    TF: Future<Output = bool> + 'static,
{
    let handle = PollHandle::new();
    let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
    spawn_local(poll_until_cancelled(handle.clone(), tick, move || {
        TimeoutFuture::new(millis)
    }));
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_first_tick_runs_before_first_sleep() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let handle = PollHandle::new();

        let tick_events = events.clone();
        let sleep_events = events.clone();
        let sleep_handle = handle.clone();
        block_on(poll_until_cancelled(
            handle.clone(),
            move |_| {
                tick_events.borrow_mut().push("tick");
                async { true }
            },
            move || {
                let mut log = sleep_events.borrow_mut();
                log.push("sleep");
                if log.iter().filter(|e| **e == "sleep").count() == 2 {
                    sleep_handle.cancel();
                }
                async {}
            },
        ));

        assert_eq!(*events.borrow(), vec!["tick", "sleep", "tick", "sleep"]);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_cancelled_handle_never_ticks() {
        let ticks = Rc::new(RefCell::new(0));
        let handle = PollHandle::new();
        handle.cancel();

        let counter = ticks.clone();
        block_on(poll_until_cancelled(
            handle,
            move |_| {
                *counter.borrow_mut() += 1;
                async { true }
            },
            || async {},
        ));

        assert_eq!(*ticks.borrow(), 0);
    }

    #[test]
    fn test_tick_can_stop_polling() {
        let ticks = Rc::new(RefCell::new(0));
        let handle = PollHandle::new();

        let counter = ticks.clone();
        block_on(poll_until_cancelled(
            handle.clone(),
            move |_| {
                *counter.borrow_mut() += 1;
                let keep_going = *counter.borrow() < 3;
                async move { keep_going }
            },
            || async {},
        ));

        assert_eq!(*ticks.borrow(), 3);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_cancel_during_tick_stops_before_sleep() {
        let sleeps = Rc::new(RefCell::new(0));
        let handle = PollHandle::new();

        let counter = sleeps.clone();
        block_on(poll_until_cancelled(
            handle.clone(),
            |h: PollHandle| {
                h.cancel();
                async { true }
            },
            move || {
                *counter.borrow_mut() += 1;
                async {}
            },
        ));

        assert_eq!(*sleeps.borrow(), 0);
    }

    #[test]
    fn test_cancel_during_sleep_drops_timer() {
        let mut pool = LocalPool::new();
        let handle = PollHandle::new();
        let ticks = Rc::new(Cell::new(0));
        let timers = Rc::new(RefCell::new(Vec::<oneshot::Sender<()>>::new()));
        let finished = Rc::new(Cell::new(false));

        let counter = ticks.clone();
        let pending = timers.clone();
        let done = finished.clone();
        let task = poll_until_cancelled(
            handle.clone(),
            move |_| {
                counter.set(counter.get() + 1);
                async { true }
            },
            move || {
                // a timer that never fires on its own
                let (tx, rx) = oneshot::channel::<()>();
                pending.borrow_mut().push(tx);
                async move {
                    let _ = rx.await;
                }
            },
        );
        pool.spawner()
            .spawn_local(async move {
                task.await;
                done.set(true);
            })
            .unwrap();

        pool.run_until_stalled();
        assert_eq!(ticks.get(), 1);
        assert!(!finished.get());

        handle.cancel();
        pool.run_until_stalled();
        assert!(finished.get());
        assert_eq!(ticks.get(), 1);
        let timers = timers.borrow();
        assert_eq!(timers.len(), 1);
        assert!(timers[0].is_canceled());
    }
}
