//! Tick source abstraction: the two interchangeable backends that drive a
//! simulation loop, selected by [`SchedulerMode`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
use crate::runtime::RuntimeHandle;

/// Which tick backend drives the simulation loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulerMode {
    /// Ticks ride the host's display refresh; timestamps come from
    /// whatever the host passes to `drain_frame_callbacks`.
    #[default]
    FrameSynced,
    /// Ticks fire on a fixed wall-clock interval; the backend supplies
    /// its own monotonic timestamps.
    FixedInterval,
}

/// A source of simulation ticks. Implementations deliver monotonic
/// nanosecond timestamps to the installed sink, one per tick, on the
/// runtime thread.
pub trait TickSource {
    /// Installs `sink` and begins delivering ticks. Idempotent while
    /// running: a second call leaves the active loop untouched.
    fn start(&self, sink: Rc<dyn Fn(u64)>);

    /// Cancels the pending tick or timer. Safe no-op if already stopped.
    fn stop(&self);

    fn is_running(&self) -> bool;
}

struct FrameSourceInner {
    clock: FrameClock,
    registration: RefCell<Option<FrameCallbackRegistration>>,
    running: Cell<bool>,
}

/// Frame-synced tick backend: each tick registers its own next frame
/// callback, yielding a variable-rate loop matched to the display.
pub struct FrameTickSource {
    inner: Rc<FrameSourceInner>,
}

impl FrameTickSource {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(FrameSourceInner {
                clock: runtime.frame_clock(),
                registration: RefCell::new(None),
                running: Cell::new(false),
            }),
        }
    }
}

fn schedule_next(inner: &Rc<FrameSourceInner>, sink: Rc<dyn Fn(u64)>) {
    let weak = Rc::downgrade(inner);
    let registration = inner.clock.with_frame_nanos(move |frame_time_nanos| {
        let Some(strong) = weak.upgrade() else {
            return;
        };
        if !strong.running.get() {
            return;
        }
        strong.registration.borrow_mut().take();
        sink(frame_time_nanos);
        // The sink may have stopped the loop; only then skip re-arming.
        if strong.running.get() {
            schedule_next(&strong, sink.clone());
        }
    });
    *inner.registration.borrow_mut() = Some(registration);
}

impl TickSource for FrameTickSource {
    fn start(&self, sink: Rc<dyn Fn(u64)>) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);
        schedule_next(&self.inner, sink);
    }

    fn stop(&self) {
        self.inner.running.set(false);
        self.inner.registration.borrow_mut().take();
    }

    fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

#[cfg(test)]
#[path = "tests/tick_tests.rs"]
mod tests;
