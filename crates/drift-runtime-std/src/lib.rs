//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `drift-core`: a scheduler that records
//! frame requests and wakes a registered host waker, a monotonic clock,
//! and the fixed-interval tick backend. Applications construct a
//! [`StdRuntime`] and drive engines from their event loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use drift_core::{
    Clock, FrameTickSource, Runtime, RuntimeHandle, RuntimeScheduler, SchedulerMode,
    TickDispatcher, TickSource,
};

/// Nominal period of the fixed-interval backend (~62.5 Hz).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Scheduler that records frame requests and wakes the host loop.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    frame_waker: Mutex<Option<Arc<dyn Fn() + Send + Sync + 'static>>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            frame_waker: Mutex::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker invoked whenever a new frame is scheduled.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.frame_waker.lock().expect("frame waker lock poisoned") = Some(Arc::new(waker));
    }

    pub fn clear_frame_waker(&self) {
        *self.frame_waker.lock().expect("frame waker lock poisoned") = None;
    }

    fn wake(&self) {
        let waker = self
            .frame_waker
            .lock()
            .expect("frame waker lock poisoned")
            .clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_nanos() as u64
    }
}

/// Convenience container bundling the standard scheduler, clock, and a
/// runtime constructed over them.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    runtime: Runtime,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self {
            scheduler,
            clock: Arc::new(StdClock),
            runtime,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Applies timer-posted ticks, then drains display-synced callbacks
    /// at `frame_time_nanos` if the host has a fresh frame timestamp.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime_handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// Applies ticks posted from timer threads on the runtime thread.
    pub fn pump(&self) {
        self.runtime_handle().pump();
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

struct IntervalWorker {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

/// Fixed-interval tick backend: a timer thread fires at a nominal period
/// and posts self-supplied monotonic timestamps through the runtime's
/// tick dispatcher. The sink runs on the runtime thread when the host
/// calls [`RuntimeHandle::pump`]; the timer thread never touches state.
pub struct IntervalTickSource {
    delivery: FrameTickSource,
    dispatcher: TickDispatcher,
    clock: Arc<StdClock>,
    period: Duration,
    running: Cell<bool>,
    worker: RefCell<Option<IntervalWorker>>,
}

impl IntervalTickSource {
    pub fn new(runtime: &StdRuntime) -> Self {
        Self::with_period(runtime, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_period(runtime: &StdRuntime, period: Duration) -> Self {
        let handle = runtime.runtime_handle();
        Self {
            delivery: FrameTickSource::new(handle.clone()),
            dispatcher: handle.dispatcher(),
            clock: runtime.clock(),
            period,
            running: Cell::new(false),
            worker: RefCell::new(None),
        }
    }
}

impl TickSource for IntervalTickSource {
    fn start(&self, sink: Rc<dyn Fn(u64)>) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
        self.delivery.start(sink);

        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);
        let dispatcher = self.dispatcher.clone();
        let clock = Arc::clone(&self.clock);
        let period = self.period;
        let origin = clock.now();
        let thread = std::thread::spawn(move || {
            while !stop_for_thread.load(Ordering::SeqCst) {
                std::thread::sleep(period);
                if stop_for_thread.load(Ordering::SeqCst) {
                    break;
                }
                // Interval timers carry no timestamp of their own; the
                // backend supplies the current monotonic time.
                dispatcher.post_tick(clock.elapsed_nanos(origin));
            }
        });
        *self.worker.borrow_mut() = Some(IntervalWorker { stop, thread });
    }

    fn stop(&self) {
        if !self.running.get() {
            return;
        }
        self.running.set(false);
        self.delivery.stop();
        if let Some(worker) = self.worker.borrow_mut().take() {
            worker.stop.store(true, Ordering::SeqCst);
            let _ = worker.thread.join();
        }
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for IntervalTickSource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Maps a [`SchedulerMode`] to its backend over this runtime.
pub fn tick_source(mode: SchedulerMode, runtime: &StdRuntime) -> Rc<dyn TickSource> {
    match mode {
        SchedulerMode::FrameSynced => Rc::new(FrameTickSource::new(runtime.runtime_handle())),
        SchedulerMode::FixedInterval => Rc::new(IntervalTickSource::new(runtime)),
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
