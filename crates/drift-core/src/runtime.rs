use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::ThreadId;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;

pub type FrameCallbackId = u64;

struct TickDispatcherInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    tx: mpsc::Sender<u64>,
    pending: AtomicUsize,
}

impl TickDispatcherInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>, tx: mpsc::Sender<u64>) -> Self {
        Self {
            scheduler,
            tx,
            pending: AtomicUsize::new(0),
        }
    }

    fn post_tick(&self, frame_time_nanos: u64) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(frame_time_nanos);
        self.scheduler.schedule_frame();
    }

    fn has_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

struct PendingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> PendingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        Self { counter }
    }
}

impl<'a> Drop for PendingGuard<'a> {
    fn drop(&mut self) {
        let previous = self.counter.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "tick dispatcher pending count underflowed");
    }
}

/// `Send` handle used by timer backends to feed timestamps into the
/// runtime from other threads. Posted ticks are applied on the runtime
/// thread by [`RuntimeHandle::pump`].
#[derive(Clone)]
pub struct TickDispatcher {
    inner: Arc<TickDispatcherInner>,
}

impl TickDispatcher {
    fn new(inner: Arc<TickDispatcherInner>) -> Self {
        Self { inner }
    }

    pub fn post_tick(&self, frame_time_nanos: u64) {
        self.inner.post_tick(frame_time_nanos);
    }

    pub fn has_pending(&self) -> bool {
        self.inner.has_pending()
    }
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    dispatcher: Arc<TickDispatcherInner>,
    tick_rx: RefCell<mpsc::Receiver<u64>>,
    runtime_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Arc::new(TickDispatcherInner::new(scheduler.clone(), tx));
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            dispatcher,
            tick_rx: RefCell::new(rx),
            runtime_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        let callbacks_empty = callbacks.is_empty();
        drop(callbacks);
        if callbacks_empty && !self.dispatcher.has_pending() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    /// Invokes every callback registered so far with `frame_time_nanos`.
    /// Callbacks registered while draining land in the next drain.
    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.runtime_thread_id,
            "frame callbacks drained off the runtime thread"
        );
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "draining {} frame callback(s) at {}ns",
            pending.len(),
            frame_time_nanos
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() && !self.dispatcher.has_pending() {
            self.needs_frame.set(false);
        }
    }

    /// Applies every timestamp posted through the dispatcher, in posting
    /// order, each as one frame-callback drain.
    fn pump(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.runtime_thread_id,
            "ticks pumped off the runtime thread"
        );
        loop {
            let tick = {
                let rx = self.tick_rx.borrow();
                rx.try_recv().ok()
            };
            match tick {
                Some(frame_time_nanos) => {
                    let _guard = PendingGuard::new(&self.dispatcher.pending);
                    self.drain_frame_callbacks(frame_time_nanos);
                }
                None => break,
            }
        }
    }
}

/// Owns the callback registry. Create one per UI thread and keep it alive
/// for the lifetime of the engines it drives; [`RuntimeHandle`]s are weak
/// and become no-ops once the runtime is dropped.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
            dispatcher: TickDispatcher::new(self.inner.dispatcher.clone()),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get() || self.inner.dispatcher.has_pending()
    }
}

/// Scheduler that performs no host wake-up. Suitable for tests and hosts
/// that poll [`Runtime::needs_frame`] themselves.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    dispatcher: TickDispatcher,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    /// Applies ticks posted from other threads. Hosts call this from the
    /// runtime thread after being woken by their scheduler.
    pub fn pump(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.pump();
        }
    }

    pub fn has_pending_ticks(&self) -> bool {
        self.dispatcher.has_pending()
    }

    pub fn dispatcher(&self) -> TickDispatcher {
        self.dispatcher.clone()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
