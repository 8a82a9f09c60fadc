use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use drift_core::{DefaultScheduler, FrameTickSource, Runtime, RuntimeHandle};
use drift_engine::{DragEngine, DragSnapshot, SimulationConfig};
use drift_geometry::{Point, Rect};

/// Headless harness for exercising a drag engine in tests.
///
/// `DragTestRule` owns a runtime with a no-op scheduler and an engine
/// bound to a frame-synced tick source, so tests drive both pointer
/// flows (in device coordinates against a fixed surface rect) and
/// simulation ticks deterministically, without a windowing backend.
/// Every observer notification is recorded for assertions.
pub struct DragTestRule {
    runtime: Runtime,
    engine: DragEngine,
    snapshots: Rc<RefCell<Vec<DragSnapshot>>>,
    surface: Rect,
}

impl DragTestRule {
    /// Default tuning over a 300x200 surface, ticking when told to.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let ticks = Rc::new(FrameTickSource::new(runtime.handle()));
        let snapshots: Rc<RefCell<Vec<DragSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&snapshots);
        let engine = DragEngine::new(config, ticks, move |snapshot| {
            recorder.borrow_mut().push(*snapshot);
        });
        engine.start();
        Self {
            runtime,
            engine,
            snapshots,
            surface: Rect::new(0.0, 0.0, 300.0, 200.0),
        }
    }

    pub fn engine(&self) -> &DragEngine {
        &self.engine
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface;
    }

    /// Presses at device coordinates against the rule's surface.
    pub fn press(&self, x: f32, y: f32, now_nanos: u64) {
        self.engine.pointer_down(Point::new(x, y), self.surface, now_nanos);
    }

    pub fn drag_to(&self, x: f32, y: f32, now_nanos: u64) {
        self.engine.pointer_move(Point::new(x, y), now_nanos);
    }

    pub fn release(&self) {
        self.engine.pointer_up();
    }

    /// Drains scheduled frame callbacks at the supplied timestamp,
    /// running one simulation tick while the engine is started.
    pub fn advance_frame(&self, frame_time_nanos: u64) {
        self.runtime.handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// Applies ticks posted from timer threads, as a host loop would.
    pub fn pump(&self) {
        self.runtime.handle().pump();
    }

    /// All notifications recorded so far, oldest first.
    pub fn snapshots(&self) -> Vec<DragSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Drains the recorded notifications, leaving the log empty.
    pub fn take_snapshots(&self) -> Vec<DragSnapshot> {
        self.snapshots.borrow_mut().drain(..).collect()
    }

    pub fn last_snapshot(&self) -> Option<DragSnapshot> {
        self.snapshots.borrow().last().copied()
    }

    pub fn notification_count(&self) -> usize {
        self.snapshots.borrow().len()
    }
}

impl Default for DragTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a
/// `DragTestRule`.
pub fn run_drag_test<R>(f: impl FnOnce(&mut DragTestRule) -> R) -> R {
    let mut rule = DragTestRule::new();
    f(&mut rule)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
