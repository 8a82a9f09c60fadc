use std::cell::RefCell;
use std::rc::Rc;

use drift_core::TickSource;
use drift_geometry::{Point, Rect};

use crate::config::SimulationConfig;
use crate::events::PointerEventKind;
use crate::integrator;
use crate::sampler;
use crate::state::{DragSnapshot, DragState};

/// The drag tracking engine: one state cell, a pointer sampler feeding
/// it while dragging, and a deceleration integrator driven by the bound
/// tick source while the engine is started.
///
/// The observer is invoked synchronously after every mutation - per
/// accepted pointer sample and once per tick - at up to the tick rate,
/// with no coalescing. It may read the engine but must not assume any
/// particular ordering between pointer and tick notifications beyond
/// the order they were applied in.
pub struct DragEngine {
    state: Rc<RefCell<DragState>>,
    config: SimulationConfig,
    observer: Rc<dyn Fn(&DragSnapshot)>,
    ticks: Rc<dyn TickSource>,
}

impl DragEngine {
    pub fn new(
        config: SimulationConfig,
        ticks: Rc<dyn TickSource>,
        observer: impl Fn(&DragSnapshot) + 'static,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(DragState::new())),
            config,
            observer: Rc::new(observer),
            ticks,
        }
    }

    /// Begins ticking the integrator through the bound tick source.
    /// Idempotent while running. Rebinding to a different mode or config
    /// means building a new engine: `stop()` this one first.
    pub fn start(&self) {
        if self.ticks.is_running() {
            return;
        }
        log::debug!("drag engine starting ({:?})", self.config.scheduler_mode);
        let weak = Rc::downgrade(&self.state);
        let config = self.config;
        let observer = Rc::clone(&self.observer);
        self.ticks.start(Rc::new(move |frame_time_nanos| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            integrator::advance(&mut state.borrow_mut(), &config, frame_time_nanos);
            let snapshot = state.borrow().snapshot();
            observer(&snapshot);
        }));
    }

    /// Cancels the pending tick or timer. Safe no-op if already stopped.
    pub fn stop(&self) {
        if self.ticks.is_running() {
            log::debug!("drag engine stopped");
        }
        self.ticks.stop();
    }

    pub fn is_running(&self) -> bool {
        self.ticks.is_running()
    }

    pub fn pointer_down(&self, position: Point, surface: Rect, now_nanos: u64) {
        let mutated =
            sampler::pointer_down(&mut self.state.borrow_mut(), position, surface, now_nanos);
        if mutated {
            self.publish();
        }
    }

    pub fn pointer_move(&self, position: Point, now_nanos: u64) {
        let mutated =
            sampler::pointer_move(&mut self.state.borrow_mut(), &self.config, position, now_nanos);
        if mutated {
            self.publish();
        }
    }

    /// Ends the drag; the last derived velocity becomes the initial
    /// coasting velocity.
    pub fn pointer_up(&self) {
        let mutated = sampler::pointer_up(&mut self.state.borrow_mut());
        if mutated {
            self.publish();
        }
    }

    /// A cancelled pointer (left the surface, stream interrupted) ends
    /// the drag the same way a release does.
    pub fn pointer_cancel(&self) {
        self.pointer_up();
    }

    /// Maps a raw host pointer event onto the sampler operations.
    pub fn handle_pointer(
        &self,
        kind: PointerEventKind,
        position: Point,
        surface: Rect,
        now_nanos: u64,
    ) {
        match kind {
            PointerEventKind::Down => self.pointer_down(position, surface, now_nanos),
            PointerEventKind::Move => self.pointer_move(position, now_nanos),
            PointerEventKind::Up => self.pointer_up(),
            PointerEventKind::Cancel => self.pointer_cancel(),
        }
    }

    pub fn snapshot(&self) -> DragSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    fn publish(&self) {
        let snapshot = self.state.borrow().snapshot();
        (self.observer)(&snapshot);
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
