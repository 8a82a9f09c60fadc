//! Headless test harness for drift engines.

mod testing;

pub use testing::{run_drag_test, DragTestRule};
