use super::{tick_source, IntervalTickSource, StdRuntime, StdScheduler};
use drift_core::{RuntimeScheduler, SchedulerMode, TickSource};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn scheduler_records_and_hands_out_frame_requests() {
    let scheduler = StdScheduler::new();
    assert!(!scheduler.take_frame_request());

    scheduler.schedule_frame();
    assert!(scheduler.take_frame_request());
    assert!(!scheduler.take_frame_request(), "request is consumed");
}

#[test]
fn scheduler_wakes_registered_waker() {
    let scheduler = StdScheduler::new();
    let wakes = Arc::new(AtomicU32::new(0));
    let wakes_in_waker = Arc::clone(&wakes);
    scheduler.set_frame_waker(move || {
        wakes_in_waker.fetch_add(1, Ordering::SeqCst);
    });

    scheduler.schedule_frame();
    scheduler.schedule_frame();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);

    scheduler.clear_frame_waker();
    scheduler.schedule_frame();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
}

#[test]
fn interval_source_posts_self_supplied_timestamps() {
    let runtime = StdRuntime::new();
    let source = IntervalTickSource::with_period(&runtime, Duration::from_millis(2));
    let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

    let seen_in_sink = Rc::clone(&seen);
    source.start(Rc::new(move |time| seen_in_sink.borrow_mut().push(time)));
    assert!(source.is_running());

    std::thread::sleep(Duration::from_millis(40));
    assert!(
        runtime.take_frame_request(),
        "posted ticks request a host frame"
    );
    runtime.pump();

    let ticks = seen.borrow().clone();
    assert!(!ticks.is_empty(), "timer delivered at least one tick");
    for pair in ticks.windows(2) {
        assert!(pair[0] < pair[1], "timestamps are monotonic: {:?}", ticks);
    }

    source.stop();
    assert!(!source.is_running());
    runtime.pump();
    let after_stop = seen.borrow().len();

    std::thread::sleep(Duration::from_millis(20));
    runtime.pump();
    assert_eq!(seen.borrow().len(), after_stop, "no ticks after stop");

    // Stopping again is a safe no-op.
    source.stop();
}

#[test]
fn interval_source_start_is_idempotent() {
    let runtime = StdRuntime::new();
    let source = IntervalTickSource::with_period(&runtime, Duration::from_millis(2));
    let count: Rc<RefCell<u32>> = Rc::new(RefCell::new(0));

    let count_in_sink = Rc::clone(&count);
    source.start(Rc::new(move |_| *count_in_sink.borrow_mut() += 1));
    // A second start must not spawn a second timer or re-arm delivery.
    source.start(Rc::new(|_| panic!("second sink must not be installed")));

    std::thread::sleep(Duration::from_millis(10));
    runtime.pump();
    assert!(*count.borrow() > 0);

    source.stop();
}

#[test]
fn tick_source_selects_backend_by_mode() {
    let runtime = StdRuntime::new();

    let frame_synced = tick_source(SchedulerMode::FrameSynced, &runtime);
    let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_in_sink = Rc::clone(&seen);
    frame_synced.start(Rc::new(move |time| seen_in_sink.borrow_mut().push(time)));

    // Frame-synced ticks use host-supplied timestamps.
    runtime.drain_frame_callbacks(16_000_000);
    runtime.drain_frame_callbacks(32_000_000);
    assert_eq!(seen.borrow().as_slice(), &[16_000_000, 32_000_000]);
    frame_synced.stop();

    let fixed = tick_source(SchedulerMode::FixedInterval, &runtime);
    assert!(!fixed.is_running());
    fixed.start(Rc::new(|_| {}));
    assert!(fixed.is_running());
    fixed.stop();
}
