use super::{run_drag_test, DragTestRule};
use drift_geometry::Rect;

const SECOND: u64 = 1_000_000_000;

#[test]
fn rule_records_every_notification_in_order() {
    let rule = DragTestRule::new();
    rule.press(150.0, 100.0, SECOND);
    rule.drag_to(180.0, 100.0, SECOND + SECOND / 10);
    rule.release();

    let snapshots = rule.snapshots();
    assert_eq!(snapshots.len(), 3);
    assert!(snapshots[0].is_dragging);
    assert!(snapshots[1].is_dragging);
    assert!(!snapshots[2].is_dragging);
    assert_eq!(rule.last_snapshot(), Some(snapshots[2]));
}

#[test]
fn advance_frame_drives_the_engine() {
    let rule = DragTestRule::new();
    assert!(rule.engine().is_running());

    rule.advance_frame(SECOND);
    assert_eq!(rule.notification_count(), 1);
    rule.advance_frame(SECOND + 16_666_667);
    assert_eq!(rule.notification_count(), 2);
}

#[test]
fn take_snapshots_drains_the_log() {
    let rule = DragTestRule::new();
    rule.press(150.0, 100.0, SECOND);

    assert_eq!(rule.take_snapshots().len(), 1);
    assert_eq!(rule.notification_count(), 0);
    assert_eq!(rule.last_snapshot(), None);
}

#[test]
fn surface_rect_is_adjustable() {
    let mut rule = DragTestRule::new();
    rule.set_surface(Rect::new(100.0, 50.0, 200.0, 100.0));

    rule.press(200.0, 100.0, SECOND);
    let snapshot = rule.last_snapshot().expect("press notified");
    assert!(snapshot.is_dragging);
    assert_eq!(rule.surface(), Rect::new(100.0, 50.0, 200.0, 100.0));
}

#[test]
fn run_drag_test_tears_down_cleanly() {
    let final_count = run_drag_test(|rule| {
        rule.press(150.0, 100.0, SECOND);
        rule.release();
        rule.notification_count()
    });
    assert_eq!(final_count, 2);
}
