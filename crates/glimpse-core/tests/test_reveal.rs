mod common;

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;

use common::CONTAINER;
use glimpse_core::geometry::ContainerRect;
use glimpse_core::reveal::RevealController;

#[test]
fn test_pointer_at_quarter_width() {
    let mut reveal = RevealController::default();
    reveal.set_from_pointer(200.0, 0.0, 800.0);
    assert_abs_diff_eq!(reveal.position(), 25.0);
}

#[test]
fn test_offset_container() {
    let mut reveal = RevealController::default();
    reveal.set_from_pointer(350.0, 150.0, 400.0);
    assert_abs_diff_eq!(reveal.position(), 50.0);
    reveal.set_from_pointer(450.0, 150.0, 400.0);
    assert_abs_diff_eq!(reveal.position(), 75.0);
}

#[test]
fn test_clamped_outside_container() {
    let mut reveal = RevealController::default();
    reveal.set_from_pointer(-50.0, 0.0, 800.0);
    assert_eq!(reveal.position(), 0.0);
    reveal.set_from_pointer(5000.0, 0.0, 800.0);
    assert_eq!(reveal.position(), 100.0);
}

#[test]
fn test_idempotent_and_monotonic() {
    let mut reveal = RevealController::default();
    let mut last = f32::NEG_INFINITY;
    for x in (0..=800).step_by(7) {
        let x = x as f32;
        reveal.set_from_pointer(x, 0.0, 800.0);
        let first = reveal.position();
        reveal.set_from_pointer(x, 0.0, 800.0);
        assert_eq!(reveal.position(), first, "not idempotent at x={x}");
        assert!(first >= last, "position decreased at x={x}");
        last = first;
    }
}

#[test]
fn test_zero_width_clamps_to_bounds() {
    let mut reveal = RevealController::default();
    reveal.set_from_pointer(10.0, 0.0, 0.0);
    assert_eq!(reveal.position(), 100.0);
    reveal.set_from_pointer(-10.0, 0.0, 0.0);
    assert_eq!(reveal.position(), 0.0);
    reveal.set_from_pointer(0.0, 0.0, 0.0);
    assert_eq!(reveal.position(), 0.0);
    assert!(!reveal.position().is_nan());
}

#[test]
fn test_nan_pointer_ignored() {
    let mut reveal = RevealController::default();
    reveal.set_from_pointer(f32::NAN, 0.0, 800.0);
    assert_eq!(reveal.position(), 50.0);
    reveal.set_position(f32::NAN);
    assert_eq!(reveal.position(), 50.0);
}

#[test]
fn test_reset() {
    let mut reveal = RevealController::default();
    reveal.set_from_pointer(12.0, 0.0, 800.0);
    reveal.reset();
    assert_eq!(reveal.position(), 50.0);
}

#[test]
fn test_hit_band_independent_of_position() {
    let mut reveal = RevealController::default();
    assert_eq!(reveal.divider_x(&CONTAINER), 400.0);
    assert!(reveal.hit_test(400.0, &CONTAINER, 24.0));
    assert!(reveal.hit_test(412.0, &CONTAINER, 24.0));
    assert!(!reveal.hit_test(413.0, &CONTAINER, 24.0));

    reveal.set_position(10.0);
    assert!(reveal.hit_test(80.0, &CONTAINER, 24.0));
    assert!(!reveal.hit_test(400.0, &CONTAINER, 24.0));
}

#[test]
fn test_clips_are_viewport_anchored() {
    let container = ContainerRect::new(100.0, 50.0, 800.0, 600.0);
    let mut reveal = RevealController::default();
    reveal.set_position(25.0);

    let left = reveal.original_clip(&container);
    let right = reveal.processed_clip(&container);

    assert_eq!(left.left, 100.0);
    assert_eq!(left.right, 300.0);
    assert_eq!(right.left, 300.0);
    assert_eq!(right.right, 900.0);
    assert_eq!(left.top, 50.0);
    assert_eq!(right.bottom, 650.0);
    assert_abs_diff_eq!(left.width() + right.width(), 800.0);
}

#[test]
fn test_subscribe_notifies_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut reveal = RevealController::default();
    let sink = Rc::clone(&seen);
    reveal.subscribe(move |p| sink.borrow_mut().push(*p));

    reveal.set_from_pointer(200.0, 0.0, 800.0);
    reveal.set_from_pointer(200.0, 0.0, 800.0);
    reveal.reset();
    reveal.reset();

    assert_eq!(*seen.borrow(), vec![25.0, 50.0]);
}
