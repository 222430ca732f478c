use procchart::interaction::{ScrollEvent, ScrollbarGeometry, ViewportController};

#[test]
fn scroll_clamps_to_valid_offsets() {
    let mut controller = ViewportController::new(120, 50);
    assert_eq!(controller.state().max_offset(), 70);

    controller.scroll_to(200);
    assert_eq!(controller.state().offset(), 70);
    assert_eq!(controller.visible_range(), 70..120);

    controller.scroll_to(-5);
    assert_eq!(controller.state().offset(), 0);
    assert_eq!(controller.visible_range(), 0..50);

    controller.scroll_by(i64::MIN);
    assert_eq!(controller.state().offset(), 0);
    controller.scroll_by(i64::MAX);
    assert_eq!(controller.state().offset(), 70);
}

#[test]
fn resize_reclamps_offset() {
    let mut controller = ViewportController::new(120, 50);
    controller.scroll_to(70);

    controller.resize(100);
    assert_eq!(controller.state().max_offset(), 20);
    assert_eq!(controller.state().offset(), 20);

    controller.resize(0);
    assert_eq!(controller.state().window_width(), 1);
    assert_eq!(controller.state().max_offset(), 119);
    assert_eq!(controller.visible_range(), 20..21);
}

#[test]
fn reset_returns_to_first_unit_and_keeps_window() {
    let mut controller = ViewportController::new(120, 50);
    controller.scroll_to(33);
    controller.reset(10);

    let state = controller.state();
    assert_eq!(state.offset(), 0);
    assert_eq!(state.window_width(), 50);
    assert_eq!(state.total_units(), 10);
    assert_eq!(state.max_offset(), 0);
}

#[test]
fn empty_data_has_an_empty_window() {
    let mut controller = ViewportController::new(0, 38);
    assert!(!controller.handle(ScrollEvent::ScrollTo(5)));
    assert!(controller.visible_range().is_empty());
}

#[test]
fn events_drive_the_same_transitions() {
    let mut controller = ViewportController::new(120, 50);
    assert!(controller.handle(ScrollEvent::ScrollTo(200)));
    assert!(!controller.handle(ScrollEvent::ScrollBy(1)));
    assert!(controller.handle(ScrollEvent::Resize(60)));
    assert_eq!(controller.state().offset(), 60);
}

#[test]
fn scrollbar_thumb_round_trips_through_offsets() {
    let mut controller = ViewportController::new(200, 40);
    controller.set_scrollbar_track(100.0, 900.0);

    for offset in [0_i64, 1, 37, 80, 159, 160] {
        controller.scroll_to(offset);
        let geometry = controller.scrollbar().expect("track set");
        assert_eq!(
            geometry.offset_for_thumb_left(geometry.thumb_left),
            controller.state().offset() as i64
        );
        assert!(geometry.thumb_left >= 100.0);
        assert!(geometry.thumb_right() <= 900.0 + 1e-9);
    }

    let whole = ScrollbarGeometry::for_state(ViewportController::new(5, 40).state(), 0.0, 300.0);
    assert_eq!(whole.thumb_width, 300.0);
    assert_eq!(whole.offset_for_thumb_left(150.0), 0);
}

#[test]
fn deserialized_state_must_respect_viewport_invariants() {
    use procchart::interaction::ViewportState;

    let mut controller = ViewportController::new(120, 50);
    controller.scroll_to(40);
    let json = serde_json::to_string(&controller.state()).expect("serialize");
    let restored: ViewportState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, controller.state());

    let past_end = r#"{"offset":90,"window_width":50,"total_units":120}"#;
    assert!(serde_json::from_str::<ViewportState>(past_end).is_err());
    let zero_width = r#"{"offset":0,"window_width":0,"total_units":120}"#;
    assert!(serde_json::from_str::<ViewportState>(zero_width).is_err());
}
