use procchart::api::{ChartConfig, ChartSession};
use procchart::core::{CellValue, RawTable, Viewport};
use procchart::interaction::ScrollEvent;
use procchart::render::NullRenderer;

fn results(unit_count: usize) -> RawTable {
    (0..unit_count).fold(
        RawTable::new(["uniquepart_id", "parameter", "result"]),
        |table, index| {
            table.with_row([
                CellValue::text(format!("U{index:03}")),
                CellValue::text("Pressure"),
                CellValue::Float(9.0 + (index % 4) as f64),
            ])
        },
    )
}

fn limits() -> RawTable {
    RawTable::new(["parameter", "lower ok", "upper ok"]).with_row([
        CellValue::text("Pressure"),
        CellValue::Float(8.0),
        CellValue::Float(11.0),
    ])
}

#[test]
fn every_scroll_event_rerenders() {
    let config = ChartConfig::default().with_window_width(50);
    let mut session =
        ChartSession::build(config, &results(120), &limits(), NullRenderer::default())
            .expect("session");
    assert_eq!(session.viewport_state().max_offset(), 70);

    assert!(session.handle_scroll(ScrollEvent::ScrollTo(200)).expect("scroll"));
    assert_eq!(session.viewport_state().offset(), 70);
    assert!(!session.handle_scroll(ScrollEvent::ScrollBy(5)).expect("scroll"));
    assert!(session.handle_scroll(ScrollEvent::ScrollTo(-5)).expect("scroll"));
    assert_eq!(session.viewport_state().offset(), 0);

    assert_eq!(session.renderer().frames_rendered, 3);
    assert_eq!(session.renderer().last_marker_count, 50);
}

#[test]
fn thumb_drag_maps_through_the_scrollbar_track() {
    let config = ChartConfig::default().with_window_width(50);
    let mut session =
        ChartSession::build(config, &results(120), &limits(), NullRenderer::default())
            .expect("session");

    assert!(session.handle_scroll(ScrollEvent::DragThumbTo(10_000.0)).expect("drag"));
    assert_eq!(session.viewport_state().offset(), 70);
}

#[test]
fn reload_resets_the_viewport() {
    let config = ChartConfig::default().with_window_width(10);
    let mut session =
        ChartSession::build(config, &results(40), &limits(), NullRenderer::default())
            .expect("session");
    session.handle_scroll(ScrollEvent::ScrollTo(25)).expect("scroll");
    assert_eq!(session.viewport_state().offset(), 25);

    session.reload(&results(15), &limits()).expect("reload");
    let state = session.viewport_state();
    assert_eq!(state.offset(), 0);
    assert_eq!(state.total_units(), 15);
    assert_eq!(state.window_width(), 10);
    assert_eq!(session.chart().total_units(), 15);
}

#[test]
fn failed_reload_keeps_previous_chart() {
    let mut session = ChartSession::build(
        ChartConfig::default(),
        &results(20),
        &limits(),
        NullRenderer::default(),
    )
    .expect("session");

    let err = session
        .reload(&RawTable::new(["parameter"]), &limits())
        .expect_err("schema");
    assert!(err.is_schema());
    assert_eq!(session.chart().total_units(), 20);
}

#[test]
fn viewport_changes_are_validated() {
    let mut session = ChartSession::build(
        ChartConfig::default(),
        &results(5),
        &limits(),
        NullRenderer::default(),
    )
    .expect("session");

    assert!(session.set_viewport(Viewport::new(120, 80)).is_err());
    session
        .set_viewport(Viewport::new(1200, 700))
        .expect("resize");
    assert_eq!(session.config().viewport, Viewport::new(1200, 700));
    assert_eq!(session.frame().expect("frame").viewport, Viewport::new(1200, 700));
}
