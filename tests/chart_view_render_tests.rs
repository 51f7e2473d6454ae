use approx::assert_abs_diff_eq;
use ohlc_view::ChartError;
use ohlc_view::api::{ChartStyle, ChartView, ChartViewConfig};
use ohlc_view::core::{Bar, LabelTimeZone, PriceRange, Viewport};
use ohlc_view::render::{NullRenderer, RectPrimitive};

// 2024-03-01T00:00:00Z
const DAY_START: i64 = 1_709_251_200;

fn config() -> ChartViewConfig {
    ChartViewConfig::default().with_label_time_zone(LabelTimeZone::FixedOffsetSeconds(0))
}

fn reference_bars() -> Vec<Bar> {
    vec![
        Bar::new(DAY_START, 10.0, 12.0, 9.0, 11.0, 100),
        Bar::new(DAY_START + 3_600, 11.0, 11.0, 8.0, 9.0, 200),
        Bar::new(DAY_START + 7_200, 9.0, 10.0, 8.0, 9.5, 300),
    ]
}

fn build_view(bars: Vec<Bar>) -> ChartView<NullRenderer> {
    ChartView::new(NullRenderer::default(), Viewport::new(300, 100), bars, config())
        .expect("view init")
}

fn bar_rects(view: &ChartView<NullRenderer>) -> Vec<RectPrimitive> {
    view.build_render_frame().rects.into_iter().skip(1).collect()
}

#[test]
fn reference_bars_map_to_expected_geometry() {
    let view = build_view(reference_bars());
    assert_eq!(view.price_range(), Some(PriceRange::new(8.0, 12.0)));

    let geometry = view.project_bars();
    assert_eq!(geometry.len(), 3);

    let expected = [(0.0, 25.0, 75.0), (100.0, 75.0, 75.0), (200.0, 62.5, 50.0)];
    for (bar, (x, y, height)) in geometry.iter().zip(expected) {
        assert_abs_diff_eq!(bar.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(bar.y, y, epsilon = 1e-9);
        assert_abs_diff_eq!(bar.height, height, epsilon = 1e-9);
        assert_abs_diff_eq!(bar.slot_width, 100.0, epsilon = 1e-9);
    }

    assert!(geometry[0].is_up);
    assert!(!geometry[1].is_up);
    assert!(!geometry[2].is_up);
}

#[test]
fn frame_starts_with_full_surface_border() {
    let view = build_view(reference_bars());
    let frame = view.build_render_frame();
    frame.validate().expect("valid frame");

    let border = frame.rects[0];
    assert_eq!((border.x, border.y, border.width, border.height), (0.0, 0.0, 300.0, 100.0));
    assert!(border.fill.is_none());
    assert!(border.stroke.is_some());
    assert_eq!(frame.clear_color, ChartStyle::default().background_color);
}

#[test]
fn bar_fill_uses_up_and_down_colors() {
    let view = build_view(reference_bars());
    let style = view.config().style;
    let rects = bar_rects(&view);

    assert_eq!(rects.len(), 3);
    assert_eq!(rects[0].fill, Some(style.up_color));
    assert_eq!(rects[1].fill, Some(style.down_color));
    assert_eq!(rects[2].fill, Some(style.down_color));
}

#[test]
fn unchanged_bar_renders_with_down_color() {
    let view = build_view(vec![
        Bar::new(DAY_START, 10.0, 11.0, 9.0, 10.0, 0),
        Bar::new(DAY_START + 60, 10.0, 12.0, 9.0, 10.5, 0),
    ]);
    let style = view.config().style;
    let rects = bar_rects(&view);

    assert!(!view.bars()[0].is_up());
    assert_eq!(rects[0].fill, Some(style.down_color));
    assert_eq!(rects[1].fill, Some(style.up_color));
}

#[test]
fn render_repaints_full_frame_every_time() {
    let mut view = build_view(reference_bars());
    view.render().expect("first render");
    let first = view.renderer().last_frame.clone().expect("frame");
    view.render().expect("second render");

    let renderer = view.into_renderer();
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_rect_count, 4);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(renderer.last_frame, Some(first));
}

#[test]
fn empty_bar_sequence_renders_border_only() {
    let mut view = build_view(Vec::new());
    assert_eq!(view.price_range(), None);
    assert!(view.project_bars().is_empty());

    view.render().expect("render empty chart");
    let renderer = view.into_renderer();
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_text_count, 0);
}

#[test]
fn flat_price_range_draws_bars_at_mid_height() {
    let view = build_view(vec![Bar::new(DAY_START, 5.0, 5.0, 5.0, 5.0, 1)]);
    let range = view.price_range().expect("range");
    assert!(range.is_degenerate());

    let geometry = view.project_bars();
    assert_eq!(geometry.len(), 1);
    assert_abs_diff_eq!(geometry[0].y, 50.0, epsilon = 1e-9);
    assert_eq!(geometry[0].height, 0.0);
    assert_abs_diff_eq!(geometry[0].slot_width, 300.0, epsilon = 1e-9);

    view.build_render_frame().validate().expect("finite frame");
}

#[test]
fn malformed_bar_is_skipped_without_failing_render() {
    let mut view = build_view(vec![
        Bar::new(DAY_START, 10.0, 12.0, 9.0, 11.0, 0),
        Bar::new(DAY_START + 60, 10.0, 12.0, 9.0, f64::NAN, 0),
    ]);
    view.render().expect("render survives malformed bar");
    assert_eq!(view.renderer().last_rect_count, 2);
}

#[test]
fn inverted_high_low_is_normalized_to_positive_height() {
    let view = build_view(vec![
        Bar::new(DAY_START, 10.0, 8.0, 12.0, 11.0, 0),
        Bar::new(DAY_START + 60, 10.0, 14.0, 6.0, 11.0, 0),
    ]);
    let frame = view.build_render_frame();
    frame.validate().expect("valid frame");
    assert!(frame.rects.iter().all(|rect| rect.height >= 0.0));
}

#[test]
fn body_width_ratio_centers_body_in_slot() {
    let style = ChartStyle {
        body_width_ratio: 0.5,
        ..ChartStyle::default()
    };
    let view = ChartView::new(
        NullRenderer::default(),
        Viewport::new(300, 100),
        reference_bars(),
        config().with_style(style),
    )
    .expect("view init");

    let rects = bar_rects(&view);
    assert_abs_diff_eq!(rects[1].x, 125.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[1].width, 50.0, epsilon = 1e-9);
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = ChartView::new(
        NullRenderer::default(),
        Viewport::new(0, 100),
        reference_bars(),
        config(),
    )
    .err()
    .expect("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 100 }));
}

#[test]
fn snapshot_reports_view_state() {
    let view = build_view(reference_bars());
    let snapshot = view.snapshot();
    assert_eq!(snapshot.bar_count, 3);
    assert_eq!(snapshot.price_range, Some(PriceRange::new(8.0, 12.0)));
    assert_eq!(snapshot.transform.scale, 1.0);

    let json = snapshot.to_json_pretty().expect("snapshot json");
    assert!(json.contains("\"bar_count\": 3"));
}
