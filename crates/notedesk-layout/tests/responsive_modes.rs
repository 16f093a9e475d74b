use notedesk_layout::{
    CardId, ColumnMetrics, LayoutConfig, LayoutMode, compute_layout, compute_layout_for_mode,
    compute_layout_with_metrics,
};
use proptest::prelude::*;

fn wide_reference() -> notedesk_layout::DeskLayout {
    compute_layout_for_mode(LayoutMode::Wide, 432.0, 28.0, 40.0)
}

#[test]
fn metrics_and_layout_agree_on_mode() {
    let cfg = LayoutConfig::default();
    for width in [320.0, 899.0, 900.0, 1100.0, 1279.0, 1280.0, 1920.0] {
        let metrics = ColumnMetrics::for_viewport(width, &cfg);
        let layout = compute_layout_with_metrics(&metrics);
        assert_eq!(layout.mode(), LayoutMode::from_viewport_width(width), "width {width}");
        assert_eq!(layout.column_width(), metrics.column_width);
    }
}

#[test]
fn layout_serializes_for_hosts() {
    let layout = compute_layout(1440.0, 432.0, 28.0, 40.0);
    let json = serde_json::to_value(&layout).expect("layout should serialize");
    assert_eq!(json["mode"], "wide");
    assert_eq!(json["positions"]["skills"]["x"], 960.0);
    let back: notedesk_layout::DeskLayout =
        serde_json::from_value(json).expect("layout should deserialize");
    assert_eq!(back, layout);
}

proptest! {
    #[test]
    fn wide_widths_always_yield_the_wide_set(width in 1280.0f64..5000.0) {
        prop_assert_eq!(compute_layout(width, 432.0, 28.0, 40.0), wide_reference());
    }

    #[test]
    fn medium_widths_always_yield_the_medium_set(width in 900.0f64..1280.0) {
        let expected = compute_layout_for_mode(LayoutMode::Medium, 432.0, 28.0, 40.0);
        prop_assert_eq!(compute_layout(width, 432.0, 28.0, 40.0), expected);
    }

    #[test]
    fn narrow_widths_always_yield_the_narrow_set(width in 0.0f64..900.0) {
        let l = compute_layout(width, 340.0, 28.0, 40.0);
        prop_assert_eq!(l.mode(), LayoutMode::Narrow);
        prop_assert!(l.iter().all(|(_, p)| p.x == 40.0));
    }

    #[test]
    fn layout_is_deterministic(width in 0.0f64..4000.0, col in 200.0f64..600.0) {
        prop_assert_eq!(
            compute_layout(width, col, 28.0, 40.0),
            compute_layout(width, col, 28.0, 40.0)
        );
    }

    #[test]
    fn every_card_is_placed_for_any_width(width in 0.0f64..4000.0) {
        let metrics = ColumnMetrics::for_viewport(width, &LayoutConfig::default());
        let l = compute_layout_with_metrics(&metrics);
        for id in CardId::PLACED {
            prop_assert!(l.get(id).is_some());
        }
    }
}
