use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use serde_json::Value;
use vitalchart::api::BandClickListener;
use vitalchart::core::{BandRecord, BandSeries, CategoryKind, ColorPolicy, Viewport};
use vitalchart::render::NullRenderer;
use vitalchart::{BandChart, BandChartConfig};

fn stress_chart(records: Vec<BandRecord>) -> BandChart<NullRenderer> {
    let config = BandChartConfig::new(400, 200, CategoryKind::Stress);
    let mut chart = BandChart::new(NullRenderer::default(), config).expect("chart");
    chart.set_data(BandSeries::new(records)).expect("data");
    chart
}

#[derive(Default)]
struct RecordingListener {
    clicks: Rc<RefCell<Vec<(CategoryKind, usize, f64)>>>,
}

impl BandClickListener for RecordingListener {
    fn band_clicked(&mut self, category: CategoryKind, bar_index: usize, center_x: f64) {
        self.clicks.borrow_mut().push((category, bar_index, center_x));
    }
}

#[test]
fn draw_renders_backgrounds_and_inner_bands() {
    let mut chart = stress_chart(vec![
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new(),
        BandRecord::new().with_stress(80.0, 40.0),
    ]);
    chart.draw().expect("draw");

    let renderer = chart.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    // 3 backgrounds + 2 inner bands.
    assert_eq!(renderer.last_rect_count, 5);
}

#[test]
fn category_profile_picks_scale_and_policy() {
    let heart = BandChart::new(
        NullRenderer::default(),
        BandChartConfig::new(400, 200, CategoryKind::HeartRate),
    )
    .expect("chart");
    assert_abs_diff_eq!(heart.profile().scale_max, 200.0, epsilon = 1e-9);
    assert_eq!(heart.profile().color_policy, ColorPolicy::Severity);

    let excitement = BandChart::new(
        NullRenderer::default(),
        BandChartConfig::new(400, 200, CategoryKind::Excitement),
    )
    .expect("chart");
    assert_abs_diff_eq!(excitement.profile().scale_max, 100.0, epsilon = 1e-9);
    assert_eq!(excitement.profile().color_policy, ColorPolicy::Tiered);
}

#[test]
fn viewport_pads_half_a_slot_on_each_side() {
    let chart = stress_chart(vec![
        BandRecord::new(),
        BandRecord::new(),
        BandRecord::new(),
        BandRecord::new(),
    ]);

    let viewport = chart.computator().current_viewport();
    assert_eq!(viewport, Viewport::new(-0.5, 100.0, 3.5, 0.0));
}

#[test]
fn click_selects_the_bar_and_notifies_the_listener() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let listener = RecordingListener {
        clicks: Rc::clone(&clicks),
    };

    let mut chart = stress_chart(vec![
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new().with_stress(60.0, 30.0),
    ]);
    chart.set_click_listener(Box::new(listener));

    // Bar 3 centers at x = 350 on the 4-slot layout.
    assert!(chart.on_pointer(350.0, 150.0).expect("pointer"));
    assert_eq!(chart.selected_bar(), Some(3));

    let events = clicks.borrow();
    assert_eq!(events.len(), 1);
    let (category, index, center_x) = events[0];
    assert_eq!(category, CategoryKind::Stress);
    assert_eq!(index, 3);
    assert_abs_diff_eq!(center_x, 350.0, epsilon = 1e-9);
}

#[test]
fn repeated_click_on_the_same_bar_is_not_a_change() {
    let mut chart = stress_chart(vec![
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new().with_stress(60.0, 30.0),
    ]);

    assert!(chart.on_pointer(300.0, 150.0).expect("pointer"));
    assert!(!chart.on_pointer(300.0, 160.0).expect("pointer"));
    assert_eq!(chart.selected_bar(), Some(1));
}

#[test]
fn miss_clears_the_selected_bar() {
    let mut chart = stress_chart(vec![BandRecord::new().with_stress(60.0, 30.0)]);

    assert!(chart.on_pointer(200.0, 100.0).expect("pointer"));
    assert!(chart.on_pointer(200.0, 500.0).expect("pointer"));
    assert_eq!(chart.selected_bar(), None);
    assert!(!chart.on_pointer(200.0, 500.0).expect("pointer"));
}

#[test]
fn rebinding_data_clears_the_selected_bar() {
    let mut chart = stress_chart(vec![
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new().with_stress(60.0, 30.0),
    ]);
    assert!(chart.on_pointer(100.0, 100.0).expect("pointer"));

    chart
        .set_data(BandSeries::new(vec![BandRecord::new()]))
        .expect("rebind");
    assert_eq!(chart.selected_bar(), None);
    chart.draw().expect("draw after rebind");
}

#[test]
fn invalid_record_is_rejected_at_set_data() {
    let config = BandChartConfig::new(400, 200, CategoryKind::Stress);
    let mut chart = BandChart::new(NullRenderer::default(), config).expect("chart");
    let inverted = BandRecord::new().with_stress(10.0, 20.0);
    assert!(chart.set_data(BandSeries::new(vec![inverted])).is_err());
}

#[test]
fn snapshot_serializes_state_and_frame() {
    let mut chart = stress_chart(vec![BandRecord::new().with_stress(60.0, 30.0)]);
    chart.set_metadata_entry("day", "2026-08-29");

    let json = chart.snapshot_json_pretty().expect("snapshot");
    let value: Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["record_count"], 1);
    assert_eq!(value["category"], "Stress");
    assert_eq!(value["metadata"]["day"], "2026-08-29");
    assert!(value["frame"]["rects"].is_array());
    assert_eq!(value["frame"]["rects"].as_array().expect("rects").len(), 2);
}
