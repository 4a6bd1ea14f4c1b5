use approx::assert_abs_diff_eq;
use vitalchart::core::{
    ChartComputator, FillStyle, LineSeries, LineStyle, PointSample, Viewport,
    project_line_path,
};
use vitalchart::render::{Color, GradientStop, Paint, PathVerb};

fn computator() -> ChartComputator {
    let mut computator = ChartComputator::new(100, 100).expect("computator");
    computator
        .set_viewports(Viewport::new(0.0, 10.0, 10.0, 0.0))
        .expect("viewport");
    computator
}

fn samples(values: &[(f64, f64)]) -> Vec<PointSample> {
    values.iter().map(|&(x, y)| PointSample::new(x, y)).collect()
}

#[test]
fn short_series_produces_empty_geometry() {
    let computator = computator();

    let empty = LineSeries::new(Vec::new());
    let geometry = project_line_path(&empty, &computator).expect("project");
    assert!(geometry.stroke.is_none());
    assert!(geometry.fill.is_none());

    let single = LineSeries::new(samples(&[(5.0, 5.0)]));
    let geometry = project_line_path(&single, &computator).expect("project");
    assert!(geometry.stroke.is_none());
}

#[test]
fn straight_path_connects_mapped_points() {
    let computator = computator();
    let series = LineSeries::new(samples(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]));

    let geometry = project_line_path(&series, &computator).expect("project");
    let stroke = geometry.stroke.expect("stroke");
    assert_eq!(stroke.verbs.len(), 3);
    assert_eq!(stroke.verbs[0], PathVerb::MoveTo { x: 0.0, y: 100.0 });
    assert_eq!(stroke.verbs[1], PathVerb::LineTo { x: 50.0, y: 50.0 });
    assert_eq!(stroke.verbs[2], PathVerb::LineTo { x: 100.0, y: 0.0 });
    assert!(geometry.fill.is_none());
}

#[test]
fn gap_on_zero_breaks_the_path() {
    let computator = computator();
    let style = LineStyle::default().with_gap_on_zero(true);
    let series =
        LineSeries::new(samples(&[(0.0, 1.0), (1.0, 0.0), (2.0, 2.0), (3.0, 3.0)]))
            .with_style(style);

    let stroke = project_line_path(&series, &computator)
        .expect("project")
        .stroke
        .expect("stroke");

    // The zero sample emits no vertex; the path restarts after it.
    assert_eq!(stroke.verbs.len(), 3);
    assert!(matches!(stroke.verbs[0], PathVerb::MoveTo { .. }));
    assert!(matches!(stroke.verbs[1], PathVerb::MoveTo { .. }));
    assert!(matches!(stroke.verbs[2], PathVerb::LineTo { .. }));
}

#[test]
fn solid_fill_closes_to_baseline_over_series_extent() {
    let computator = computator();
    let style = LineStyle::default()
        .with_fill(FillStyle::Solid(Color::rgb(0.2, 0.4, 0.6)))
        .with_base_value(0.0);
    let series =
        LineSeries::new(samples(&[(2.0, 1.0), (5.0, 2.0), (8.0, 1.0)])).with_style(style);

    let fill = project_line_path(&series, &computator)
        .expect("project")
        .fill
        .expect("fill");

    let n = fill.verbs.len();
    // Closure: down to baseline under the last sample, across to the first
    // sample's x, back up to the first vertex.
    assert_eq!(fill.verbs[n - 3], PathVerb::LineTo { x: 80.0, y: 100.0 });
    assert_eq!(fill.verbs[n - 2], PathVerb::LineTo { x: 20.0, y: 100.0 });
    assert_eq!(fill.verbs[n - 1], PathVerb::LineTo { x: 20.0, y: 90.0 });
    assert!(matches!(fill.paint, Paint::Solid(_)));
}

#[test]
fn baseline_outside_viewport_is_clamped_into_content_rect() {
    let computator = computator();
    // Base value far above the viewport top: the fill baseline must clamp to
    // the content top, never leave the rect.
    let style = LineStyle::default()
        .with_fill(FillStyle::Solid(Color::rgb(0.2, 0.4, 0.6)))
        .with_base_value(100.0);
    let series = LineSeries::new(samples(&[(0.0, 1.0), (10.0, 2.0)])).with_style(style);

    let fill = project_line_path(&series, &computator)
        .expect("project")
        .fill
        .expect("fill");

    let n = fill.verbs.len();
    match (fill.verbs[n - 3], fill.verbs[n - 2]) {
        (PathVerb::LineTo { y: y1, .. }, PathVerb::LineTo { y: y2, .. }) => {
            assert_abs_diff_eq!(y1, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(y2, 0.0, epsilon = 1e-9);
        }
        other => panic!("unexpected closure verbs: {other:?}"),
    }
}

#[test]
fn gradient_band_closes_to_content_rect_and_suppresses_stroke() {
    let computator = computator();
    let stops = vec![
        GradientStop::new(Color::rgb(1.0, 0.0, 0.0), 0.0),
        GradientStop::new(Color::rgb(0.0, 0.0, 1.0), 1.0),
    ];
    let style = LineStyle::default()
        .with_fill(FillStyle::GradientBand(stops))
        .with_base_value(0.0);
    let series =
        LineSeries::new(samples(&[(2.0, 4.0), (5.0, 8.0), (8.0, 4.0)])).with_style(style);

    let geometry = project_line_path(&series, &computator).expect("project");
    assert!(geometry.stroke.is_none());

    let fill = geometry.fill.expect("fill");
    let n = fill.verbs.len();
    // Closed to the full content rect edges, not the series x-extent.
    assert_eq!(fill.verbs[n - 3], PathVerb::LineTo { x: 100.0, y: 100.0 });
    assert_eq!(fill.verbs[n - 2], PathVerb::LineTo { x: 0.0, y: 100.0 });

    match &fill.paint {
        Paint::LinearGradient { y1, y2, stops, .. } => {
            // Vertical gradient from the content top down to the baseline.
            assert_abs_diff_eq!(*y1, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(*y2, 100.0, epsilon = 1e-9);
            assert_eq!(stops.len(), 2);
        }
        other => panic!("expected linear gradient, got {other:?}"),
    }
}

#[test]
fn non_monotonic_gradient_stops_fail_validation() {
    let stops = vec![
        GradientStop::new(Color::rgb(1.0, 0.0, 0.0), 0.8),
        GradientStop::new(Color::rgb(0.0, 0.0, 1.0), 0.2),
    ];
    let style = LineStyle::default().with_fill(FillStyle::Gradient(stops));
    assert!(style.validate().is_err());
}

#[test]
fn gap_on_zero_with_fill_fails_validation() {
    let style = LineStyle::default()
        .with_gap_on_zero(true)
        .with_fill(FillStyle::Solid(Color::rgb(0.1, 0.2, 0.3)));
    assert!(style.validate().is_err());
}
