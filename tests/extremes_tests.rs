use approx::assert_abs_diff_eq;
use vitalchart::core::{ChartComputator, PointSample, Viewport};
use vitalchart::extensions::{ExtremesMarkers, project_extremes};
use vitalchart::render::MarkerKind;

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
fn finds_max_and_min_excluding_the_sentinel() {
    let computator = computator();
    let config = ExtremesMarkers::new("arrow-up", "arrow-down");
    let samples = samples(&[(0.0, 0.0), (1.0, 5.0), (2.0, 9.0), (3.0, 2.0)]);

    let visuals = project_extremes(&config, &samples, &computator)
        .expect("project")
        .expect("visuals");

    assert_eq!(visuals.markers.len(), 2);
    assert_eq!(visuals.markers[0].kind, MarkerKind::Sprite("arrow-up".to_owned()));
    assert_eq!(visuals.markers[1].kind, MarkerKind::Sprite("arrow-down".to_owned()));
    // The zero sample is the sentinel, not the minimum.
    assert_eq!(visuals.labels[0].text, "9");
    assert_eq!(visuals.labels[1].text, "2");
}

#[test]
fn max_glyph_clamps_to_the_content_top() {
    let computator = computator();
    let config = ExtremesMarkers::new("arrow-up", "arrow-down");
    let samples = samples(&[(1.0, 5.0), (2.0, 9.0)]);

    let visuals = project_extremes(&config, &samples, &computator)
        .expect("project")
        .expect("visuals");

    // Sample maps to y = 10; a 16px glyph above it would leave the rect.
    assert_abs_diff_eq!(visuals.markers[0].x, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visuals.markers[0].y, 8.0, epsilon = 1e-9);
}

#[test]
fn min_glyph_hangs_below_the_sample() {
    let computator = computator();
    let config = ExtremesMarkers::new("arrow-up", "arrow-down");
    let samples = samples(&[(1.0, 5.0), (3.0, 2.0)]);

    let visuals = project_extremes(&config, &samples, &computator)
        .expect("project")
        .expect("visuals");

    // Min sample maps to (30, 80); glyph center is gap + half sprite below.
    assert_abs_diff_eq!(visuals.markers[1].x, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visuals.markers[1].y, 92.0, epsilon = 1e-9);
}

#[test]
fn value_label_flips_left_at_the_content_edge() {
    let computator = computator();
    let config = ExtremesMarkers::new("arrow-up", "arrow-down");
    let samples = samples(&[(1.0, 2.0), (10.0, 9.0)]);

    let visuals = project_extremes(&config, &samples, &computator)
        .expect("project")
        .expect("visuals");

    // Max sample sits at the right edge (x = 100): the default right-of-glyph
    // placement would overflow, so the label flips to its left.
    assert_abs_diff_eq!(visuals.labels[0].x, 81.0, epsilon = 1e-9);
    // The min label fits right of its glyph.
    assert_abs_diff_eq!(visuals.labels[1].x, 22.0, epsilon = 1e-9);
}

#[test]
fn all_sentinel_series_produces_no_visuals() {
    let computator = computator();
    let config = ExtremesMarkers::new("arrow-up", "arrow-down");
    let samples = samples(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

    let visuals = project_extremes(&config, &samples, &computator).expect("project");
    assert!(visuals.is_none());
}

#[test]
fn custom_sentinel_value_is_honored() {
    let computator = computator();
    let config = ExtremesMarkers::new("arrow-up", "arrow-down").with_exclude_value(-1.0);
    let samples = samples(&[(0.0, -1.0), (1.0, 0.0), (2.0, 4.0)]);

    let visuals = project_extremes(&config, &samples, &computator)
        .expect("project")
        .expect("visuals");
    assert_eq!(visuals.labels[0].text, "4");
    assert_eq!(visuals.labels[1].text, "0");
}

#[test]
fn empty_sprite_keys_fail_validation() {
    assert!(ExtremesMarkers::new("", "arrow-down").validate().is_err());
    assert!(ExtremesMarkers::new("arrow-up", "").validate().is_err());
    assert!(ExtremesMarkers::new("arrow-up", "arrow-down").validate().is_ok());
}
