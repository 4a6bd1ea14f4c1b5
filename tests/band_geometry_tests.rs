use approx::assert_abs_diff_eq;
use vitalchart::core::{
    BandRecord, BandSeries, BandStyle, CategoryKind, ChartComputator, SeverityColors,
    TierColors, TierThresholds, Viewport, hit_test_columns, project_band_columns,
    subcolumn_width_px,
};

fn computator(width: u32, height: u32, viewport: Viewport) -> ChartComputator {
    let mut computator = ChartComputator::new(width, height).expect("computator");
    computator.set_viewports(viewport).expect("viewport");
    computator
}

fn band_computator(records: usize, scale_max: f64) -> ChartComputator {
    let right = records as f64 - 0.5;
    computator(400, 200, Viewport::new(-0.5, scale_max, right, 0.0))
}

#[test]
fn subcolumn_width_scales_with_viewport_and_doubles() {
    let computator = computator(400, 100, Viewport::new(0.0, 100.0, 10.0, 0.0));
    // 0.75 * 400px / 10 units = 30, doubled to 60.
    assert_abs_diff_eq!(subcolumn_width_px(0.75, &computator), 60.0, epsilon = 1e-9);
}

#[test]
fn narrow_subcolumn_floors_at_minimum_before_doubling() {
    let computator = computator(40, 100, Viewport::new(0.0, 100.0, 100.0, 0.0));
    // 0.75 * 40 / 100 = 0.3, floored to 2, doubled to 4.
    assert_abs_diff_eq!(subcolumn_width_px(0.75, &computator), 4.0, epsilon = 1e-9);
}

#[test]
fn backgrounds_span_the_full_category_scale() {
    let computator = band_computator(4, 100.0);
    let series = BandSeries::new(vec![
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new(),
        BandRecord::new().with_stress(10.0, 5.0),
        BandRecord::new(),
    ]);

    let columns =
        project_band_columns(&series, CategoryKind::Stress, &computator).expect("project");
    assert_eq!(columns.len(), 4);
    for column in &columns {
        assert_abs_diff_eq!(column.background.rect.top, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(column.background.rect.bottom, 200.0, epsilon = 1e-9);
    }
    // Record i renders at logical abscissa i.
    assert_abs_diff_eq!(columns[0].center_x, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(columns[3].center_x, 350.0, epsilon = 1e-9);
}

#[test]
fn inner_band_spans_high_to_low() {
    let computator = band_computator(1, 100.0);
    let series = BandSeries::new(vec![BandRecord::new().with_stress(60.0, 30.0)]);

    let columns =
        project_band_columns(&series, CategoryKind::Stress, &computator).expect("project");
    let inner = columns[0].inner.expect("inner band");
    assert_abs_diff_eq!(inner.rect.top, 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(inner.rect.bottom, 140.0, epsilon = 1e-9);
}

#[test]
fn empty_pair_draws_background_only() {
    let computator = band_computator(2, 100.0);
    let series = BandSeries::new(vec![
        BandRecord::new(),
        BandRecord::new().with_stress(60.0, 30.0),
    ]);

    let columns =
        project_band_columns(&series, CategoryKind::Stress, &computator).expect("project");
    assert!(columns[0].inner.is_none());
    assert!(columns[1].inner.is_some());
}

#[test]
fn degenerate_band_keeps_visible_thickness() {
    let computator = band_computator(1, 100.0);
    let series = BandSeries::new(vec![BandRecord::new().with_stress(50.0, 50.0)]);

    let columns =
        project_band_columns(&series, CategoryKind::Stress, &computator).expect("project");
    let inner = columns[0].inner.expect("inner band");
    // high == low re-maps the bottom edge from `high - 6`.
    assert_abs_diff_eq!(inner.rect.top, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(inner.rect.bottom, 112.0, epsilon = 1e-9);
}

#[test]
fn severity_threshold_switches_the_band_color() {
    let computator = band_computator(2, 100.0);
    let severity = SeverityColors {
        threshold: 50.0,
        ..SeverityColors::default()
    };
    let series = BandSeries::new(vec![
        BandRecord::new().with_stress(40.0, 20.0).with_severity(severity),
        BandRecord::new().with_stress(60.0, 20.0).with_severity(severity),
    ]);

    let columns =
        project_band_columns(&series, CategoryKind::Stress, &computator).expect("project");
    let normal = columns[0].inner.expect("inner").color;
    let out_of_range = columns[1].inner.expect("inner").color;
    assert_eq!(normal, severity.normal);
    assert_eq!(out_of_range, severity.out_of_range);
}

#[test]
fn excitement_uses_the_tiered_palette() {
    let computator = band_computator(5, 100.0);
    let series = BandSeries::new(vec![
        BandRecord::new().with_excitement(24.0, 10.0),
        BandRecord::new().with_excitement(25.0, 10.0),
        BandRecord::new().with_excitement(26.0, 10.0),
        BandRecord::new().with_excitement(75.0, 10.0),
        BandRecord::new().with_excitement(76.0, 10.0),
    ]);

    let columns =
        project_band_columns(&series, CategoryKind::Excitement, &computator).expect("project");
    let palette = TierColors::default();
    let colors: Vec<_> = columns
        .iter()
        .map(|column| column.inner.expect("inner").color)
        .collect();
    assert_eq!(
        colors,
        vec![palette.low, palette.low, palette.mid, palette.mid, palette.high]
    );
}

#[test]
fn tier_thresholds_reject_inverted_bounds() {
    let thresholds = TierThresholds {
        low_max: 80.0,
        mid_max: 40.0,
    };
    assert!(thresholds.validate().is_err());

    let style = BandStyle::default().with_tier_thresholds(thresholds);
    assert!(style.validate().is_err());
}

#[test]
fn hit_test_returns_the_first_containing_bar() {
    let computator = band_computator(4, 100.0);
    let series = BandSeries::new(vec![
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new().with_stress(60.0, 30.0),
        BandRecord::new(),
        BandRecord::new(),
    ]);

    let columns =
        project_band_columns(&series, CategoryKind::Stress, &computator).expect("project");

    // Anywhere inside the background counts, not only the inner band.
    let hit = hit_test_columns(&columns, 150.0, 190.0).expect("hit");
    assert_eq!(hit.index, 1);

    // Doubled widths make neighbors overlap; the first containing bar wins.
    let hit = hit_test_columns(&columns, 100.0, 190.0).expect("hit");
    assert_eq!(hit.index, 0);

    // Outside every bar.
    assert!(hit_test_columns(&columns, 150.0, 500.0).is_none());
}

#[test]
fn inverted_range_pair_fails_validation() {
    let record = BandRecord::new().with_stress(10.0, 20.0);
    assert!(record.validate().is_err());
}
