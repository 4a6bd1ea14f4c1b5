use approx::assert_abs_diff_eq;
use vitalchart::core::{ChartComputator, Viewport};

fn computator(width: u32, height: u32, viewport: Viewport) -> ChartComputator {
    let mut computator = ChartComputator::new(width, height).expect("computator");
    computator.set_viewports(viewport).expect("viewport");
    computator
}

#[test]
fn rejects_zero_size_surface() {
    assert!(ChartComputator::new(0, 100).is_err());
    assert!(ChartComputator::new(100, 0).is_err());
}

#[test]
fn maps_viewport_corners_to_content_corners() {
    let computator = computator(800, 600, Viewport::new(0.0, 100.0, 10.0, 0.0));

    assert_abs_diff_eq!(computator.screen_x(0.0).expect("x"), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(computator.screen_x(10.0).expect("x"), 800.0, epsilon = 1e-9);
    // Inverted Y: the viewport top (maximum value) maps to pixel 0.
    assert_abs_diff_eq!(computator.screen_y(100.0).expect("y"), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(computator.screen_y(0.0).expect("y"), 600.0, epsilon = 1e-9);
    assert_abs_diff_eq!(computator.screen_y(50.0).expect("y"), 300.0, epsilon = 1e-9);
}

#[test]
fn round_trips_points_inside_viewport() {
    let computator = computator(1000, 500, Viewport::new(-5.0, 42.0, 25.0, -3.0));

    for (x, y) in [(-5.0, -3.0), (0.0, 0.0), (12.5, 21.0), (25.0, 42.0)] {
        let px = computator.screen_x(x).expect("to pixel");
        let py = computator.screen_y(y).expect("to pixel");
        assert_abs_diff_eq!(computator.logical_x(px).expect("back"), x, epsilon = 1e-9);
        assert_abs_diff_eq!(computator.logical_y(py).expect("back"), y, epsilon = 1e-9);
    }
}

#[test]
fn degenerate_viewport_does_not_divide_by_zero() {
    let computator = computator(400, 300, Viewport::new(5.0, 7.0, 5.0, 7.0));

    let x = computator.screen_x(5.0).expect("x");
    let y = computator.screen_y(7.0).expect("y");
    assert!(x.is_finite());
    assert!(y.is_finite());
}

#[test]
fn internal_margin_insets_content_rect() {
    let mut computator = ChartComputator::new(800, 600).expect("computator");
    computator.set_internal_margin(10.0).expect("margin");

    let content = computator.content_rect();
    assert_abs_diff_eq!(content.left, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(content.top, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(content.right, 790.0, epsilon = 1e-9);
    assert_abs_diff_eq!(content.bottom, 590.0, epsilon = 1e-9);
}

#[test]
fn oversized_margin_is_clamped_not_rejected() {
    let mut computator = ChartComputator::new(100, 100).expect("computator");
    computator.set_internal_margin(500.0).expect("margin");

    let content = computator.content_rect();
    assert!(content.width() > 0.0);
    assert!(content.height() > 0.0);
}

#[test]
fn negative_margin_is_rejected() {
    let mut computator = ChartComputator::new(100, 100).expect("computator");
    assert!(computator.set_internal_margin(-1.0).is_err());
}

#[test]
fn current_viewport_is_constrained_inside_max() {
    let mut computator = ChartComputator::new(800, 600).expect("computator");
    computator
        .set_max_viewport(Viewport::new(0.0, 100.0, 10.0, 0.0))
        .expect("max viewport");
    computator
        .set_current_viewport(Viewport::new(-5.0, 150.0, 20.0, -10.0))
        .expect("current viewport");

    let current = computator.current_viewport();
    assert_abs_diff_eq!(current.left, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(current.right, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(current.top, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(current.bottom, 0.0, epsilon = 1e-9);
}

#[test]
fn inverted_viewport_is_rejected() {
    let mut computator = ChartComputator::new(800, 600).expect("computator");
    assert!(
        computator
            .set_current_viewport(Viewport::new(10.0, 0.0, 0.0, 100.0))
            .is_err()
    );
}

#[test]
fn inside_content_honors_tolerance() {
    let computator = computator(100, 100, Viewport::default());

    assert!(computator.is_inside_content(50.0, 50.0, 0.0));
    assert!(computator.is_inside_content(-1.5, 50.0, 2.0));
    assert!(!computator.is_inside_content(-3.0, 50.0, 2.0));
    assert!(computator.is_inside_content(50.0, 101.9, 2.0));
    assert!(!computator.is_inside_content(50.0, 103.0, 2.0));
}

#[test]
fn transforms_are_pure_reads() {
    let computator = computator(640, 480, Viewport::new(0.0, 10.0, 20.0, 0.0));
    let before = computator.clone();

    let _ = computator.screen_x(3.0).expect("x");
    let _ = computator.screen_y(7.0).expect("y");
    let _ = computator.logical_x(100.0).expect("lx");
    let _ = computator.logical_y(100.0).expect("ly");

    assert_eq!(computator, before);
}
