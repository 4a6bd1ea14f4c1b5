use crate::core::band::CategoryKind;
use crate::core::sample::PointSample;
use crate::interaction::Selection;

/// Per-instance callback for line-chart value touches.
///
/// Registered via [`crate::api::LineChart::set_touch_listener`]; each chart
/// owns its listener, there is no process-wide registration.
pub trait LineTouchListener {
    /// A sample was hit. `selection` holds the winning (series, sample) pair.
    fn value_touched(&mut self, selection: Selection, sample: &PointSample);

    /// The pointer landed on no sample; any previous selection was cleared.
    fn nothing_touched(&mut self) {}
}

/// Per-instance callback for band-chart bar clicks.
///
/// `center_x` is the horizontal pixel center of the clicked bar, matching
/// what popups anchored to the bar need.
pub trait BandClickListener {
    fn band_clicked(&mut self, category: CategoryKind, bar_index: usize, center_x: f64);
}
