//! Engine facades consumed by host applications.
//!
//! A chart instance owns its computator, bound data, selection state,
//! listeners and renderer; hosts drive it with `set_data`, `draw` and
//! `on_pointer`.

mod band_chart;
mod line_chart;
mod listeners;

pub use band_chart::{BandChart, BandChartConfig};
pub use line_chart::{LineChart, LineChartConfig};
pub use listeners::{BandClickListener, LineTouchListener};
