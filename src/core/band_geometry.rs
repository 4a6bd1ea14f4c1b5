use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::band::{BandSeries, CategoryKind, CategoryProfile, ColorPolicy};
use crate::core::computator::{ChartComputator, MIN_VIEWPORT_SPAN, PixelRect};
use crate::error::ChartResult;
use crate::render::RectPrimitive;

/// Lower bound for one subcolumn before the doubling factor applies.
pub const MIN_SUBCOLUMN_WIDTH_PX: f64 = 2.0;

/// Legacy visual tuning: the computed subcolumn width is doubled. Kept as a
/// named constant, not derived.
pub const COLUMN_WIDTH_DOUBLING: f64 = 2.0;

/// Logical units subtracted from `high` when a band maps to zero height, so
/// a single-value reading still renders with visible thickness.
pub const DEGENERATE_BAND_DROP: f64 = 6.0;

/// Geometry for one projected bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandColumn {
    pub index: usize,
    /// Full-height background spanning the category's fixed scale. Also the
    /// hit-test target.
    pub background: RectPrimitive,
    /// Inner rounded value band; `None` when the record has no reading.
    pub inner: Option<RectPrimitive>,
    pub center_x: f64,
}

/// Computes the on-screen width of one subcolumn.
///
/// `fill_ratio x content width / visible viewport width`, floored at
/// [`MIN_SUBCOLUMN_WIDTH_PX`], then multiplied by [`COLUMN_WIDTH_DOUBLING`].
#[must_use]
pub fn subcolumn_width_px(fill_ratio: f64, computator: &ChartComputator) -> f64 {
    let viewport_width = computator.current_viewport().width().max(MIN_VIEWPORT_SPAN);
    let mut width = fill_ratio * computator.content_rect().width() / viewport_width;
    if width < MIN_SUBCOLUMN_WIDTH_PX {
        width = MIN_SUBCOLUMN_WIDTH_PX;
    }
    width * COLUMN_WIDTH_DOUBLING
}

/// Projects every record of a band series into bar geometry.
///
/// The record at index `i` renders at logical abscissa `i`. The algorithm is
/// category-agnostic: the profile supplies the background scale and the
/// color policy.
pub fn project_band_columns(
    series: &BandSeries,
    category: CategoryKind,
    computator: &ChartComputator,
) -> ChartResult<Vec<BandColumn>> {
    let profile = CategoryProfile::for_kind(category);
    let width = subcolumn_width_px(series.style.fill_ratio, computator);
    let half_width = width / 2.0;

    let bg_top = computator.screen_y(profile.scale_max)?;
    let bg_bottom = computator.screen_y(0.0)?;

    let mut columns = Vec::with_capacity(series.records.len());
    for (index, record) in series.records.iter().enumerate() {
        let raw_x = computator.screen_x(index as f64)?;
        let left = raw_x - half_width;
        let right = raw_x + half_width;

        let background = RectPrimitive::new(
            PixelRect::new(left, bg_top, right, bg_bottom),
            0.0,
            series.style.background_color,
        );

        let pair = record.range_for(category);
        let inner = if pair.is_empty() {
            None
        } else {
            let high_y = computator.screen_y(pair.high)?;
            let low_y = computator.screen_y(pair.low)?;
            let bottom_y = if high_y == low_y {
                // Degenerate single-value band: re-map `high - 6` so the
                // rectangle keeps visible thickness.
                computator.screen_y(pair.high - DEGENERATE_BAND_DROP)?
            } else {
                low_y
            };
            let color = match profile.color_policy {
                ColorPolicy::Severity => record.severity.color_for(pair.high),
                ColorPolicy::Tiered => series
                    .style
                    .tier_colors
                    .color_for(pair.high, series.style.tier_thresholds),
            };
            Some(RectPrimitive::new(
                PixelRect::new(left, high_y, right, bottom_y),
                width,
                color,
            ))
        };

        columns.push(BandColumn {
            index,
            background,
            inner,
            center_x: raw_x,
        });
    }

    trace!(
        bars = columns.len(),
        width_px = width,
        "projected band columns"
    );
    Ok(columns)
}

/// Finds the first bar whose background rectangle contains the pointer.
#[must_use]
pub fn hit_test_columns(columns: &[BandColumn], x: f64, y: f64) -> Option<&BandColumn> {
    columns
        .iter()
        .find(|column| column.background.rect.contains(x, y))
}
