use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::band::{BandSeries, CategoryKind, CategoryProfile};
use crate::core::band_geometry::{hit_test_columns, project_band_columns};
use crate::core::computator::{ChartComputator, PixelRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::listeners::BandClickListener;

/// Bootstrap configuration for a [`BandChart`] instance.
///
/// The category is fixed for the whole chart, not per bar; it selects the
/// background scale and the color policy once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandChartConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub category: CategoryKind,
}

impl BandChartConfig {
    #[must_use]
    pub const fn new(surface_width: u32, surface_height: u32, category: CategoryKind) -> Self {
        Self {
            surface_width,
            surface_height,
            category,
        }
    }
}

/// Column/range chart engine for one vitals category.
pub struct BandChart<R: Renderer> {
    renderer: R,
    computator: ChartComputator,
    category: CategoryKind,
    profile: CategoryProfile,
    series: BandSeries,
    selected_bar: Option<usize>,
    listener: Option<Box<dyn BandClickListener>>,
    metadata: IndexMap<String, String>,
}

impl<R: Renderer> BandChart<R> {
    pub fn new(renderer: R, config: BandChartConfig) -> ChartResult<Self> {
        let computator = ChartComputator::new(config.surface_width, config.surface_height)?;
        let mut chart = Self {
            renderer,
            computator,
            category: config.category,
            profile: CategoryProfile::for_kind(config.category),
            series: BandSeries::new(Vec::new()),
            selected_bar: None,
            listener: None,
            metadata: IndexMap::new(),
        };
        chart.recompute_layout()?;
        Ok(chart)
    }

    /// Replaces the bound records and recomputes layout. Clears the bar
    /// selection; old indices may not exist in the new data.
    pub fn set_data(&mut self, series: BandSeries) -> ChartResult<()> {
        series.validate()?;
        debug!(
            records = series.records.len(),
            category = ?self.category,
            "set band chart data"
        );
        self.series = series;
        self.selected_bar = None;
        self.recompute_layout()
    }

    pub fn resize(&mut self, surface_width: u32, surface_height: u32) -> ChartResult<()> {
        self.computator
            .set_content_area(surface_width, surface_height)?;
        self.recompute_layout()
    }

    pub fn set_click_listener(&mut self, listener: Box<dyn BandClickListener>) {
        self.listener = Some(listener);
    }

    pub fn set_metadata_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    #[must_use]
    pub fn category(&self) -> CategoryKind {
        self.category
    }

    #[must_use]
    pub fn profile(&self) -> CategoryProfile {
        self.profile
    }

    #[must_use]
    pub fn series(&self) -> &BandSeries {
        &self.series
    }

    #[must_use]
    pub fn computator(&self) -> &ChartComputator {
        &self.computator
    }

    #[must_use]
    pub fn selected_bar(&self) -> Option<usize> {
        self.selected_bar
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Builds one frame: per bar, the full-height background rectangle and
    /// then the inner value band so it draws on top.
    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.computator.content_rect());
        let columns = project_band_columns(&self.series, self.category, &self.computator)?;
        for column in &columns {
            frame.rects.push(column.background);
            if let Some(inner) = column.inner {
                frame.rects.push(inner);
            }
        }
        trace!(bars = columns.len(), "built band frame");
        Ok(frame)
    }

    /// Produces exactly one rendered frame on the configured backend.
    pub fn draw(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    /// Hit-tests a pointer event against the background rectangles.
    ///
    /// The first containing bar wins; the click listener receives the chart
    /// category, the bar index and the bar's pixel center. Returns whether
    /// the selected bar changed.
    pub fn on_pointer(&mut self, pointer_x: f64, pointer_y: f64) -> ChartResult<bool> {
        if !pointer_x.is_finite() || !pointer_y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }

        let columns = project_band_columns(&self.series, self.category, &self.computator)?;
        let hit = hit_test_columns(&columns, pointer_x, pointer_y)
            .map(|column| (column.index, column.center_x));

        let changed = match hit {
            Some((index, center_x)) => {
                let changed = self.selected_bar != Some(index);
                self.selected_bar = Some(index);
                if let Some(listener) = self.listener.as_deref_mut() {
                    listener.band_clicked(self.category, index, center_x);
                }
                changed
            }
            None => self.selected_bar.take().is_some(),
        };

        trace!(changed, "band hit test");
        Ok(changed)
    }

    /// Serializes the current state as pretty JSON for fixture-based
    /// regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        let snapshot = BandChartSnapshot {
            metadata: &self.metadata,
            category: self.category,
            profile: self.profile,
            record_count: self.series.records.len(),
            selected_bar: self.selected_bar,
            current_viewport: self.computator.current_viewport(),
            content: self.computator.content_rect(),
            frame: self.build_frame()?,
        };
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    fn recompute_layout(&mut self) -> ChartResult<()> {
        // Bar at index i sits at logical x = i; pad half a slot on each side
        // so edge bars are not clipped.
        let right = if self.series.records.is_empty() {
            0.5
        } else {
            self.series.records.len() as f64 - 0.5
        };
        let viewport = Viewport::new(-0.5, self.profile.scale_max, right, 0.0);
        self.computator.set_viewports(viewport)
    }
}

#[derive(Serialize)]
struct BandChartSnapshot<'a> {
    metadata: &'a IndexMap<String, String>,
    category: CategoryKind,
    profile: CategoryProfile,
    record_count: usize,
    selected_bar: Option<usize>,
    current_viewport: Viewport,
    content: PixelRect,
    frame: RenderFrame,
}
