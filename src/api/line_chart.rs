use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::computator::{ChartComputator, PixelRect, Viewport};
use crate::core::line::{LabelVisibility, LineSeries};
use crate::core::line_geometry::{
    project_highlight, project_line_path, project_point_visuals,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::event_markers::{EventMarkerSet, project_event_markers};
use crate::extensions::extremes::{ExtremesMarkers, project_extremes};
use crate::extensions::grid::{GridSpec, project_grid};
use crate::interaction::{
    HitCandidate, HitCandidates, Selection, SelectionState, TouchConfig, resolve_nearest,
    within_touch_area,
};
use crate::render::{ImagePrimitive, RenderFrame, Renderer};

use super::listeners::LineTouchListener;

/// Bootstrap configuration for a [`LineChart`] instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub touch: TouchConfig,
    /// Opaque backend resource key, stretched to the content rect beneath
    /// all series.
    pub background_image: Option<String>,
    pub grid: Option<GridSpec>,
    /// Fixed viewport; when `None` the max viewport is recomputed from data
    /// on every `set_data`.
    pub viewport_override: Option<Viewport>,
}

impl LineChartConfig {
    #[must_use]
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            touch: TouchConfig::default(),
            background_image: None,
            grid: None,
            viewport_override: None,
        }
    }

    #[must_use]
    pub fn with_touch(mut self, touch: TouchConfig) -> Self {
        self.touch = touch;
        self
    }

    #[must_use]
    pub fn with_background_image(mut self, key: impl Into<String>) -> Self {
        self.background_image = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    #[must_use]
    pub fn with_viewport_override(mut self, viewport: Viewport) -> Self {
        self.viewport_override = Some(viewport);
        self
    }
}

/// Line chart engine: owns the computator, the bound series, decorations,
/// selection state and the renderer.
///
/// Draw and hit-test both take `&mut self`, so they can never overlap for
/// one instance; the single-threaded contract is enforced by construction.
pub struct LineChart<R: Renderer> {
    renderer: R,
    computator: ChartComputator,
    touch: TouchConfig,
    series: Vec<LineSeries>,
    event_markers: Vec<(usize, EventMarkerSet)>,
    extremes: Vec<(usize, ExtremesMarkers)>,
    background_image: Option<String>,
    grid: Option<GridSpec>,
    viewport_override: Option<Viewport>,
    selection: SelectionState,
    listener: Option<Box<dyn LineTouchListener>>,
    metadata: IndexMap<String, String>,
}

impl<R: Renderer> LineChart<R> {
    pub fn new(renderer: R, config: LineChartConfig) -> ChartResult<Self> {
        let touch = config.touch.validate()?;
        if let Some(grid) = config.grid {
            grid.validate()?;
        }
        if let Some(viewport) = config.viewport_override {
            viewport.validate()?;
        }
        let computator = ChartComputator::new(config.surface_width, config.surface_height)?;

        Ok(Self {
            renderer,
            computator,
            touch,
            series: Vec::new(),
            event_markers: Vec::new(),
            extremes: Vec::new(),
            background_image: config.background_image,
            grid: config.grid,
            viewport_override: config.viewport_override,
            selection: SelectionState::default(),
            listener: None,
            metadata: IndexMap::new(),
        })
    }

    /// Replaces the bound series and recomputes layout.
    ///
    /// Styles are validated eagerly here so a draw pass never fails on
    /// configuration. Any previous selection is cleared; its indices may not
    /// exist in the new data.
    pub fn set_data(&mut self, series: Vec<LineSeries>) -> ChartResult<()> {
        for one in &series {
            one.validate()?;
        }

        let sample_count: usize = series.iter().map(|one| one.samples.len()).sum();
        debug!(
            series_count = series.len(),
            sample_count, "set line chart data"
        );

        self.series = series;
        self.selection.clear();
        self.recompute_layout()?;
        Ok(())
    }

    /// Resizes the pixel surface.
    pub fn resize(&mut self, surface_width: u32, surface_height: u32) -> ChartResult<()> {
        self.computator
            .set_content_area(surface_width, surface_height)?;
        self.recompute_layout()
    }

    pub fn set_current_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.computator.set_current_viewport(viewport)
    }

    /// Attaches annotation markers to the series at `series_index`.
    pub fn set_event_markers(
        &mut self,
        series_index: usize,
        sets: Vec<EventMarkerSet>,
    ) -> ChartResult<()> {
        for set in &sets {
            set.validate()?;
        }
        self.event_markers.retain(|(index, _)| *index != series_index);
        self.event_markers
            .extend(sets.into_iter().map(|set| (series_index, set)));
        Ok(())
    }

    /// Attaches max/min extremes markers to the series at `series_index`.
    pub fn set_extremes(
        &mut self,
        series_index: usize,
        config: ExtremesMarkers,
    ) -> ChartResult<()> {
        config.validate()?;
        self.extremes.retain(|(index, _)| *index != series_index);
        self.extremes.push((series_index, config));
        Ok(())
    }

    pub fn set_touch_listener(&mut self, listener: Box<dyn LineTouchListener>) {
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
    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    #[must_use]
    pub fn computator(&self) -> &ChartComputator {
        &self.computator
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection.selected()
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Builds one frame for the current data and viewport.
    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let content = self.computator.content_rect();
        let mut frame = RenderFrame::new(content);

        if let Some(key) = &self.background_image {
            frame.background_image = Some(ImagePrimitive::new(key.clone(), content));
        }
        if let Some(grid) = self.grid {
            frame.grid = project_grid(grid, &self.computator)?;
        }

        for series in &self.series {
            let geometry = project_line_path(series, &self.computator)?;
            if let Some(fill) = geometry.fill {
                frame.fills.push(fill);
            }
            if let Some(stroke) = geometry.stroke {
                frame.paths.push(stroke);
            }
        }

        for series in &self.series {
            let labels_enabled =
                matches!(series.style.labels.visibility, LabelVisibility::Always);
            let visuals = project_point_visuals(series, &self.computator, labels_enabled)?;
            frame.markers.extend(visuals.markers);
            frame.labels.extend(visuals.labels);
        }

        for (series_index, set) in &self.event_markers {
            let Some(series) = self.series.get(*series_index) else {
                warn!(series_index, "event marker set bound to missing series");
                continue;
            };
            let visuals = project_event_markers(set, &series.samples, &self.computator)?;
            frame.markers.extend(visuals.markers);
            frame.labels.extend(visuals.labels);
        }

        for (series_index, config) in &self.extremes {
            let Some(series) = self.series.get(*series_index) else {
                warn!(series_index, "extremes markers bound to missing series");
                continue;
            };
            if let Some(visuals) =
                project_extremes(config, &series.samples, &self.computator)?
            {
                frame.markers.extend(visuals.markers);
                frame.labels.extend(visuals.labels);
            }
        }

        if let Some(selection) = self.selection.selected() {
            if let Some(series) = self.series.get(selection.series) {
                let label_in_highlight = matches!(
                    series.style.labels.visibility,
                    LabelVisibility::Always | LabelVisibility::SelectedOnly
                );
                if let Some(visuals) = project_highlight(
                    series,
                    selection.sample,
                    self.touch.tolerance_px,
                    &self.computator,
                    label_in_highlight,
                )? {
                    frame.highlight_markers.extend(visuals.markers);
                    frame.highlight_labels.extend(visuals.labels);
                }
            }
        }

        trace!(primitives = frame.primitive_count(), "built line frame");
        Ok(frame)
    }

    /// Produces exactly one rendered frame on the configured backend.
    pub fn draw(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    /// Hit-tests a pointer event and updates the selection.
    ///
    /// Every sample within the legacy touch area (`distance^2 <= 2 *
    /// radius^2`, `radius = point_radius + tolerance`) is a candidate; the
    /// nearest squared distance wins. Returns whether the selection changed.
    pub fn on_pointer(&mut self, pointer_x: f64, pointer_y: f64) -> ChartResult<bool> {
        if !pointer_x.is_finite() || !pointer_y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }

        let mut candidates: HitCandidates = HitCandidates::new();
        for (series_index, series) in self.series.iter().enumerate() {
            let radius = series.style.point_radius_px + self.touch.tolerance_px;
            for (sample_index, sample) in series.samples.iter().enumerate() {
                let raw_x = self.computator.screen_x(sample.x)?;
                let raw_y = self.computator.screen_y(sample.y)?;
                let dx = pointer_x - raw_x;
                let dy = pointer_y - raw_y;
                if within_touch_area(dx, dy, radius) {
                    candidates.push(HitCandidate {
                        distance_sq: dx * dx + dy * dy,
                        selection: Selection::new(series_index, sample_index),
                    });
                }
            }
        }

        let changed = match resolve_nearest(&candidates) {
            Some(selection) => self.selection.select(selection),
            None => self.selection.clear(),
        };

        if let Some(listener) = self.listener.as_deref_mut() {
            match self.selection.selected() {
                Some(selection) => {
                    let sample = &self.series[selection.series].samples[selection.sample];
                    listener.value_touched(selection, sample);
                }
                None => listener.nothing_touched(),
            }
        }

        trace!(changed, candidates = candidates.len(), "line hit test");
        Ok(changed)
    }

    /// Serializes the current state as pretty JSON for fixture-based
    /// regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        let snapshot = LineChartSnapshot {
            metadata: &self.metadata,
            series_count: self.series.len(),
            sample_counts: self.series.iter().map(|one| one.samples.len()).collect(),
            selection: self.selection.selected(),
            max_viewport: self.computator.max_viewport(),
            current_viewport: self.computator.current_viewport(),
            content: self.computator.content_rect(),
            frame: self.build_frame()?,
        };
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    fn recompute_layout(&mut self) -> ChartResult<()> {
        let margin = self
            .series
            .iter()
            .map(|one| one.style.point_radius_px + self.touch.tolerance_px)
            .fold(0.0_f64, f64::max);
        self.computator.set_internal_margin(margin)?;

        let viewport = match self.viewport_override {
            Some(viewport) => viewport,
            None => max_viewport_from_data(&self.series),
        };
        self.computator.set_viewports(viewport)?;
        debug!(
            margin_px = margin,
            ?viewport,
            "recomputed line chart layout"
        );
        Ok(())
    }
}

fn max_viewport_from_data(series: &[LineSeries]) -> Viewport {
    let mut left = f64::INFINITY;
    let mut right = f64::NEG_INFINITY;
    let mut bottom = f64::INFINITY;
    let mut top = f64::NEG_INFINITY;
    for one in series {
        for sample in &one.samples {
            left = left.min(sample.x);
            right = right.max(sample.x);
            bottom = bottom.min(sample.y);
            top = top.max(sample.y);
        }
    }
    if !left.is_finite() || !right.is_finite() || !bottom.is_finite() || !top.is_finite() {
        return Viewport::default();
    }
    Viewport::new(left, top, right, bottom)
}

#[derive(Serialize)]
struct LineChartSnapshot<'a> {
    metadata: &'a IndexMap<String, String>,
    series_count: usize,
    sample_counts: Vec<usize>,
    selection: Option<Selection>,
    max_viewport: Viewport,
    current_viewport: Viewport,
    content: PixelRect,
    frame: RenderFrame,
}
