use serde::{Deserialize, Serialize};

use crate::core::PixelRect;
use crate::error::ChartResult;
use crate::render::{
    FillPrimitive, ImagePrimitive, LinePrimitive, MarkerPrimitive, PathPrimitive, RectPrimitive,
    TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitive lists are drawn in field order: background image first, then
/// grid, fills, paths, rects, markers, labels, and finally the highlight
/// layers so the selected point always renders on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub content: PixelRect,
    pub background_image: Option<ImagePrimitive>,
    pub grid: Vec<LinePrimitive>,
    pub fills: Vec<FillPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub labels: Vec<TextPrimitive>,
    pub highlight_markers: Vec<MarkerPrimitive>,
    pub highlight_labels: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(content: PixelRect) -> Self {
        Self {
            content,
            background_image: None,
            grid: Vec::new(),
            fills: Vec::new(),
            paths: Vec::new(),
            rects: Vec::new(),
            markers: Vec::new(),
            labels: Vec::new(),
            highlight_markers: Vec::new(),
            highlight_labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_background_image(mut self, image: ImagePrimitive) -> Self {
        self.background_image = Some(image);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: FillPrimitive) -> Self {
        self.fills.push(fill);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerPrimitive) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: TextPrimitive) -> Self {
        self.labels.push(label);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.content.validate()?;
        if let Some(image) = &self.background_image {
            image.validate()?;
        }
        for line in &self.grid {
            line.validate()?;
        }
        for fill in &self.fills {
            fill.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for label in &self.labels {
            label.validate()?;
        }
        for marker in &self.highlight_markers {
            marker.validate()?;
        }
        for label in &self.highlight_labels {
            label.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    /// Total primitive count across every layer, for tests and telemetry.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        usize::from(self.background_image.is_some())
            + self.grid.len()
            + self.fills.len()
            + self.paths.len()
            + self.rects.len()
            + self.markers.len()
            + self.labels.len()
            + self.highlight_markers.len()
            + self.highlight_labels.len()
    }
}
