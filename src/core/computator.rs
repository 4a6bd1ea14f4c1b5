use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// Minimum logical span substituted when a viewport axis collapses, so the
/// pixel transform never divides by zero.
pub const MIN_VIEWPORT_SPAN: f64 = 1e-9;

/// Logical window over the data, in data units.
///
/// `top` holds the largest visible value and `bottom` the smallest, so the
/// vertical axis reads upwards even though pixel space reads downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.top - self.bottom
    }

    /// Degenerate (zero-span) viewports are allowed; the computator
    /// substitutes [`MIN_VIEWPORT_SPAN`] when mapping through them.
    pub fn validate(self) -> ChartResult<Self> {
        for (edge, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "viewport edge `{edge}` must be finite"
                )));
            }
        }
        if self.right < self.left || self.top < self.bottom {
            return Err(ChartError::InvalidData(
                "viewport must satisfy left <= right and bottom <= top".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Clamps this viewport inside `bounds`, falling back to `bounds` when the
    /// clamped window would invert.
    #[must_use]
    pub fn constrain_to(self, bounds: Viewport) -> Viewport {
        let left = self.left.max(bounds.left);
        let right = self.right.min(bounds.right);
        let top = self.top.min(bounds.top);
        let bottom = self.bottom.max(bounds.bottom);
        if left > right || bottom > top {
            return bounds;
        }
        Viewport {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0, 0.0)
    }
}

/// Axis-aligned rectangle in pixel space. `top <= bottom` (screen Y grows
/// downwards), unlike [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PixelRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        0.5 * (self.left + self.right)
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    #[must_use]
    pub fn contains_with_tolerance(self, x: f64, y: f64, tolerance_px: f64) -> bool {
        x >= self.left - tolerance_px
            && x <= self.right + tolerance_px
            && y >= self.top - tolerance_px
            && y <= self.bottom + tolerance_px
    }

    pub fn validate(self) -> ChartResult<()> {
        for (edge, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "pixel rect edge `{edge}` must be finite"
                )));
            }
        }
        if self.right < self.left || self.bottom < self.top {
            return Err(ChartError::InvalidData(
                "pixel rect must satisfy left <= right and top <= bottom".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Maps the current logical viewport onto the pixel content rect.
///
/// All transforms are pure reads. Layout state (surface size, margins,
/// viewports) changes only through the `set_*` methods, so a draw pass can
/// never observe a half-updated mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartComputator {
    surface_width: u32,
    surface_height: u32,
    internal_margin_px: f64,
    content: PixelRect,
    max_viewport: Viewport,
    current_viewport: Viewport,
}

impl ChartComputator {
    pub fn new(surface_width: u32, surface_height: u32) -> ChartResult<Self> {
        if surface_width == 0 || surface_height == 0 {
            return Err(ChartError::InvalidContentArea {
                width: surface_width,
                height: surface_height,
            });
        }

        let mut computator = Self {
            surface_width,
            surface_height,
            internal_margin_px: 0.0,
            content: PixelRect::new(0.0, 0.0, 0.0, 0.0),
            max_viewport: Viewport::default(),
            current_viewport: Viewport::default(),
        };
        computator.refresh_content_rect();
        Ok(computator)
    }

    /// Resizes the pixel surface and recomputes the content rect.
    pub fn set_content_area(&mut self, surface_width: u32, surface_height: u32) -> ChartResult<()> {
        if surface_width == 0 || surface_height == 0 {
            return Err(ChartError::InvalidContentArea {
                width: surface_width,
                height: surface_height,
            });
        }
        self.surface_width = surface_width;
        self.surface_height = surface_height;
        self.refresh_content_rect();
        debug!(surface_width, surface_height, "set content area");
        Ok(())
    }

    /// Insets the content rect from every surface edge.
    ///
    /// Negative or non-finite margins are rejected. Margins large enough to
    /// collapse the content rect are clamped instead of failing, since they
    /// derive from point radii and tolerances that callers tune freely.
    pub fn set_internal_margin(&mut self, margin_px: f64) -> ChartResult<()> {
        if !margin_px.is_finite() || margin_px < 0.0 {
            return Err(ChartError::InvalidData(
                "internal margin must be finite and >= 0".to_owned(),
            ));
        }
        self.internal_margin_px = margin_px;
        self.refresh_content_rect();
        Ok(())
    }

    pub fn set_max_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.validate()?;
        self.max_viewport = viewport;
        self.current_viewport = self.current_viewport.constrain_to(viewport);
        Ok(())
    }

    pub fn set_current_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.validate()?;
        self.current_viewport = viewport.constrain_to(self.max_viewport);
        Ok(())
    }

    /// Sets max and current viewport to the same window.
    pub fn set_viewports(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.validate()?;
        self.max_viewport = viewport;
        self.current_viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn content_rect(&self) -> PixelRect {
        self.content
    }

    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_width, self.surface_height)
    }

    #[must_use]
    pub fn internal_margin_px(&self) -> f64 {
        self.internal_margin_px
    }

    #[must_use]
    pub fn max_viewport(&self) -> Viewport {
        self.max_viewport
    }

    #[must_use]
    pub fn current_viewport(&self) -> Viewport {
        self.current_viewport
    }

    /// Maps a logical abscissa to a pixel x inside the content rect.
    pub fn screen_x(&self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let span = self.current_viewport.width().max(MIN_VIEWPORT_SPAN);
        let scale = self.content.width() / span;
        Ok(self.content.left + (value - self.current_viewport.left) * scale)
    }

    /// Maps a logical value to a pixel y inside the content rect.
    ///
    /// `viewport.top` maps to `content.top` and `viewport.bottom` to
    /// `content.bottom`, inverting the axis.
    pub fn screen_y(&self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let span = self.current_viewport.height().max(MIN_VIEWPORT_SPAN);
        let scale = self.content.height() / span;
        Ok(self.content.bottom - (value - self.current_viewport.bottom) * scale)
    }

    /// Inverse of [`Self::screen_x`].
    pub fn logical_x(&self, pixel_x: f64) -> ChartResult<f64> {
        if !pixel_x.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let width = self.content.width().max(MIN_VIEWPORT_SPAN);
        let normalized = (pixel_x - self.content.left) / width;
        Ok(self.current_viewport.left + normalized * self.current_viewport.width())
    }

    /// Inverse of [`Self::screen_y`].
    pub fn logical_y(&self, pixel_y: f64) -> ChartResult<f64> {
        if !pixel_y.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let height = self.content.height().max(MIN_VIEWPORT_SPAN);
        let normalized = (self.content.bottom - pixel_y) / height;
        Ok(self.current_viewport.bottom + normalized * self.current_viewport.height())
    }

    #[must_use]
    pub fn is_inside_content(&self, pixel_x: f64, pixel_y: f64, tolerance_px: f64) -> bool {
        self.content
            .contains_with_tolerance(pixel_x, pixel_y, tolerance_px)
    }

    fn refresh_content_rect(&mut self) {
        let width = f64::from(self.surface_width);
        let height = f64::from(self.surface_height);
        let max_margin = 0.5 * (width.min(height) - 1.0);
        let mut margin = self.internal_margin_px;
        if margin > max_margin {
            warn!(
                margin_px = margin,
                clamped_px = max_margin,
                "internal margin would collapse content rect; clamping"
            );
            margin = max_margin.max(0.0);
        }
        self.content = PixelRect::new(margin, margin, width - margin, height - margin);
    }
}
