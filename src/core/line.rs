use serde::{Deserialize, Serialize};

use crate::core::sample::PointSample;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, GradientStop, validate_gradient_stops};

/// How consecutive samples are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Straight,
    /// Cubic Bezier through every sample, see `core::line_geometry`.
    Smoothed,
}

/// Area treatment under the stroked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FillStyle {
    None,
    /// Closed to the baseline across the series x-extent, solid color.
    Solid(Color),
    /// Closed to the baseline across the series x-extent, vertical gradient.
    Gradient(Vec<GradientStop>),
    /// Closed to the content-rect edges with a clamped vertical gradient.
    /// The stroke is suppressed for this mode.
    GradientBand(Vec<GradientStop>),
}

/// One row of a value-sprite threshold table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRule {
    pub max_inclusive: f64,
    pub key: String,
}

impl SpriteRule {
    #[must_use]
    pub fn new(max_inclusive: f64, key: impl Into<String>) -> Self {
        Self {
            max_inclusive,
            key: key.into(),
        }
    }
}

/// Ordered thresholds mapping a sample value to a sprite key.
///
/// Rules are scanned in order; the first rule with `value <= max_inclusive`
/// wins and the last rule doubles as the catch-all for larger values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpriteTable {
    pub rules: Vec<SpriteRule>,
}

impl ValueSpriteTable {
    #[must_use]
    pub fn new(rules: Vec<SpriteRule>) -> Self {
        Self { rules }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.rules.is_empty() {
            return Err(ChartError::InvalidStyle(
                "value sprite table must define at least one rule".to_owned(),
            ));
        }
        let mut previous = f64::NEG_INFINITY;
        for rule in &self.rules {
            if rule.key.is_empty() {
                return Err(ChartError::InvalidStyle(
                    "sprite rule key must not be empty".to_owned(),
                ));
            }
            if !rule.max_inclusive.is_finite() {
                return Err(ChartError::InvalidStyle(
                    "sprite rule threshold must be finite".to_owned(),
                ));
            }
            if rule.max_inclusive <= previous {
                return Err(ChartError::InvalidStyle(
                    "sprite rule thresholds must be strictly ascending".to_owned(),
                ));
            }
            previous = rule.max_inclusive;
        }
        Ok(())
    }

    /// Only valid on a validated table (panics on an empty one in debug
    /// builds via slice indexing is avoided by construction).
    #[must_use]
    pub fn resolve(&self, value: f64) -> Option<&str> {
        let last = self.rules.last()?;
        for rule in &self.rules {
            if value <= rule.max_inclusive {
                return Some(rule.key.as_str());
            }
        }
        Some(last.key.as_str())
    }
}

/// One row of a state-sprite table keyed by `PointSample::range_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpriteEntry {
    pub state: i32,
    pub key: String,
}

impl StateSpriteEntry {
    #[must_use]
    pub fn new(state: i32, key: impl Into<String>) -> Self {
        Self {
            state,
            key: key.into(),
        }
    }
}

/// Maps sample category tags to sprite keys. Unmatched tags fall back to the
/// last entry at draw time (logged, never an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpriteTable {
    pub entries: Vec<StateSpriteEntry>,
}

impl StateSpriteTable {
    #[must_use]
    pub fn new(entries: Vec<StateSpriteEntry>) -> Self {
        Self { entries }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.entries.is_empty() {
            return Err(ChartError::InvalidStyle(
                "state sprite table must define at least one entry".to_owned(),
            ));
        }
        for entry in &self.entries {
            if entry.key.is_empty() {
                return Err(ChartError::InvalidStyle(
                    "state sprite key must not be empty".to_owned(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn resolve(&self, state: i32) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.state == state)
            .map(|entry| entry.key.as_str())
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.key.as_str())
    }
}

/// Shape drawn at each sample.
///
/// Sprite shapes treat a sample value of exactly 0 as "no reading" and
/// suppress both marker and label for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointShape {
    Square,
    Circle,
    ValueSprite(ValueSpriteTable),
    StateSprite(StateSpriteTable),
}

/// When data labels are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelVisibility {
    Hidden,
    Always,
    /// Drawn only for the selected sample, during the highlight pass.
    SelectedOnly,
}

/// Data-label styling and box metrics.
///
/// Box metrics use fixed per-character width so label geometry stays
/// deterministic without a font backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub visibility: LabelVisibility,
    /// Decimal places used when a sample has no label override.
    pub decimals: usize,
    /// Defaults to the series color when unset.
    pub text_color: Option<Color>,
    pub font_size_px: f64,
    pub char_width_px: f64,
    pub height_px: f64,
    pub horizontal_padding_px: f64,
    /// Gap between the point edge and the label box.
    pub offset_px: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            visibility: LabelVisibility::Hidden,
            decimals: 0,
            text_color: None,
            font_size_px: 12.0,
            char_width_px: 7.0,
            height_px: 14.0,
            horizontal_padding_px: 6.0,
            offset_px: 4.0,
        }
    }
}

impl LabelStyle {
    pub fn validate(&self) -> ChartResult<()> {
        if let Some(color) = self.text_color {
            validate_style_color(color, "label text")?;
        }
        for (value, name) in [
            (self.font_size_px, "font_size_px"),
            (self.char_width_px, "char_width_px"),
            (self.height_px, "height_px"),
            (self.horizontal_padding_px, "horizontal_padding_px"),
            (self.offset_px, "offset_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidStyle(format!(
                    "label metric `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Per-series rendering style. Validated eagerly when data is bound so a
/// draw pass never fails on style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub stroke_width_px: f64,
    pub point_radius_px: f64,
    pub point_shape: PointShape,
    pub interpolation: Interpolation,
    pub fill: FillStyle,
    /// Logical value the fill closes to and labels flip around.
    pub base_value: f64,
    /// Straight interpolation only: a sample with `y == 0` breaks the path
    /// instead of drawing through it.
    pub gap_on_zero: bool,
    pub labels: LabelStyle,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0x33, 0x66, 0xCC),
            stroke_width_px: 2.0,
            point_radius_px: 6.0,
            point_shape: PointShape::Circle,
            interpolation: Interpolation::Straight,
            fill: FillStyle::None,
            base_value: 0.0,
            gap_on_zero: false,
            labels: LabelStyle::default(),
        }
    }
}

impl LineStyle {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_stroke_width_px(mut self, stroke_width_px: f64) -> Self {
        self.stroke_width_px = stroke_width_px;
        self
    }

    #[must_use]
    pub fn with_point_radius_px(mut self, point_radius_px: f64) -> Self {
        self.point_radius_px = point_radius_px;
        self
    }

    #[must_use]
    pub fn with_point_shape(mut self, point_shape: PointShape) -> Self {
        self.point_shape = point_shape;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_base_value(mut self, base_value: f64) -> Self {
        self.base_value = base_value;
        self
    }

    #[must_use]
    pub fn with_gap_on_zero(mut self, gap_on_zero: bool) -> Self {
        self.gap_on_zero = gap_on_zero;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_style_color(self.color, "series")?;
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidStyle(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.point_radius_px.is_finite() || self.point_radius_px <= 0.0 {
            return Err(ChartError::InvalidStyle(
                "point radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.base_value.is_finite() {
            return Err(ChartError::InvalidStyle(
                "base value must be finite".to_owned(),
            ));
        }
        if self.gap_on_zero && self.interpolation == Interpolation::Smoothed {
            return Err(ChartError::InvalidStyle(
                "gap-on-zero requires straight interpolation".to_owned(),
            ));
        }
        if self.gap_on_zero && !matches!(self.fill, FillStyle::None) {
            return Err(ChartError::InvalidStyle(
                "gap-on-zero cannot be combined with area fills".to_owned(),
            ));
        }
        match &self.fill {
            FillStyle::None => {}
            FillStyle::Solid(color) => validate_style_color(*color, "fill")?,
            FillStyle::Gradient(stops) | FillStyle::GradientBand(stops) => {
                validate_gradient_stops(stops)?;
            }
        }
        match &self.point_shape {
            PointShape::Square | PointShape::Circle => {}
            PointShape::ValueSprite(table) => table.validate()?,
            PointShape::StateSprite(table) => table.validate()?,
        }
        self.labels.validate()
    }
}

/// One ordered sample collection drawn as one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub samples: Vec<PointSample>,
    pub style: LineStyle,
}

impl LineSeries {
    #[must_use]
    pub fn new(samples: Vec<PointSample>) -> Self {
        Self {
            samples,
            style: LineStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.style.validate()?;
        for sample in &self.samples {
            sample.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn validate_style_color(color: Color, what: &str) -> ChartResult<()> {
    color.validate().map_err(|_| {
        ChartError::InvalidStyle(format!(
            "{what} color channels must be finite and in [0, 1]"
        ))
    })
}
