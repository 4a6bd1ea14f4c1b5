use serde::{Deserialize, Serialize};

use crate::core::PixelRect;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels, e.g. `from_rgb8(0xF6, 0xF6, 0xF6)`.
    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Scales the RGB channels towards black, keeping alpha.
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            red: self.red * factor,
            green: self.green * factor,
            blue: self.blue * factor,
            alpha: self.alpha,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// One stop of a linear gradient. Positions run 0 (start anchor) to 1 (end
/// anchor) and must be non-decreasing across a stop list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Color,
    pub position: f64,
}

impl GradientStop {
    #[must_use]
    pub const fn new(color: Color, position: f64) -> Self {
        Self { color, position }
    }
}

pub(crate) fn validate_gradient_stops(stops: &[GradientStop]) -> ChartResult<()> {
    if stops.is_empty() {
        return Err(ChartError::InvalidStyle(
            "gradient must define at least one stop".to_owned(),
        ));
    }
    let mut previous = f64::NEG_INFINITY;
    for stop in stops {
        stop.color.validate()?;
        if !stop.position.is_finite() || !(0.0..=1.0).contains(&stop.position) {
            return Err(ChartError::InvalidStyle(
                "gradient stop position must be finite and in [0, 1]".to_owned(),
            ));
        }
        if stop.position < previous {
            return Err(ChartError::InvalidStyle(
                "gradient stop positions must be non-decreasing".to_owned(),
            ));
        }
        previous = stop.position;
    }
    Ok(())
}

/// Paint applied to a filled shape. Gradient anchors are concrete pixel
/// coordinates, resolved by the frame builder; stops are always clamped at
/// the anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Paint::Solid(color) => color.validate(),
            Paint::LinearGradient {
                x1,
                y1,
                x2,
                y2,
                stops,
            } => {
                if !x1.is_finite() || !y1.is_finite() || !x2.is_finite() || !y2.is_finite() {
                    return Err(ChartError::InvalidData(
                        "gradient anchors must be finite".to_owned(),
                    ));
                }
                validate_gradient_stops(stops)
            }
        }
    }
}

/// Path verb in pixel coordinates. Paths never self-close implicitly; fill
/// geometry repeats its first vertex instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathVerb {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
}

impl PathVerb {
    pub fn validate(self) -> ChartResult<()> {
        let coords: &[f64] = match self {
            PathVerb::MoveTo { x, y } | PathVerb::LineTo { x, y } => &[x, y],
            PathVerb::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => &[x1, y1, x2, y2, x, y],
        };
        if coords.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width_px: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width_px: f64,
        color: Color,
    ) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width_px,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one stroked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub verbs: Vec<PathVerb>,
    pub stroke_width_px: f64,
    pub color: Color,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(verbs: Vec<PathVerb>, stroke_width_px: f64, color: Color) -> Self {
        Self {
            verbs,
            stroke_width_px,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !matches!(self.verbs.first(), Some(PathVerb::MoveTo { .. })) {
            return Err(ChartError::InvalidData(
                "path must start with a MoveTo verb".to_owned(),
            ));
        }
        for verb in &self.verbs {
            verb.validate()?;
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "path stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one filled path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillPrimitive {
    pub verbs: Vec<PathVerb>,
    pub paint: Paint,
}

impl FillPrimitive {
    #[must_use]
    pub fn new(verbs: Vec<PathVerb>, paint: Paint) -> Self {
        Self { verbs, paint }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !matches!(self.verbs.first(), Some(PathVerb::MoveTo { .. })) {
            return Err(ChartError::InvalidData(
                "fill path must start with a MoveTo verb".to_owned(),
            ));
        }
        for verb in &self.verbs {
            verb.validate()?;
        }
        self.paint.validate()
    }
}

/// Draw command for one filled rectangle, optionally with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: PixelRect,
    pub corner_radius_px: f64,
    pub color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(rect: PixelRect, corner_radius_px: f64, color: Color) -> Self {
        Self {
            rect,
            corner_radius_px,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        self.rect.validate()?;
        if !self.corner_radius_px.is_finite() || self.corner_radius_px < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Glyph drawn at a point marker. Sprite keys are opaque to the engine; the
/// backend owns the atlas that resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerKind {
    Square,
    Circle,
    Sprite(String),
}

/// Draw command for one point marker centered at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
    pub kind: MarkerKind,
    pub color: Color,
}

impl MarkerPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, size_px: f64, kind: MarkerKind, color: Color) -> Self {
        Self {
            x,
            y,
            size_px,
            kind,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        if let MarkerKind::Sprite(key) = &self.kind {
            if key.is_empty() {
                return Err(ChartError::InvalidData(
                    "marker sprite key must not be empty".to_owned(),
                ));
            }
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for an image stretched into `dest`. `source` is an opaque
/// resource key resolved by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePrimitive {
    pub source: String,
    pub dest: PixelRect,
}

impl ImagePrimitive {
    #[must_use]
    pub fn new(source: impl Into<String>, dest: PixelRect) -> Self {
        Self {
            source: source.into(),
            dest,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.source.is_empty() {
            return Err(ChartError::InvalidData(
                "image source key must not be empty".to_owned(),
            ));
        }
        self.dest.validate()
    }
}
