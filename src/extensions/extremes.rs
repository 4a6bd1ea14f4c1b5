use serde::{Deserialize, Serialize};

use crate::core::computator::ChartComputator;
use crate::core::sample::PointSample;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, MarkerKind, MarkerPrimitive, TextHAlign, TextPrimitive};

/// Sprite markers for the maximum and minimum samples of a series.
///
/// Samples whose value equals `exclude_value` are skipped by the scan (the
/// source system used it as a "no reading" sentinel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremesMarkers {
    pub max_sprite_key: String,
    pub min_sprite_key: String,
    pub exclude_value: f64,
    pub sprite_size_px: f64,
    pub label_font_size_px: f64,
    pub label_char_width_px: f64,
    pub label_color: Color,
    pub label_gap_px: f64,
}

impl Default for ExtremesMarkers {
    fn default() -> Self {
        Self {
            max_sprite_key: String::new(),
            min_sprite_key: String::new(),
            exclude_value: 0.0,
            sprite_size_px: 16.0,
            label_font_size_px: 12.0,
            label_char_width_px: 7.0,
            label_color: Color::from_rgb8(0x17, 0x18, 0x17),
            label_gap_px: 4.0,
        }
    }
}

impl ExtremesMarkers {
    #[must_use]
    pub fn new(max_sprite_key: impl Into<String>, min_sprite_key: impl Into<String>) -> Self {
        Self {
            max_sprite_key: max_sprite_key.into(),
            min_sprite_key: min_sprite_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_exclude_value(mut self, exclude_value: f64) -> Self {
        self.exclude_value = exclude_value;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.max_sprite_key.is_empty() || self.min_sprite_key.is_empty() {
            return Err(ChartError::InvalidStyle(
                "extremes sprite keys must not be empty".to_owned(),
            ));
        }
        if !self.exclude_value.is_finite() || !self.label_gap_px.is_finite() {
            return Err(ChartError::InvalidStyle(
                "extremes values must be finite".to_owned(),
            ));
        }
        for (value, name) in [
            (self.sprite_size_px, "sprite_size_px"),
            (self.label_font_size_px, "label_font_size_px"),
            (self.label_char_width_px, "label_char_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidStyle(format!(
                    "extremes `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Sprite + integer-value labels for the extreme samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremesVisuals {
    pub markers: Vec<MarkerPrimitive>,
    pub labels: Vec<TextPrimitive>,
}

/// Finds the max and min samples (excluding the sentinel) and builds their
/// sprite + label geometry. Returns `None` when every sample is excluded.
///
/// The max sprite clamps to the content top; both labels sit right of the
/// sprite and flip to its left when they would leave the content rect.
pub fn project_extremes(
    config: &ExtremesMarkers,
    samples: &[PointSample],
    computator: &ChartComputator,
) -> ChartResult<Option<ExtremesVisuals>> {
    let mut max_sample: Option<&PointSample> = None;
    let mut min_sample: Option<&PointSample> = None;
    for sample in samples {
        if sample.y == config.exclude_value {
            continue;
        }
        if max_sample.is_none_or(|current| sample.y > current.y) {
            max_sample = Some(sample);
        }
        if min_sample.is_none_or(|current| sample.y < current.y) {
            min_sample = Some(sample);
        }
    }
    let (Some(max_sample), Some(min_sample)) = (max_sample, min_sample) else {
        return Ok(None);
    };

    let content = computator.content_rect();
    let mut visuals = ExtremesVisuals {
        markers: Vec::with_capacity(2),
        labels: Vec::with_capacity(2),
    };

    // Max glyph sits above the sample, clamped into the content rect.
    let max_x = computator.screen_x(max_sample.x)?;
    let max_y = computator.screen_y(max_sample.y)?;
    let mut glyph_top = max_y - config.sprite_size_px - config.label_gap_px;
    if glyph_top < content.top {
        glyph_top = content.top;
    }
    visuals.markers.push(MarkerPrimitive::new(
        max_x,
        glyph_top + config.sprite_size_px / 2.0,
        config.sprite_size_px,
        MarkerKind::Sprite(config.max_sprite_key.clone()),
        config.label_color,
    ));
    visuals.labels.push(value_label(
        config,
        max_sample.y,
        max_x,
        glyph_top + config.label_font_size_px,
        content.right,
    ));

    // Min glyph sits below the sample.
    let min_x = computator.screen_x(min_sample.x)?;
    let min_y = computator.screen_y(min_sample.y)?;
    let glyph_y = min_y + config.label_gap_px + config.sprite_size_px / 2.0;
    visuals.markers.push(MarkerPrimitive::new(
        min_x,
        glyph_y,
        config.sprite_size_px,
        MarkerKind::Sprite(config.min_sprite_key.clone()),
        config.label_color,
    ));
    visuals.labels.push(value_label(
        config,
        min_sample.y,
        min_x,
        min_y + config.label_gap_px + config.label_font_size_px,
        content.right,
    ));

    Ok(Some(visuals))
}

fn value_label(
    config: &ExtremesMarkers,
    value: f64,
    glyph_x: f64,
    text_y: f64,
    content_right: f64,
) -> TextPrimitive {
    let text = format!("{}", value as i64);
    let label_width = text.chars().count() as f64 * config.label_char_width_px;
    let mut left = glyph_x + config.sprite_size_px / 2.0 + config.label_gap_px;
    if left + label_width > content_right {
        left = glyph_x - config.sprite_size_px / 2.0 - label_width - config.label_gap_px;
    }
    TextPrimitive::new(
        text,
        left,
        text_y,
        config.label_font_size_px,
        config.label_color,
        TextHAlign::Left,
    )
}
