use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::computator::ChartComputator;
use crate::core::sample::PointSample;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, MarkerKind, MarkerPrimitive, TextHAlign, TextPrimitive,
};

/// One set of annotation markers ("went to bed" / "got up" style events).
///
/// Each entry in `indices` marks the sample at that index with a sprite glyph
/// and a timestamp label, both pinned near `anchor_value` on the Y axis and
/// nudged `x_nudge` logical units horizontally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarkerSet {
    pub sprite_key: String,
    pub indices: Vec<usize>,
    /// Indices above this clamp to it before sample lookup.
    pub max_index: usize,
    pub x_nudge: f64,
    /// Logical Y the glyph is pinned at.
    pub anchor_value: f64,
    /// Timestamp of index 0.
    pub base_time: NaiveTime,
    /// Minutes represented by one index step.
    pub minutes_per_index: i64,
    pub sprite_size_px: f64,
    pub label_font_size_px: f64,
    pub label_color: Color,
    pub label_gap_px: f64,
}

impl Default for EventMarkerSet {
    fn default() -> Self {
        Self {
            sprite_key: String::new(),
            indices: Vec::new(),
            max_index: usize::MAX,
            x_nudge: 0.0,
            anchor_value: 8.0,
            base_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            minutes_per_index: 5,
            sprite_size_px: 16.0,
            label_font_size_px: 8.0,
            label_color: Color::from_rgb8(0x17, 0x18, 0x17),
            label_gap_px: 4.0,
        }
    }
}

impl EventMarkerSet {
    #[must_use]
    pub fn new(sprite_key: impl Into<String>, indices: Vec<usize>) -> Self {
        Self {
            sprite_key: sprite_key.into(),
            indices,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }

    #[must_use]
    pub fn with_x_nudge(mut self, x_nudge: f64) -> Self {
        self.x_nudge = x_nudge;
        self
    }

    #[must_use]
    pub fn with_anchor_value(mut self, anchor_value: f64) -> Self {
        self.anchor_value = anchor_value;
        self
    }

    #[must_use]
    pub fn with_base_time(mut self, base_time: NaiveTime) -> Self {
        self.base_time = base_time;
        self
    }

    #[must_use]
    pub fn with_minutes_per_index(mut self, minutes_per_index: i64) -> Self {
        self.minutes_per_index = minutes_per_index;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.sprite_key.is_empty() {
            return Err(ChartError::InvalidStyle(
                "event marker sprite key must not be empty".to_owned(),
            ));
        }
        if self.minutes_per_index <= 0 {
            return Err(ChartError::InvalidStyle(
                "event marker minutes_per_index must be > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.x_nudge, "x_nudge"),
            (self.anchor_value, "anchor_value"),
            (self.label_gap_px, "label_gap_px"),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidStyle(format!(
                    "event marker `{name}` must be finite"
                )));
            }
        }
        for (value, name) in [
            (self.sprite_size_px, "sprite_size_px"),
            (self.label_font_size_px, "label_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidStyle(format!(
                    "event marker `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Timestamp text for one event index, `HH:MM`.
    #[must_use]
    pub fn timestamp_text(&self, index: usize) -> String {
        let minutes = index as i64 * self.minutes_per_index;
        let (time, _) = self
            .base_time
            .overflowing_add_signed(Duration::minutes(minutes));
        time.format("%H:%M").to_string()
    }
}

/// Sprite + timestamp geometry for one event marker set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarkerVisuals {
    pub markers: Vec<MarkerPrimitive>,
    pub labels: Vec<TextPrimitive>,
}

impl EventMarkerVisuals {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            labels: Vec::new(),
        }
    }
}

/// Projects one event marker set against a series' samples.
///
/// Out-of-range indices clamp to the last valid sample (logged, never an
/// error). An empty index list or an empty series is a no-op.
pub fn project_event_markers(
    set: &EventMarkerSet,
    samples: &[PointSample],
    computator: &ChartComputator,
) -> ChartResult<EventMarkerVisuals> {
    if set.indices.is_empty() || samples.is_empty() {
        return Ok(EventMarkerVisuals::empty());
    }

    let last_valid = set.max_index.min(samples.len() - 1);
    let anchor_y = computator.screen_y(set.anchor_value)?;

    let mut visuals = EventMarkerVisuals::empty();
    for &index in &set.indices {
        let clamped = index.min(last_valid);
        if clamped != index {
            warn!(index, clamped, "event marker index out of range; clamping");
        }
        let sample = &samples[clamped];
        let x = computator.screen_x(sample.x + set.x_nudge)?;
        let glyph_y = anchor_y - set.sprite_size_px / 2.0;

        visuals.markers.push(MarkerPrimitive::new(
            x,
            glyph_y,
            set.sprite_size_px,
            MarkerKind::Sprite(set.sprite_key.clone()),
            set.label_color,
        ));
        // Timestamp keeps the caller's original index, clamping affects the
        // glyph position only.
        visuals.labels.push(TextPrimitive::new(
            set.timestamp_text(index),
            x,
            anchor_y - set.sprite_size_px - set.label_gap_px,
            set.label_font_size_px,
            set.label_color,
            TextHAlign::Center,
        ));
    }

    Ok(visuals)
}
