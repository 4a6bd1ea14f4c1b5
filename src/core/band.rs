use serde::{Deserialize, Serialize};

use crate::core::line::validate_style_color;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Vital category a band chart instance renders. Fixed per chart, not per
/// bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    HeartRate,
    Stress,
    Fatigue,
    Excitement,
    Secondary,
}

/// How the inner value band picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorPolicy {
    /// Severity color carried on the record (normal vs out-of-range).
    Severity,
    /// Fixed three-tier palette selected by the band's high value.
    Tiered,
}

/// Per-category rendering parameters, resolved once per chart instance.
///
/// Heart rate runs on a 0..=200 scale; the other four vitals on 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub scale_max: f64,
    pub color_policy: ColorPolicy,
}

impl CategoryProfile {
    #[must_use]
    pub const fn for_kind(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::HeartRate => Self {
                scale_max: 200.0,
                color_policy: ColorPolicy::Severity,
            },
            CategoryKind::Stress | CategoryKind::Fatigue | CategoryKind::Secondary => Self {
                scale_max: 100.0,
                color_policy: ColorPolicy::Severity,
            },
            CategoryKind::Excitement => Self {
                scale_max: 100.0,
                color_policy: ColorPolicy::Tiered,
            },
        }
    }
}

/// One (high, low) reading for a single category in a single time slot.
///
/// A pair of exactly (0, 0) means "no reading"; the inner band is skipped
/// for it while the background rectangle still draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePair {
    pub high: f64,
    pub low: f64,
}

impl RangePair {
    #[must_use]
    pub const fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            high: 0.0,
            low: 0.0,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.high == 0.0 && self.low == 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.high.is_finite() || !self.low.is_finite() {
            return Err(ChartError::InvalidData(
                "range pair must be finite".to_owned(),
            ));
        }
        if self.high < self.low {
            return Err(ChartError::InvalidData(
                "range pair must satisfy high >= low".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Record-carried severity palette used by every category except Excitement.
///
/// The out-of-range color takes over when the band's high value reaches
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityColors {
    pub normal: Color,
    pub out_of_range: Color,
    pub threshold: f64,
}

impl Default for SeverityColors {
    fn default() -> Self {
        Self {
            normal: Color::from_rgb8(0xB2, 0xC5, 0x2C),
            out_of_range: Color::from_rgb8(0xE9, 0x60, 0x3C),
            threshold: 200.0,
        }
    }
}

impl SeverityColors {
    #[must_use]
    pub fn color_for(&self, high: f64) -> Color {
        if high >= self.threshold {
            self.out_of_range
        } else {
            self.normal
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_style_color(self.normal, "severity normal")?;
        validate_style_color(self.out_of_range, "severity out-of-range")?;
        if !self.threshold.is_finite() {
            return Err(ChartError::InvalidStyle(
                "severity threshold must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Tier boundaries for the tiered color policy. Both bounds are inclusive
/// on the low side of the tier they close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub low_max: f64,
    pub mid_max: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            low_max: 25.0,
            mid_max: 75.0,
        }
    }
}

impl TierThresholds {
    pub fn validate(self) -> ChartResult<()> {
        if !self.low_max.is_finite() || !self.mid_max.is_finite() {
            return Err(ChartError::InvalidStyle(
                "tier thresholds must be finite".to_owned(),
            ));
        }
        if self.low_max >= self.mid_max {
            return Err(ChartError::InvalidStyle(
                "tier thresholds must satisfy low_max < mid_max".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Fixed palette for the tiered color policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierColors {
    pub low: Color,
    pub mid: Color,
    pub high: Color,
}

impl Default for TierColors {
    fn default() -> Self {
        Self {
            low: Color::from_rgb8(0xC0, 0xDB, 0xFF),
            mid: Color::from_rgb8(0x3C, 0xD1, 0x54),
            high: Color::from_rgb8(0xFF, 0xD8, 0x00),
        }
    }
}

impl TierColors {
    /// Tier boundaries are evaluated low-to-high: `value <= low_max` is the
    /// low tier, `value <= mid_max` the mid tier, everything above is high.
    #[must_use]
    pub fn color_for(&self, value: f64, thresholds: TierThresholds) -> Color {
        if value <= thresholds.low_max {
            self.low
        } else if value <= thresholds.mid_max {
            self.mid
        } else {
            self.high
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_style_color(self.low, "tier low")?;
        validate_style_color(self.mid, "tier mid")?;
        validate_style_color(self.high, "tier high")
    }
}

/// One time slot's readings across all five categories.
///
/// Records carry every category so a single day aggregate can feed charts
/// of any kind; the chart's fixed [`CategoryKind`] picks which pair draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandRecord {
    pub heart_rate: RangePair,
    pub stress: RangePair,
    pub fatigue: RangePair,
    pub excitement: RangePair,
    pub secondary: RangePair,
    pub severity: SeverityColors,
}

impl Default for BandRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl BandRecord {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heart_rate: RangePair::empty(),
            stress: RangePair::empty(),
            fatigue: RangePair::empty(),
            excitement: RangePair::empty(),
            secondary: RangePair::empty(),
            severity: SeverityColors::default(),
        }
    }

    #[must_use]
    pub fn with_heart_rate(mut self, high: f64, low: f64) -> Self {
        self.heart_rate = RangePair::new(high, low);
        self
    }

    #[must_use]
    pub fn with_stress(mut self, high: f64, low: f64) -> Self {
        self.stress = RangePair::new(high, low);
        self
    }

    #[must_use]
    pub fn with_fatigue(mut self, high: f64, low: f64) -> Self {
        self.fatigue = RangePair::new(high, low);
        self
    }

    #[must_use]
    pub fn with_excitement(mut self, high: f64, low: f64) -> Self {
        self.excitement = RangePair::new(high, low);
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, high: f64, low: f64) -> Self {
        self.secondary = RangePair::new(high, low);
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: SeverityColors) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn range_for(&self, kind: CategoryKind) -> RangePair {
        match kind {
            CategoryKind::HeartRate => self.heart_rate,
            CategoryKind::Stress => self.stress,
            CategoryKind::Fatigue => self.fatigue,
            CategoryKind::Excitement => self.excitement,
            CategoryKind::Secondary => self.secondary,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.heart_rate.validate()?;
        self.stress.validate()?;
        self.fatigue.validate()?;
        self.excitement.validate()?;
        self.secondary.validate()?;
        self.severity.validate()
    }
}

/// Chart-level band styling. Validated eagerly when data is bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStyle {
    /// Fraction of one slot's width the subcolumn occupies before the
    /// legacy doubling factor is applied.
    pub fill_ratio: f64,
    pub background_color: Color,
    pub tier_colors: TierColors,
    pub tier_thresholds: TierThresholds,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            fill_ratio: 0.75,
            background_color: Color::from_rgb8(0xF6, 0xF6, 0xF6),
            tier_colors: TierColors::default(),
            tier_thresholds: TierThresholds::default(),
        }
    }
}

impl BandStyle {
    #[must_use]
    pub fn with_fill_ratio(mut self, fill_ratio: f64) -> Self {
        self.fill_ratio = fill_ratio;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, background_color: Color) -> Self {
        self.background_color = background_color;
        self
    }

    #[must_use]
    pub fn with_tier_colors(mut self, tier_colors: TierColors) -> Self {
        self.tier_colors = tier_colors;
        self
    }

    #[must_use]
    pub fn with_tier_thresholds(mut self, tier_thresholds: TierThresholds) -> Self {
        self.tier_thresholds = tier_thresholds;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.fill_ratio.is_finite() || self.fill_ratio <= 0.0 || self.fill_ratio > 1.0 {
            return Err(ChartError::InvalidStyle(
                "fill ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        validate_style_color(self.background_color, "band background")?;
        self.tier_colors.validate()?;
        self.tier_thresholds.validate()
    }
}

/// One ordered record collection drawn as one band chart.
///
/// The record at index `i` renders at logical abscissa `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub records: Vec<BandRecord>,
    pub style: BandStyle,
}

impl BandSeries {
    #[must_use]
    pub fn new(records: Vec<BandRecord>) -> Self {
        Self {
            records,
            style: BandStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: BandStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.style.validate()?;
        for record in &self.records {
            record.validate()?;
        }
        Ok(())
    }
}
