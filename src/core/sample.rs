use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One sample in a line series.
///
/// `x` is the logical abscissa (slot index or seconds, caller's choice) and is
/// assumed ascending across a series; the engine does not reorder samples.
/// `range_state` is a free-form category tag consumed by state-sprite point
/// shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSample {
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    pub range_state: i32,
}

impl PointSample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            range_state: 0,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_range_state(mut self, range_state: i32) -> Self {
        self.range_state = range_state;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "sample coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
