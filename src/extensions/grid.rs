use serde::{Deserialize, Serialize};

use crate::core::computator::ChartComputator;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive};

/// Uniform square grid mesh drawn over the content rect, beneath series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub color: Color,
    pub stroke_width_px: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 25,
            color: Color::rgba(0.0, 0.0, 0.0, 0.78),
            stroke_width_px: 1.0,
        }
    }
}

impl GridSpec {
    pub fn validate(self) -> ChartResult<()> {
        if self.columns == 0 {
            return Err(ChartError::InvalidStyle(
                "grid must have at least one column".to_owned(),
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidStyle(
                "grid stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate().map_err(|_| {
            ChartError::InvalidStyle("grid color channels must be in [0, 1]".to_owned())
        })
    }

    /// Row count follows from the square-cell rule.
    #[must_use]
    pub fn rows_for(self, computator: &ChartComputator) -> u32 {
        let content = computator.content_rect();
        let cell = content.width() / f64::from(self.columns);
        if cell <= 0.0 {
            return 0;
        }
        (content.height() / cell).floor() as u32
    }
}

/// Projects the grid mesh into line primitives. Cells are square; the cell
/// edge is the content width divided by the column count.
pub fn project_grid(spec: GridSpec, computator: &ChartComputator) -> ChartResult<Vec<LinePrimitive>> {
    spec.validate()?;
    let content = computator.content_rect();
    let cell = content.width() / f64::from(spec.columns);
    let rows = spec.rows_for(computator);

    let mut lines = Vec::with_capacity(spec.columns as usize + rows as usize + 2);
    for column in 0..=spec.columns {
        let x = content.left + f64::from(column) * cell;
        lines.push(LinePrimitive::new(
            x,
            content.top,
            x,
            content.bottom,
            spec.stroke_width_px,
            spec.color,
        ));
    }
    for row in 0..=rows {
        let y = content.top + f64::from(row) * cell;
        lines.push(LinePrimitive::new(
            content.left,
            y,
            content.right,
            y,
            spec.stroke_width_px,
            spec.color,
        ));
    }
    Ok(lines)
}
