use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::computator::{ChartComputator, PixelRect};
use crate::core::line::{FillStyle, Interpolation, LabelStyle, LineSeries, PointShape};
use crate::core::sample::PointSample;
use crate::error::ChartResult;
use crate::render::{
    FillPrimitive, GradientStop, MarkerKind, MarkerPrimitive, Paint, PathPrimitive, PathVerb,
    TextHAlign, TextPrimitive,
};

/// Smoothing factor for the local cubic Bezier pass.
pub const LINE_SMOOTHNESS: f64 = 0.15;

/// Tolerance used when testing whether a mapped sample lies inside the
/// content rect before drawing its marker/label.
pub const CHECK_PRECISION_PX: f64 = 2.0;

/// Stroke and fill geometry for one projected series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePathGeometry {
    pub stroke: Option<PathPrimitive>,
    pub fill: Option<FillPrimitive>,
}

impl LinePathGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stroke: None,
            fill: None,
        }
    }
}

/// Markers and labels for one projected series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointVisuals {
    pub markers: Vec<MarkerPrimitive>,
    pub labels: Vec<TextPrimitive>,
}

/// Projects a line series into stroke/fill geometry.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// exact same output. Series with fewer than two samples produce empty
/// geometry.
pub fn project_line_path(
    series: &LineSeries,
    computator: &ChartComputator,
) -> ChartResult<LinePathGeometry> {
    if series.samples.len() < 2 {
        return Ok(LinePathGeometry::empty());
    }

    let mapped = map_samples(&series.samples, computator)?;
    let style = &series.style;
    let content = computator.content_rect();
    let baseline_y = clamped_baseline_y(style.base_value, computator, content)?;

    let verbs = match style.interpolation {
        Interpolation::Straight => {
            straight_verbs(&series.samples, &mapped, style.gap_on_zero)
        }
        Interpolation::Smoothed => smooth_verbs(&mapped, baseline_y),
    };
    trace!(
        samples = mapped.len(),
        verbs = verbs.len(),
        "projected line path"
    );

    let fill = match &style.fill {
        FillStyle::None => None,
        FillStyle::Solid(color) => Some(FillPrimitive::new(
            close_to_series_extent(&verbs, &mapped, baseline_y),
            Paint::Solid(*color),
        )),
        FillStyle::Gradient(stops) => {
            let top_y = mapped
                .iter()
                .map(|point| point.1)
                .fold(f64::INFINITY, f64::min);
            Some(FillPrimitive::new(
                close_to_series_extent(&verbs, &mapped, baseline_y),
                vertical_gradient(content.left, top_y, baseline_y, stops),
            ))
        }
        FillStyle::GradientBand(stops) => Some(FillPrimitive::new(
            close_to_content_rect(&verbs, &mapped, content, baseline_y),
            vertical_gradient(content.left, content.top, baseline_y, stops),
        )),
    };

    // Gradient-band mode paints the closed area only; no stroke on top.
    let stroke = if matches!(style.fill, FillStyle::GradientBand(_)) {
        None
    } else {
        Some(PathPrimitive::new(
            verbs,
            style.stroke_width_px,
            style.color,
        ))
    };

    Ok(LinePathGeometry { stroke, fill })
}

/// Projects point markers and data labels for one series.
///
/// Only samples inside the content rect (within [`CHECK_PRECISION_PX`]) are
/// drawn. Sprite shapes treat a value of exactly 0 as "no reading" and skip
/// both marker and label.
pub fn project_point_visuals(
    series: &LineSeries,
    computator: &ChartComputator,
    labels_enabled: bool,
) -> ChartResult<PointVisuals> {
    let style = &series.style;
    let content = computator.content_rect();
    let mut markers = Vec::new();
    let mut labels = Vec::new();

    for sample in &series.samples {
        let raw_x = computator.screen_x(sample.x)?;
        let raw_y = computator.screen_y(sample.y)?;
        if !computator.is_inside_content(raw_x, raw_y, CHECK_PRECISION_PX) {
            continue;
        }

        let Some(kind) = resolve_marker_kind(&style.point_shape, sample) else {
            continue;
        };
        markers.push(MarkerPrimitive::new(
            raw_x,
            raw_y,
            2.0 * style.point_radius_px,
            kind,
            style.color,
        ));

        if labels_enabled {
            if let Some(label) = place_point_label(
                sample,
                raw_x,
                raw_y,
                style.point_radius_px,
                style.base_value,
                &style.labels,
                style.color,
                content,
            ) {
                labels.push(label);
            }
        }
    }

    Ok(PointVisuals { markers, labels })
}

/// Resolves the marker glyph for one sample, or `None` when the sample draws
/// no marker.
#[must_use]
pub fn resolve_marker_kind(shape: &PointShape, sample: &PointSample) -> Option<MarkerKind> {
    match shape {
        PointShape::Square => Some(MarkerKind::Square),
        PointShape::Circle => Some(MarkerKind::Circle),
        PointShape::ValueSprite(table) => {
            if sample.y == 0.0 {
                return None;
            }
            table
                .resolve(sample.y)
                .map(|key| MarkerKind::Sprite(key.to_owned()))
        }
        PointShape::StateSprite(table) => {
            if sample.y == 0.0 {
                return None;
            }
            table
                .resolve(sample.range_state)
                .or_else(|| table.fallback())
                .map(|key| MarkerKind::Sprite(key.to_owned()))
        }
    }
}

/// Computes the label box for one sample.
///
/// The box starts above the point when `value >= base_value`, below
/// otherwise, then is flipped/shifted edge by edge so it never leaves
/// `content`: top overflow flips below, bottom overflow flips above, left
/// overflow shifts right of the point, right overflow shifts left of it.
#[must_use]
pub fn place_label_box(
    raw_x: f64,
    raw_y: f64,
    value: f64,
    base_value: f64,
    box_width: f64,
    box_height: f64,
    offset: f64,
    content: PixelRect,
) -> PixelRect {
    let mut left = raw_x - box_width / 2.0;
    let mut right = raw_x + box_width / 2.0;

    let (mut top, mut bottom) = if value >= base_value {
        (raw_y - offset - box_height, raw_y - offset)
    } else {
        (raw_y + offset, raw_y + offset + box_height)
    };

    if top < content.top {
        top = raw_y + offset;
        bottom = raw_y + offset + box_height;
    }
    if bottom > content.bottom {
        top = raw_y - offset - box_height;
        bottom = raw_y - offset;
    }
    if left < content.left {
        left = raw_x;
        right = raw_x + box_width;
    }
    if right > content.right {
        left = raw_x - box_width;
        right = raw_x;
    }

    PixelRect::new(left, top, right, bottom)
}

/// Highlight visuals for the selected sample: darkened marker at an enlarged
/// radius, plus the label when the style asks for it.
pub fn project_highlight(
    series: &LineSeries,
    sample_index: usize,
    touch_tolerance_px: f64,
    computator: &ChartComputator,
    label_in_highlight: bool,
) -> ChartResult<Option<PointVisuals>> {
    let Some(sample) = series.samples.get(sample_index) else {
        return Ok(None);
    };
    let style = &series.style;
    let raw_x = computator.screen_x(sample.x)?;
    let raw_y = computator.screen_y(sample.y)?;
    if !computator.is_inside_content(raw_x, raw_y, CHECK_PRECISION_PX) {
        return Ok(None);
    }
    let Some(kind) = resolve_marker_kind(&style.point_shape, sample) else {
        return Ok(None);
    };

    let enlarged_radius = style.point_radius_px + touch_tolerance_px;
    let marker = MarkerPrimitive::new(
        raw_x,
        raw_y,
        2.0 * enlarged_radius,
        kind,
        style.color.darken(0.7),
    );

    let mut labels = Vec::new();
    if label_in_highlight {
        if let Some(label) = place_point_label(
            sample,
            raw_x,
            raw_y,
            style.point_radius_px,
            style.base_value,
            &style.labels,
            style.color.darken(0.7),
            computator.content_rect(),
        ) {
            labels.push(label);
        }
    }

    Ok(Some(PointVisuals {
        markers: vec![marker],
        labels,
    }))
}

fn map_samples(
    samples: &[PointSample],
    computator: &ChartComputator,
) -> ChartResult<Vec<(f64, f64)>> {
    let mut mapped = Vec::with_capacity(samples.len());
    for sample in samples {
        let x = computator.screen_x(sample.x)?;
        let y = computator.screen_y(sample.y)?;
        mapped.push((x, y));
    }
    Ok(mapped)
}

fn clamped_baseline_y(
    base_value: f64,
    computator: &ChartComputator,
    content: PixelRect,
) -> ChartResult<f64> {
    let raw = computator.screen_y(base_value)?;
    Ok(raw.clamp(content.top, content.bottom))
}

fn straight_verbs(
    samples: &[PointSample],
    mapped: &[(f64, f64)],
    gap_on_zero: bool,
) -> Vec<PathVerb> {
    let mut verbs = Vec::with_capacity(mapped.len());
    let mut pen_down = false;
    for (sample, &(x, y)) in samples.iter().zip(mapped) {
        if gap_on_zero && sample.y == 0.0 {
            // Gap sample: lift the pen, emit no vertex.
            pen_down = false;
            continue;
        }
        if pen_down {
            verbs.push(PathVerb::LineTo { x, y });
        } else {
            verbs.push(PathVerb::MoveTo { x, y });
            pen_down = true;
        }
    }
    verbs
}

/// Local Catmull-Rom-style smoothing: each segment becomes one cubic Bezier
/// whose control points are derived from the two neighbor samples. Edge
/// samples reuse themselves as missing neighbors. When a segment ends on the
/// baseline but a control point would overshoot past it, both control points
/// clamp to the baseline so flat sections stay flat.
fn smooth_verbs(mapped: &[(f64, f64)], baseline_y: f64) -> Vec<PathVerb> {
    let mut verbs = Vec::with_capacity(mapped.len());
    for index in 0..mapped.len() {
        let (curr_x, curr_y) = mapped[index];
        if index == 0 {
            verbs.push(PathVerb::MoveTo {
                x: curr_x,
                y: curr_y,
            });
            continue;
        }
        let (prev_x, prev_y) = mapped[index - 1];
        let (preprev_x, preprev_y) = if index > 1 {
            mapped[index - 2]
        } else {
            (prev_x, prev_y)
        };
        let (next_x, next_y) = if index < mapped.len() - 1 {
            mapped[index + 1]
        } else {
            (curr_x, curr_y)
        };

        let cp1_x = prev_x + LINE_SMOOTHNESS * (curr_x - preprev_x);
        let mut cp1_y = prev_y + LINE_SMOOTHNESS * (curr_y - preprev_y);
        let cp2_x = curr_x - LINE_SMOOTHNESS * (next_x - prev_x);
        let mut cp2_y = curr_y - LINE_SMOOTHNESS * (next_y - prev_y);

        // Screen Y grows downwards, so "past the baseline" means greater Y.
        if curr_y == baseline_y && (cp1_y > baseline_y || cp2_y > baseline_y) {
            cp1_y = baseline_y;
            cp2_y = baseline_y;
        }

        verbs.push(PathVerb::CubicTo {
            x1: cp1_x,
            y1: cp1_y,
            x2: cp2_x,
            y2: cp2_y,
            x: curr_x,
            y: curr_y,
        });
    }
    verbs
}

fn close_to_series_extent(
    verbs: &[PathVerb],
    mapped: &[(f64, f64)],
    baseline_y: f64,
) -> Vec<PathVerb> {
    let first = mapped[0];
    let last = mapped[mapped.len() - 1];
    let mut closed = verbs.to_vec();
    closed.push(PathVerb::LineTo {
        x: last.0,
        y: baseline_y,
    });
    closed.push(PathVerb::LineTo {
        x: first.0,
        y: baseline_y,
    });
    // Explicit closure back to the first vertex; no implicit close rules.
    closed.push(PathVerb::LineTo {
        x: first.0,
        y: first.1,
    });
    closed
}

fn close_to_content_rect(
    verbs: &[PathVerb],
    mapped: &[(f64, f64)],
    content: PixelRect,
    baseline_y: f64,
) -> Vec<PathVerb> {
    let first = mapped[0];
    let mut closed = verbs.to_vec();
    closed.push(PathVerb::LineTo {
        x: content.right,
        y: baseline_y,
    });
    closed.push(PathVerb::LineTo {
        x: content.left,
        y: baseline_y,
    });
    closed.push(PathVerb::LineTo {
        x: first.0,
        y: first.1,
    });
    closed
}

fn vertical_gradient(x: f64, y_start: f64, y_end: f64, stops: &[GradientStop]) -> Paint {
    Paint::LinearGradient {
        x1: x,
        y1: y_start,
        x2: x,
        y2: y_end,
        stops: stops.to_vec(),
    }
}

#[allow(clippy::too_many_arguments)]
fn place_point_label(
    sample: &PointSample,
    raw_x: f64,
    raw_y: f64,
    point_radius_px: f64,
    base_value: f64,
    labels: &LabelStyle,
    series_color: crate::render::Color,
    content: PixelRect,
) -> Option<TextPrimitive> {
    let text = match &sample.label {
        Some(label) => label.clone(),
        None => format!("{:.*}", labels.decimals, sample.y),
    };
    if text.is_empty() {
        return None;
    }

    let box_width =
        text.chars().count() as f64 * labels.char_width_px + 2.0 * labels.horizontal_padding_px;
    let rect = place_label_box(
        raw_x,
        raw_y,
        sample.y,
        base_value,
        box_width,
        labels.height_px,
        point_radius_px + labels.offset_px,
        content,
    );

    let color = labels.text_color.unwrap_or(series_color);
    // Anchor text at the box center; backends align around it.
    Some(TextPrimitive::new(
        text,
        rect.center_x(),
        rect.bottom - 0.5 * (labels.height_px - labels.font_size_px),
        labels.font_size_px,
        color,
        TextHAlign::Center,
    ))
}
