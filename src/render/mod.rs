mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FillPrimitive, GradientStop, ImagePrimitive, LinePrimitive, MarkerKind,
    MarkerPrimitive, Paint, PathPrimitive, PathVerb, RectPrimitive, TextHAlign, TextPrimitive,
};

pub(crate) use primitives::validate_gradient_stops;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
