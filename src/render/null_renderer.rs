use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_fill_count: usize,
    pub last_path_count: usize,
    pub last_rect_count: usize,
    pub last_marker_count: usize,
    pub last_label_count: usize,
    pub last_highlight_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_fill_count = frame.fills.len();
        self.last_path_count = frame.paths.len();
        self.last_rect_count = frame.rects.len();
        self.last_marker_count = frame.markers.len();
        self.last_label_count = frame.labels.len();
        self.last_highlight_count = frame.highlight_markers.len() + frame.highlight_labels.len();
        Ok(())
    }
}
