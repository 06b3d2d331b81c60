use stickyrows_ui_graphics::{Canvas, Color, Rect};

/// Canvas that remembers every fill instead of painting it.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    fills: Vec<(Rect, Color)>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> &[(Rect, Color)] {
        &self.fills
    }

    /// Rectangles filled with exactly `color`, in paint order.
    pub fn rects_with(&self, color: Color) -> Vec<Rect> {
        self.fills
            .iter()
            .filter(|(_, fill)| *fill == color)
            .map(|(rect, _)| *rect)
            .collect()
    }

    pub fn clear(&mut self) {
        self.fills.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }
}
