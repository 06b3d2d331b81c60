//! Drawing contract shared by views and dividers.

use crate::{Color, Rect};

/// Paint target handed to views during the draw pass.
///
/// Coordinates are in the space of the container being drawn; the host is
/// responsible for translating into window space.
pub trait Canvas {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Something that knows how to paint itself into a rectangle.
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect);
}

/// Drawable that fills its bounds with a single color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorDrawable {
    pub color: Color,
}

impl ColorDrawable {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Drawable for ColorDrawable {
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        if self.color.is_transparent() || bounds.height <= 0.0 {
            return;
        }
        canvas.fill_rect(bounds, self.color);
    }
}
