//! Pure math/data for drawing in stickyrows
//!
//! Geometry primitives, colors, and the small drawing contract
//! ([`Canvas`] and [`Drawable`]) that rows and dividers paint through.

mod canvas;
mod color;
mod geometry;

pub use canvas::*;
pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::canvas::{Canvas, ColorDrawable, Drawable};
    pub use crate::color::Color;
    pub use crate::geometry::{Rect, Size};
}
