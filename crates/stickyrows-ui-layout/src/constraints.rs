//! Layout constraints system

use stickyrows_ui_graphics::Size;

/// Constraints used during layout measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    /// Exact width, any height. This is how list rows are measured.
    pub fn fixed_width(width: f32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: 0.0,
            max_height: f32::INFINITY,
        }
    }

    /// Returns true if the width is bounded (max_width is finite).
    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    /// The width a container should report: the max when bounded, otherwise
    /// the min.
    pub fn resolved_width(&self) -> f32 {
        if self.has_bounded_width() {
            self.max_width
        } else {
            self.min_width
        }
    }

    /// Constrains the provided width and height to fit within these constraints.
    pub fn constrain(&self, width: f32, height: f32) -> (f32, f32) {
        (
            width.clamp(self.min_width, self.max_width),
            height.clamp(self.min_height, self.max_height),
        )
    }

    /// Same as [`Constraints::constrain`] but for a [`Size`].
    pub fn constrain_size(&self, size: Size) -> Size {
        let (width, height) = self.constrain(size.width, size.height);
        Size::new(width, height)
    }

    /// Creates new constraints with tightened height (min = max = given height).
    pub fn tighten_height(self, height: f32) -> Self {
        Self {
            min_height: height,
            max_height: height,
            ..self
        }
    }
}
