//! Ready-made leaf views.

use std::any::Any;

use stickyrows_ui_graphics::{Canvas, Color, Rect, Size};
use stickyrows_ui_layout::{Constraints, LayoutParams};

use crate::view::{Checkable, View, ViewState};

/// A view with a fixed natural size and an optional background fill.
///
/// Enough to build headers and rows whose content is painted elsewhere, and
/// the building block the demo and benches use. Giving it a checked state
/// makes it [`Checkable`].
#[derive(Debug, Default)]
pub struct LeafView {
    state: ViewState,
    natural_size: Size,
    background: Option<Color>,
    checked: Option<bool>,
    label: String,
}

impl LeafView {
    pub fn new(natural_size: Size) -> Self {
        Self {
            natural_size,
            ..Self::default()
        }
    }

    /// A full-width row of the given natural height.
    pub fn with_height(height: f32) -> Self {
        Self::new(Size::new(0.0, height))
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn layout_params(mut self, layout_params: LayoutParams) -> Self {
        self.state.layout_params = layout_params;
        self
    }

    /// Makes the view checkable, starting in the given state.
    pub fn checkable(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.label
    }

    pub fn set_text(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    pub fn set_natural_size(&mut self, natural_size: Size) {
        self.natural_size = natural_size;
    }
}

impl View for LeafView {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, constraints: Constraints) -> Size {
        // leaves fill the row width
        Size::new(constraints.resolved_width(), self.natural_size.height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        if let Some(color) = self.background {
            canvas.fill_rect(bounds, color);
        }
    }

    fn checkable(&self) -> Option<&dyn Checkable> {
        self.checked.map(|_| self as &dyn Checkable)
    }

    fn checkable_mut(&mut self) -> Option<&mut dyn Checkable> {
        match self.checked {
            Some(_) => Some(self),
            None => None,
        }
    }

    fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        Some(self)
    }
}

impl Checkable for LeafView {
    fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }

    fn set_checked(&mut self, checked: bool) {
        if self.checked.is_some() {
            self.checked = Some(checked);
        }
    }
}
