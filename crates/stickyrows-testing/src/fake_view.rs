use std::any::Any;

use stickyrows::{Checkable, View, ViewHandle, ViewState};
use stickyrows_ui_graphics::{Canvas, Color, Rect, Size};
use stickyrows_ui_layout::{Constraints, LayoutParams, Visibility};

/// Leaf view that counts what the container does to it.
#[derive(Debug, Default)]
pub struct FakeView {
    state: ViewState,
    label: String,
    natural_height: f32,
    fill: Option<Color>,
    checked: Option<bool>,
    attach_count: usize,
    detach_count: usize,
    measure_count: usize,
    last_constraints: Option<Constraints>,
}

impl FakeView {
    pub fn new(label: impl Into<String>, natural_height: f32) -> Self {
        Self {
            label: label.into(),
            natural_height,
            ..Self::default()
        }
    }

    pub fn checkable(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn exact_height(mut self, height: f32) -> Self {
        self.state.layout_params = LayoutParams::exact_height(height);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.state.visibility = visibility;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn into_handle(self) -> ViewHandle {
        ViewHandle::new(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn natural_height(&self) -> f32 {
        self.natural_height
    }

    pub fn set_natural_height(&mut self, natural_height: f32) {
        self.natural_height = natural_height;
    }

    pub fn is_checkable(&self) -> bool {
        self.checked.is_some()
    }

    /// `None` drops the checkable capability.
    pub fn set_checkable(&mut self, checked: Option<bool>) {
        self.checked = checked;
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.state.visibility = visibility;
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    pub fn last_constraints(&self) -> Option<Constraints> {
        self.last_constraints
    }
}

impl View for FakeView {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, constraints: Constraints) -> Size {
        self.measure_count += 1;
        self.last_constraints = Some(constraints);
        Size::new(constraints.resolved_width(), self.natural_height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        if let Some(color) = self.fill {
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

    fn on_attach(&mut self) {
        self.attach_count += 1;
    }

    fn on_detach(&mut self) {
        self.detach_count += 1;
    }
}

impl Checkable for FakeView {
    fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }

    fn set_checked(&mut self, checked: bool) {
        if self.checked.is_some() {
            self.checked = Some(checked);
        }
    }
}

/// Reads a [`FakeView`] behind a handle. Panics if the handle holds some
/// other view.
pub fn inspect<R>(handle: &ViewHandle, f: impl FnOnce(&FakeView) -> R) -> R {
    handle
        .with_view(|view: &mut FakeView| f(view))
        .expect("handle does not hold a FakeView")
}

pub fn label_of(handle: &ViewHandle) -> String {
    inspect(handle, |view| view.label().to_owned())
}
