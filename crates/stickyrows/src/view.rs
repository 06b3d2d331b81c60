//! The view contract rows are built from.
//!
//! A [`View`] is a measurable, drawable leaf or container owned through a
//! [`ViewHandle`]. Handles are shared (`Rc`) because a header may move between
//! a row and the shim's free-list, and identity matters: two handles are the
//! same view only if they point at the same allocation.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use stickyrows_ui_graphics::{Canvas, Rect, Size};
use stickyrows_ui_layout::{Constraints, LayoutParams, Visibility};

use crate::compositor::RowCompositor;

/// Callback installed on a view and fired when the view is tapped.
pub type ClickHandler = Rc<dyn Fn(&ViewHandle)>;

/// Bookkeeping every view carries. Implementors embed one and expose it
/// through [`View::state`] / [`View::state_mut`].
#[derive(Default)]
pub struct ViewState {
    pub visibility: Visibility,
    pub layout_params: LayoutParams,
    measured: Size,
    bounds: Rect,
    attached: bool,
    click_handler: Option<ClickHandler>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_params(layout_params: LayoutParams) -> Self {
        Self {
            layout_params,
            ..Self::default()
        }
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn click_handler(&self) -> Option<ClickHandler> {
        self.click_handler.clone()
    }
}

impl fmt::Debug for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewState")
            .field("visibility", &self.visibility)
            .field("layout_params", &self.layout_params)
            .field("measured", &self.measured)
            .field("bounds", &self.bounds)
            .field("attached", &self.attached)
            .field("clickable", &self.click_handler.is_some())
            .finish()
    }
}

/// Selection capability. A row whose item exposes this is hosted in a
/// checkable compositor so the list can treat it as selectable.
pub trait Checkable {
    fn is_checked(&self) -> bool;
    fn set_checked(&mut self, checked: bool);

    fn toggle(&mut self) {
        let checked = self.is_checked();
        self.set_checked(!checked);
    }
}

/// A renderable unit: a row item, a group header, or anything a row hosts.
pub trait View {
    fn state(&self) -> &ViewState;
    fn state_mut(&mut self) -> &mut ViewState;

    /// Returns the size the content wants under `constraints`. The container
    /// clamps the result and records it.
    fn measure(&mut self, constraints: Constraints) -> Size;

    /// Paints the content inside `bounds`, given in the container's space.
    fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        let _ = (canvas, bounds);
    }

    fn checkable(&self) -> Option<&dyn Checkable> {
        None
    }

    fn checkable_mut(&mut self) -> Option<&mut dyn Checkable> {
        None
    }

    /// Concrete access for adapters rebinding a recycled view. Views that
    /// want to be rebound return `Some(self)`.
    fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        None
    }

    /// Called after the view becomes a child of a container.
    fn on_attach(&mut self) {}

    /// Called after the view is removed from its container.
    fn on_detach(&mut self) {}
}

/// Shared, identity-compared handle to a [`View`].
#[derive(Clone)]
pub struct ViewHandle(Rc<RefCell<dyn View>>);

impl ViewHandle {
    pub fn new<V: View + 'static>(view: V) -> Self {
        Self(Rc::new(RefCell::new(view)))
    }

    /// Wraps an existing shared view, keeping the concrete handle usable by
    /// the caller.
    pub fn from_rc<V: View + 'static>(view: Rc<RefCell<V>>) -> Self {
        Self(view)
    }

    /// Runs `f` on the concrete view if it is a `V` that opted into
    /// [`View::as_any_mut`].
    pub fn with_view<V: View + 'static, R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let mut view = self.0.borrow_mut();
        let concrete = view.as_any_mut()?.downcast_mut::<V>()?;
        Some(f(concrete))
    }

    pub fn borrow(&self) -> Ref<'_, dyn View> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn View> {
        self.0.borrow_mut()
    }

    /// True when both handles refer to the same view.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    pub fn visibility(&self) -> Visibility {
        self.0.borrow().state().visibility
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.0.borrow_mut().state_mut().visibility = visibility;
    }

    pub fn layout_params(&self) -> LayoutParams {
        self.0.borrow().state().layout_params
    }

    pub fn measured_size(&self) -> Size {
        self.0.borrow().state().measured
    }

    pub fn bounds(&self) -> Rect {
        self.0.borrow().state().bounds
    }

    pub fn is_attached(&self) -> bool {
        self.0.borrow().state().attached
    }

    pub fn is_checkable(&self) -> bool {
        self.0.borrow().checkable().is_some()
    }

    pub fn set_click_handler(&self, handler: Option<ClickHandler>) {
        self.0.borrow_mut().state_mut().click_handler = handler;
    }

    /// Fires the installed click handler. Returns false when the view has
    /// none.
    pub fn perform_click(&self) -> bool {
        // Cloned out first: the handler may borrow this view again.
        let handler = self.0.borrow().state().click_handler.clone();
        match handler {
            Some(handler) => {
                handler(self);
                true
            }
            None => false,
        }
    }

    /// Measures the view and records the clamped result. Containers call
    /// this; a view is measured by whoever lays it out.
    pub fn measure(&self, constraints: Constraints) -> Size {
        let mut view = self.0.borrow_mut();
        let desired = view.measure(constraints);
        let measured = constraints.constrain_size(desired);
        view.state_mut().measured = measured;
        measured
    }

    /// Places the view at `bounds` in its container's space.
    pub fn layout(&self, bounds: Rect) {
        self.0.borrow_mut().state_mut().bounds = bounds;
    }

    /// Draws the view at its laid-out bounds, unless it is hidden.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let view = self.0.borrow();
        let state = view.state();
        if state.visibility.is_visible() {
            view.draw(canvas, state.bounds);
        }
    }

    pub(crate) fn attach(&self) {
        let mut view = self.0.borrow_mut();
        view.state_mut().attached = true;
        view.on_attach();
    }

    pub(crate) fn detach(&self) {
        let mut view = self.0.borrow_mut();
        view.state_mut().attached = false;
        view.on_detach();
    }
}

impl PartialEq for ViewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ViewHandle {}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewHandle({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// The container a provider is building a view for.
#[derive(Clone, Copy, Debug)]
pub enum ViewParent<'a> {
    /// The hosting list; rows are measured at `width`.
    List { width: f32 },
    /// The composite row a header is about to be attached to.
    Row(&'a RowCompositor),
}

impl ViewParent<'_> {
    pub fn list(width: f32) -> Self {
        ViewParent::List { width }
    }
}
