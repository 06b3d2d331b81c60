//! Composite row: optional header or divider on top, item below.
//!
//! The hosting list sees one [`RowCompositor`] per visible slot. Which of the
//! three parts are present decides the row's height and where the item
//! starts; the floating header overlay reads [`RowCompositor::item_top`] to
//! work out how far to push the pinned header up.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use stickyrows_ui_graphics::{Canvas, Drawable, Rect, Size};
use stickyrows_ui_layout::Constraints;

use crate::view::ViewHandle;

/// Separator painted above rows that have no header.
#[derive(Clone)]
pub struct Divider {
    drawable: Rc<dyn Drawable>,
    height: f32,
}

impl Divider {
    pub fn new(drawable: impl Drawable + 'static, height: f32) -> Self {
        Self::from_rc(Rc::new(drawable), height)
    }

    pub fn from_rc(drawable: Rc<dyn Drawable>, height: f32) -> Self {
        Self {
            drawable,
            height: height.max(0.0),
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn drawable(&self) -> &Rc<dyn Drawable> {
        &self.drawable
    }

    /// Same drawable instance and same thickness.
    pub fn same_as(&self, other: &Divider) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.drawable), Rc::as_ptr(&other.drawable))
            && self.height == other.height
    }
}

impl fmt::Debug for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Divider")
            .field("drawable", &Rc::as_ptr(&self.drawable).cast::<()>())
            .field("height", &self.height)
            .finish()
    }
}

/// Which shell a row is hosted in. Lists treat selectable rows structurally,
/// so an item exposing [`Checkable`](crate::Checkable) needs the checkable
/// shell and a plain item must not end up in one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RowVariant {
    #[default]
    Plain,
    Checkable,
}

impl RowVariant {
    /// The variant an item requires.
    pub fn of(item: &ViewHandle) -> Self {
        if item.is_checkable() {
            RowVariant::Checkable
        } else {
            RowVariant::Plain
        }
    }
}

/// Pending work on a compositor since the host last looked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DirtyFlags(u8);

impl DirtyFlags {
    pub const NONE: Self = Self(0);
    pub const MEASURE: Self = Self(1 << 0);
    pub const DRAW: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Header + divider + item measured and placed as one row.
pub struct RowCompositor {
    variant: RowVariant,
    item: Option<ViewHandle>,
    header: Option<ViewHandle>,
    divider: Option<Divider>,
    item_top: f32,
    size: Size,
    dirty: DirtyFlags,
}

impl RowCompositor {
    pub fn new(variant: RowVariant) -> Self {
        Self {
            variant,
            item: None,
            header: None,
            divider: None,
            item_top: 0.0,
            size: Size::ZERO,
            dirty: DirtyFlags::NONE,
        }
    }

    pub fn plain() -> Self {
        Self::new(RowVariant::Plain)
    }

    pub fn checkable() -> Self {
        Self::new(RowVariant::Checkable)
    }

    pub fn variant(&self) -> RowVariant {
        self.variant
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// The row's item. Only `None` before the first [`update`](Self::update).
    pub fn item(&self) -> Option<&ViewHandle> {
        self.item.as_ref()
    }

    pub fn header(&self) -> Option<&ViewHandle> {
        self.header.as_ref()
    }

    pub fn divider(&self) -> Option<&Divider> {
        self.divider.as_ref()
    }

    /// Offset of the item band from the top of the row, as of the last
    /// layout.
    pub fn item_top(&self) -> f32 {
        self.item_top
    }

    /// Size from the last measure or layout pass.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rebinds the row. Children are swapped only when their identity
    /// changes, so re-applying the same triple is a no-op. A header replaced
    /// by `None` is detached, not destroyed; its owner decides what happens
    /// next.
    pub fn update(&mut self, item: ViewHandle, header: Option<ViewHandle>, divider: Option<Divider>) {
        let same_item = self
            .item
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&item));
        if !same_item {
            if let Some(previous) = self.item.take() {
                previous.detach();
            }
            item.attach();
            self.item = Some(item);
            self.dirty.insert(DirtyFlags::MEASURE);
        }

        let same_header = match (&self.header, &header) {
            (Some(current), Some(next)) => current.ptr_eq(next),
            (None, None) => true,
            _ => false,
        };
        if !same_header {
            if let Some(previous) = self.header.take() {
                previous.detach();
            }
            if let Some(next) = &header {
                next.attach();
            }
            self.header = header;
            self.dirty.insert(DirtyFlags::MEASURE);
        }

        let same_divider = match (&self.divider, &divider) {
            (Some(current), Some(next)) => current.same_as(next),
            (None, None) => true,
            _ => false,
        };
        if !same_divider {
            let old_height = self.divider.as_ref().map_or(0.0, Divider::height);
            let new_height = divider.as_ref().map_or(0.0, Divider::height);
            if old_height != new_height {
                self.dirty.insert(DirtyFlags::MEASURE);
            }
            self.divider = divider;
            self.dirty.insert(DirtyFlags::DRAW);
        }
    }

    /// Detaches and returns the header, leaving the row headerless.
    pub(crate) fn detach_header(&mut self) -> Option<ViewHandle> {
        let header = self.header.take()?;
        header.detach();
        self.dirty.insert(DirtyFlags::MEASURE);
        Some(header)
    }

    /// Detaches every child. Used when a shell is discarded so its children
    /// can be attached elsewhere.
    pub(crate) fn clear(&mut self) {
        if let Some(header) = self.header.take() {
            header.detach();
        }
        if let Some(item) = self.item.take() {
            item.detach();
        }
        self.divider = None;
        self.dirty.insert(DirtyFlags::MEASURE);
    }

    /// Measures the row at the constraint width. The height constraint is
    /// ignored: a row is exactly as tall as its parts.
    pub fn measure(&mut self, constraints: Constraints) -> Size {
        let width = constraints.resolved_width();
        let row = Constraints::fixed_width(width);
        let Some(item) = &self.item else {
            self.size = Size::new(width, 0.0);
            return self.size;
        };
        let item_gone = item.visibility().is_gone();
        let mut height = 0.0;

        // a header takes the divider's place
        if let Some(header) = &self.header {
            let header_constraints = match header.layout_params().height.exact() {
                Some(exact) if exact > 0.0 => row.tighten_height(exact),
                _ => row,
            };
            height += header.measure(header_constraints).height;
        } else if let Some(divider) = &self.divider {
            if !item_gone {
                height += divider.height;
            }
        }

        if item_gone {
            item.measure(row.tighten_height(0.0));
        } else {
            let item_constraints = match item.layout_params().height.exact() {
                Some(exact) if exact >= 0.0 => row.tighten_height(exact),
                _ => row,
            };
            height += item.measure(item_constraints).height;
        }

        self.size = Size::new(width, height);
        self.size
    }

    /// Places the children inside a row of `size`, in row-local
    /// coordinates.
    pub fn layout(&mut self, size: Size) {
        self.size = size;
        self.item_top = if let Some(header) = &self.header {
            let header_height = header.measured_size().height;
            header.layout(Rect::new(0.0, 0.0, size.width, header_height));
            header_height
        } else if let Some(divider) = &self.divider {
            divider.height
        } else {
            0.0
        };
        if let Some(item) = &self.item {
            item.layout(Rect::from_ltrb(0.0, self.item_top, size.width, size.height));
        }
    }

    /// Band the divider is painted in, when it is painted at all.
    pub fn divider_bounds(&self) -> Option<Rect> {
        if self.header.is_some() {
            return None;
        }
        let divider = self.divider.as_ref()?;
        let item = self.item.as_ref()?;
        if item.visibility().is_gone() {
            return None;
        }
        Some(Rect::new(0.0, 0.0, self.size.width, divider.height))
    }

    /// Children in top-to-bottom order.
    pub fn children(&self) -> SmallVec<[&ViewHandle; 2]> {
        self.header.iter().chain(self.item.iter()).collect()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for child in self.children() {
            child.draw(canvas);
        }
        if let (Some(divider), Some(bounds)) = (&self.divider, self.divider_bounds()) {
            divider.drawable.draw(canvas, bounds);
        }
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Returns the pending flags and clears them.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// Checked state of the item. Plain rows are never checked.
    pub fn is_checked(&self) -> bool {
        if self.variant != RowVariant::Checkable {
            return false;
        }
        self.item.as_ref().is_some_and(|item| {
            item.borrow()
                .checkable()
                .is_some_and(|checkable| checkable.is_checked())
        })
    }

    /// Forwards to the item on checkable rows; ignored on plain rows.
    pub fn set_checked(&mut self, checked: bool) {
        if self.variant != RowVariant::Checkable {
            return;
        }
        if let Some(item) = &self.item {
            if let Some(checkable) = item.borrow_mut().checkable_mut() {
                checkable.set_checked(checked);
            }
            self.dirty.insert(DirtyFlags::DRAW);
        }
    }

    pub fn toggle(&mut self) {
        let checked = self.is_checked();
        self.set_checked(!checked);
    }
}

impl Default for RowCompositor {
    fn default() -> Self {
        Self::plain()
    }
}

impl fmt::Debug for RowCompositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCompositor")
            .field("variant", &self.variant)
            .field("item", &self.item)
            .field("header", &self.header)
            .field("divider", &self.divider)
            .field("item_top", &self.item_top)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Checkable, View, ViewState};
    use std::cell::RefCell;
    use stickyrows_ui_graphics::{Color, ColorDrawable};
    use stickyrows_ui_layout::{LayoutParams, Visibility};

    #[derive(Default)]
    struct Probe {
        state: ViewState,
        natural_height: f32,
        attaches: usize,
        detaches: usize,
        checked: Option<bool>,
    }

    impl View for Probe {
        fn state(&self) -> &ViewState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ViewState {
            &mut self.state
        }

        fn measure(&mut self, constraints: Constraints) -> Size {
            Size::new(constraints.max_width, self.natural_height)
        }

        fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
            canvas.fill_rect(bounds, Color::WHITE);
        }

        fn checkable(&self) -> Option<&dyn Checkable> {
            self.checked.as_ref().map(|_| self as &dyn Checkable)
        }

        fn checkable_mut(&mut self) -> Option<&mut dyn Checkable> {
            if self.checked.is_some() {
                Some(self)
            } else {
                None
            }
        }

        fn on_attach(&mut self) {
            self.attaches += 1;
        }

        fn on_detach(&mut self) {
            self.detaches += 1;
        }
    }

    impl Checkable for Probe {
        fn is_checked(&self) -> bool {
            self.checked.unwrap_or(false)
        }

        fn set_checked(&mut self, checked: bool) {
            self.checked = Some(checked);
        }
    }

    fn probe(natural_height: f32) -> (Rc<RefCell<Probe>>, ViewHandle) {
        let view = Rc::new(RefCell::new(Probe {
            natural_height,
            ..Probe::default()
        }));
        let handle = ViewHandle::from_rc(Rc::clone(&view));
        (view, handle)
    }

    #[derive(Default)]
    struct Fills(Vec<(Rect, Color)>);

    impl Canvas for Fills {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.0.push((rect, color));
        }
    }

    fn divider(height: f32) -> Divider {
        Divider::new(ColorDrawable::new(Color::BLACK), height)
    }

    #[test]
    fn divider_adds_to_item_height() {
        let (_, item) = probe(40.0);
        let mut row = RowCompositor::plain();
        row.update(item, None, Some(divider(8.0)));

        let size = row.measure(Constraints::fixed_width(320.0));

        assert_eq!(size, Size::new(320.0, 48.0));
    }

    #[test]
    fn header_replaces_divider() {
        let (_, item) = probe(40.0);
        let (_, header) = probe(99.0);
        header.borrow_mut().state_mut().layout_params = LayoutParams::exact_height(30.0);
        let mut row = RowCompositor::plain();
        row.update(item, Some(header.clone()), Some(divider(8.0)));

        let size = row.measure(Constraints::fixed_width(320.0));

        assert_eq!(size.height, 70.0);
        assert_eq!(header.measured_size().height, 30.0);
    }

    #[test]
    fn gone_item_collapses_row() {
        let (_, item) = probe(40.0);
        item.set_visibility(Visibility::Gone);
        let mut row = RowCompositor::plain();
        row.update(item.clone(), None, None);
        assert_eq!(row.measure(Constraints::fixed_width(100.0)).height, 0.0);

        // the divider collapses with the item
        row.update(item, None, Some(divider(8.0)));
        assert_eq!(row.measure(Constraints::fixed_width(100.0)).height, 0.0);
    }

    #[test]
    fn exact_item_height_wins_over_content() {
        let (_, item) = probe(40.0);
        item.borrow_mut().state_mut().layout_params = LayoutParams::exact_height(0.0);
        let mut row = RowCompositor::plain();
        row.update(item, None, None);

        assert_eq!(row.measure(Constraints::fixed_width(100.0)).height, 0.0);
    }

    #[test]
    fn zero_exact_header_height_measures_content() {
        let (_, item) = probe(10.0);
        let (_, header) = probe(24.0);
        header.borrow_mut().state_mut().layout_params = LayoutParams::exact_height(0.0);
        let mut row = RowCompositor::plain();
        row.update(item, Some(header), None);

        assert_eq!(row.measure(Constraints::fixed_width(100.0)).height, 34.0);
    }

    #[test]
    fn layout_places_item_below_header_or_divider() {
        let (_, item) = probe(40.0);
        let (_, header) = probe(30.0);
        let mut row = RowCompositor::plain();

        row.update(item.clone(), Some(header.clone()), None);
        let size = row.measure(Constraints::fixed_width(200.0));
        row.layout(size);
        assert_eq!(row.item_top(), 30.0);
        assert_eq!(header.bounds(), Rect::new(0.0, 0.0, 200.0, 30.0));
        assert_eq!(item.bounds(), Rect::new(0.0, 30.0, 200.0, 40.0));

        row.update(item.clone(), None, Some(divider(8.0)));
        let size = row.measure(Constraints::fixed_width(200.0));
        row.layout(size);
        assert_eq!(row.item_top(), 8.0);
        assert_eq!(item.bounds(), Rect::new(0.0, 8.0, 200.0, 40.0));

        row.update(item.clone(), None, None);
        let size = row.measure(Constraints::fixed_width(200.0));
        row.layout(size);
        assert_eq!(row.item_top(), 0.0);
        assert_eq!(item.bounds().height, 40.0);
    }

    #[test]
    fn repeated_update_is_a_no_op() {
        let (item_view, item) = probe(40.0);
        let (header_view, header) = probe(30.0);
        let shared = divider(8.0);
        let mut row = RowCompositor::plain();

        row.update(item.clone(), Some(header.clone()), Some(shared.clone()));
        let first = row.measure(Constraints::fixed_width(100.0));
        row.take_dirty();

        row.update(item.clone(), Some(header.clone()), Some(shared));
        let second = row.measure(Constraints::fixed_width(100.0));

        assert_eq!(first, second);
        assert!(row.take_dirty().is_empty());
        assert_eq!(item_view.borrow().attaches, 1);
        assert_eq!(item_view.borrow().detaches, 0);
        assert_eq!(header_view.borrow().attaches, 1);
        assert_eq!(header_view.borrow().detaches, 0);
    }

    #[test]
    fn dropping_header_detaches_it() {
        let (_, item) = probe(40.0);
        let (header_view, header) = probe(30.0);
        let mut row = RowCompositor::plain();
        row.update(item.clone(), Some(header.clone()), None);
        assert!(header.is_attached());

        row.update(item, None, None);

        assert!(!row.has_header());
        assert!(!header.is_attached());
        assert_eq!(header_view.borrow().detaches, 1);
    }

    #[test]
    fn new_item_replaces_old_one() {
        let (old_view, old_item) = probe(10.0);
        let (_, new_item) = probe(20.0);
        let mut row = RowCompositor::plain();
        row.update(old_item.clone(), None, None);

        row.update(new_item.clone(), None, None);

        assert_eq!(old_view.borrow().detaches, 1);
        assert!(!old_item.is_attached());
        assert_eq!(row.item(), Some(&new_item));
    }

    #[test]
    fn divider_drawn_only_without_header() {
        let (_, item) = probe(40.0);
        let (_, header) = probe(30.0);
        let mut row = RowCompositor::plain();
        row.update(item.clone(), None, Some(divider(8.0)));
        let size = row.measure(Constraints::fixed_width(100.0));
        row.layout(size);

        let mut canvas = Fills::default();
        row.draw(&mut canvas);
        assert!(canvas.0.contains(&(Rect::new(0.0, 0.0, 100.0, 8.0), Color::BLACK)));

        row.update(item, Some(header), Some(divider(8.0)));
        let size = row.measure(Constraints::fixed_width(100.0));
        row.layout(size);

        let mut canvas = Fills::default();
        row.draw(&mut canvas);
        assert!(canvas.0.iter().all(|(_, color)| *color != Color::BLACK));
        assert_eq!(canvas.0.len(), 2);
    }

    #[test]
    fn divider_change_marks_draw() {
        let (_, item) = probe(40.0);
        let mut row = RowCompositor::plain();
        row.update(item.clone(), None, None);
        row.take_dirty();

        row.update(item.clone(), None, Some(divider(4.0)));
        let dirty = row.take_dirty();
        assert!(dirty.contains(DirtyFlags::DRAW));
        assert!(dirty.contains(DirtyFlags::MEASURE));
    }

    #[test]
    fn checkable_row_forwards_to_item() {
        let (item_view, item) = probe(40.0);
        item_view.borrow_mut().checked = Some(false);
        assert_eq!(RowVariant::of(&item), RowVariant::Checkable);

        let mut row = RowCompositor::checkable();
        row.update(item, None, None);
        row.toggle();

        assert!(row.is_checked());
        assert_eq!(item_view.borrow().checked, Some(true));
    }

    #[test]
    fn plain_row_ignores_checked_state() {
        let (item_view, item) = probe(40.0);
        item_view.borrow_mut().checked = Some(false);
        let mut row = RowCompositor::plain();
        row.update(item, None, None);

        row.set_checked(true);

        assert!(!row.is_checked());
        assert_eq!(item_view.borrow().checked, Some(false));
    }
}
