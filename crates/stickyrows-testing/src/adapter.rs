use std::cell::{Cell, RefCell};

use stickyrows::{
    DataSetCallback, DataSetObservable, GroupedAdapter, HeaderSource, ObserverId, ViewHandle,
    ViewParent,
};
use stickyrows_ui_layout::Visibility;

use crate::fake_view::FakeView;

/// One row of a [`VecGroupedAdapter`].
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedRow {
    pub header_id: u64,
    pub label: String,
    pub checkable: bool,
    pub visibility: Visibility,
}

impl GroupedRow {
    pub fn new(header_id: u64, label: impl Into<String>) -> Self {
        Self {
            header_id,
            label: label.into(),
            checkable: false,
            visibility: Visibility::Visible,
        }
    }

    pub fn checkable(mut self) -> Self {
        self.checkable = true;
        self
    }

    pub fn gone(mut self) -> Self {
        self.visibility = Visibility::Gone;
        self
    }
}

/// A call the shim made to [`HeaderSource::header_view`].
#[derive(Clone, Debug)]
pub struct HeaderRequest {
    pub position: usize,
    pub recycled: Option<ViewHandle>,
    pub returned: Option<ViewHandle>,
    /// Whether the header was requested for a row rather than the list.
    pub for_row: bool,
}

/// Grouped adapter over a `Vec` of rows, building [`FakeView`]s.
///
/// Recycled views are rebound in place unless reuse is switched off, and
/// either view kind can be made to fail at one position.
pub struct VecGroupedAdapter {
    rows: RefCell<Vec<GroupedRow>>,
    observable: DataSetObservable,
    item_height: f32,
    header_height: f32,
    reuse_views: Cell<bool>,
    missing_item_at: Cell<Option<usize>>,
    missing_header_at: Cell<Option<usize>>,
    created_items: RefCell<Vec<ViewHandle>>,
    created_headers: RefCell<Vec<ViewHandle>>,
    header_requests: RefCell<Vec<HeaderRequest>>,
}

impl VecGroupedAdapter {
    pub const DEFAULT_ITEM_HEIGHT: f32 = 48.0;
    pub const DEFAULT_HEADER_HEIGHT: f32 = 24.0;

    pub fn new(rows: Vec<GroupedRow>) -> Self {
        Self {
            rows: RefCell::new(rows),
            observable: DataSetObservable::new(),
            item_height: Self::DEFAULT_ITEM_HEIGHT,
            header_height: Self::DEFAULT_HEADER_HEIGHT,
            reuse_views: Cell::new(true),
            missing_item_at: Cell::new(None),
            missing_header_at: Cell::new(None),
            created_items: RefCell::new(Vec::new()),
            created_headers: RefCell::new(Vec::new()),
            header_requests: RefCell::new(Vec::new()),
        }
    }

    /// One row per group key, labelled by position.
    pub fn with_header_ids(header_ids: &[u64]) -> Self {
        Self::new(
            header_ids
                .iter()
                .enumerate()
                .map(|(position, &header_id)| GroupedRow::new(header_id, format!("row {position}")))
                .collect(),
        )
    }

    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    pub fn rows(&self) -> Vec<GroupedRow> {
        self.rows.borrow().clone()
    }

    /// Replaces the data without notifying.
    pub fn set_rows(&self, rows: Vec<GroupedRow>) {
        *self.rows.borrow_mut() = rows;
    }

    pub fn update_row(&self, position: usize, update: impl FnOnce(&mut GroupedRow)) {
        if let Some(row) = self.rows.borrow_mut().get_mut(position) {
            update(row);
        }
    }

    pub fn notify_changed(&self) {
        self.observable.notify_changed();
    }

    pub fn notify_invalidated(&self) {
        self.observable.notify_invalidated();
    }

    pub fn observer_count(&self) -> usize {
        self.observable.observer_count()
    }

    pub fn set_reuse_views(&self, reuse: bool) {
        self.reuse_views.set(reuse);
    }

    pub fn set_missing_item_at(&self, position: Option<usize>) {
        self.missing_item_at.set(position);
    }

    pub fn set_missing_header_at(&self, position: Option<usize>) {
        self.missing_header_at.set(position);
    }

    pub fn created_items(&self) -> Vec<ViewHandle> {
        self.created_items.borrow().clone()
    }

    pub fn created_headers(&self) -> Vec<ViewHandle> {
        self.created_headers.borrow().clone()
    }

    pub fn header_requests(&self) -> Vec<HeaderRequest> {
        self.header_requests.borrow().clone()
    }

    pub fn clear_header_requests(&self) {
        self.header_requests.borrow_mut().clear();
    }

    fn row(&self, position: usize) -> Option<GroupedRow> {
        self.rows.borrow().get(position).cloned()
    }

    fn build_header(&self, position: usize, recycled: Option<ViewHandle>) -> Option<ViewHandle> {
        if self.missing_header_at.get() == Some(position) {
            return None;
        }
        let label = format!("group {}", self.header_id(position));
        if let Some(recycled) = recycled.filter(|_| self.reuse_views.get()) {
            let rebound = recycled.with_view(|view: &mut FakeView| view.set_label(label.clone()));
            if rebound.is_some() {
                return Some(recycled);
            }
        }
        let header = FakeView::new(label, self.header_height).into_handle();
        self.created_headers.borrow_mut().push(header.clone());
        Some(header)
    }
}

impl HeaderSource for VecGroupedAdapter {
    fn header_id(&self, position: usize) -> u64 {
        self.rows
            .borrow()
            .get(position)
            .map_or(u64::MAX, |row| row.header_id)
    }

    fn header_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        parent: ViewParent<'_>,
    ) -> Option<ViewHandle> {
        let returned = self.build_header(position, recycled.clone());
        self.header_requests.borrow_mut().push(HeaderRequest {
            position,
            recycled,
            returned: returned.clone(),
            for_row: matches!(parent, ViewParent::Row(_)),
        });
        returned
    }
}

impl GroupedAdapter for VecGroupedAdapter {
    type Item = GroupedRow;

    fn count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn item(&self, position: usize) -> Option<GroupedRow> {
        self.row(position)
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn row_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        _parent: ViewParent<'_>,
    ) -> Option<ViewHandle> {
        if self.missing_item_at.get() == Some(position) {
            return None;
        }
        let row = self.row(position)?;
        let checked = row.checkable.then_some(false);

        if let Some(recycled) = recycled.filter(|_| self.reuse_views.get()) {
            let rebound = recycled.with_view(|view: &mut FakeView| {
                view.set_label(row.label.clone());
                view.set_visibility(row.visibility);
                if view.is_checkable() != row.checkable {
                    view.set_checkable(checked);
                }
            });
            if rebound.is_some() {
                return Some(recycled);
            }
        }

        let mut view = FakeView::new(row.label, self.item_height).visibility(row.visibility);
        if let Some(checked) = checked {
            view = view.checkable(checked);
        }
        let item = view.into_handle();
        self.created_items.borrow_mut().push(item.clone());
        Some(item)
    }

    fn register_observer(&self, callback: DataSetCallback) -> ObserverId {
        self.observable.register(callback)
    }

    fn unregister_observer(&self, id: ObserverId) {
        self.observable.unregister(id);
    }
}
