//! Adapter contracts.
//!
//! [`GroupedAdapter`] is what callers implement: rows plus a group key and a
//! header view per row. [`ListAdapter`] is what a hosting list consumes: one
//! composite row per position. The shim turns the first into the second.

use crate::compositor::RowCompositor;
use crate::error::RowError;
use crate::observer::{DataSetCallback, ObserverId};
use crate::view::{ViewHandle, ViewParent};

/// Header queries shared by the caller's adapter and the shim. A floating
/// header overlay uses these to draw the current group's header outside the
/// scrolling rows.
pub trait HeaderSource {
    /// Group key of the row at `position`. Consecutive rows with equal keys
    /// share one header.
    fn header_id(&self, position: usize) -> u64;

    /// Header view for the group `position` belongs to. `recycled` is a
    /// previously built header the implementation may rebind and return.
    fn header_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        parent: ViewParent<'_>,
    ) -> Option<ViewHandle>;
}

/// Caller-supplied data source for a list with sticky section headers.
pub trait GroupedAdapter: HeaderSource {
    type Item;

    /// Number of rows.
    fn count(&self) -> usize;

    fn item(&self, position: usize) -> Option<Self::Item>;

    /// Stable identity of the row at `position`.
    fn item_id(&self, position: usize) -> u64;

    /// Content view for the row. `recycled` is the item view the row
    /// previously showed, offered for reuse.
    fn row_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        parent: ViewParent<'_>,
    ) -> Option<ViewHandle>;

    fn has_stable_ids(&self) -> bool {
        false
    }

    fn is_enabled(&self, position: usize) -> bool {
        let _ = position;
        true
    }

    fn are_all_items_enabled(&self) -> bool {
        true
    }

    fn item_view_type(&self, position: usize) -> usize {
        let _ = position;
        0
    }

    fn view_type_count(&self) -> usize {
        1
    }

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn register_observer(&self, callback: DataSetCallback) -> ObserverId;

    fn unregister_observer(&self, id: ObserverId);
}

/// What a hosting list needs: one composite row per position.
pub trait ListAdapter {
    type Item;

    fn count(&self) -> usize;

    fn item(&self, position: usize) -> Option<Self::Item>;

    fn item_id(&self, position: usize) -> u64;

    fn has_stable_ids(&self) -> bool;

    fn is_enabled(&self, position: usize) -> bool;

    fn are_all_items_enabled(&self) -> bool;

    fn item_view_type(&self, position: usize) -> usize;

    fn view_type_count(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Builds or rebinds the row at `position`. `recycled` is a row the list
    /// scrapped earlier; it may come back rebound or be replaced.
    fn row_view(
        &self,
        position: usize,
        recycled: Option<RowCompositor>,
        parent: ViewParent<'_>,
    ) -> Result<RowCompositor, RowError>;

    fn register_observer(&self, callback: DataSetCallback) -> ObserverId;

    fn unregister_observer(&self, id: ObserverId);
}

/// Receives header taps: the tapped header, the row it was bound to, and that
/// row's current group key.
pub trait OnHeaderClick {
    fn on_header_click(&mut self, header: &ViewHandle, position: usize, header_id: u64);
}

impl<F> OnHeaderClick for F
where
    F: FnMut(&ViewHandle, usize, u64),
{
    fn on_header_click(&mut self, header: &ViewHandle, position: usize, header_id: u64) {
        self(header, position, header_id)
    }
}
