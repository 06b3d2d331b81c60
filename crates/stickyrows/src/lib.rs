//! Sticky section headers for recycled list rows.
//!
//! A hosting list asks a [`GroupedAdapterShim`] for one [`RowCompositor`] per
//! visible position. The shim wraps the caller's [`GroupedAdapter`], decides
//! which rows open a group, and moves header views between rows through a
//! FIFO free-list so they survive the list's row-level recycling. Each
//! compositor stacks an optional header (or, failing that, a divider) on top
//! of the row's item and measures the three as one unit.
//!
//! # Example
//!
//! ```rust,ignore
//! let shim = GroupedAdapterShim::new(Rc::new(contacts));
//! shim.on_header_click(|header, position, header_id| {
//!     log::info!("tapped group {header_id} at row {position}");
//! });
//!
//! let mut row = shim.row_view(position, scrapped, ViewParent::list(width))?;
//! let size = row.measure(Constraints::fixed_width(width));
//! row.layout(size);
//! ```

mod adapter;
mod compositor;
mod error;
mod header_cache;
mod observer;
mod shim;
mod view;
mod widgets;

pub use adapter::*;
pub use compositor::*;
pub use error::*;
pub use header_cache::*;
pub use observer::*;
pub use shim::*;
pub use view::*;
pub use widgets::*;

pub use stickyrows_ui_graphics as graphics;
pub use stickyrows_ui_layout as layout;

pub mod prelude {
    pub use crate::adapter::{GroupedAdapter, HeaderSource, ListAdapter, OnHeaderClick};
    pub use crate::compositor::{Divider, RowCompositor, RowVariant};
    pub use crate::error::RowError;
    pub use crate::observer::{DataSetCallback, DataSetEvent, DataSetObservable, ObserverId};
    pub use crate::shim::GroupedAdapterShim;
    pub use crate::view::{Checkable, View, ViewHandle, ViewParent, ViewState};
    pub use crate::widgets::LeafView;
    pub use stickyrows_ui_graphics::prelude::*;
    pub use stickyrows_ui_layout::prelude::*;
}
