//! Testing utilities and harness for stickyrows

mod adapter;
mod canvas;
mod fake_view;
mod harness;

pub use adapter::*;
pub use canvas::*;
pub use fake_view::*;
pub use harness::*;

pub mod prelude {
    pub use crate::adapter::{GroupedRow, HeaderRequest, VecGroupedAdapter};
    pub use crate::canvas::RecordingCanvas;
    pub use crate::fake_view::{inspect, label_of, FakeView};
    pub use crate::harness::{BoundRow, ListHarness};
}
