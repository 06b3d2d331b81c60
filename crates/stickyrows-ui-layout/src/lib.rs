//! Layout contracts for stickyrows
//!
//! [`Constraints`] describe what a parent allows a child to be;
//! [`LayoutParams`] and [`Visibility`] describe what a child asks for.

mod constraints;
mod params;

pub use constraints::*;
pub use params::*;

pub mod prelude {
    pub use crate::constraints::Constraints;
    pub use crate::params::{Dimension, LayoutParams, Visibility};
}
