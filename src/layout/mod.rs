//! Gallery grid geometry.
//!
//! Everything here is pure arithmetic on pair counts and cell sizes; no
//! pixel data is touched. [`plan`] is the single entry point.

pub(crate) mod plan;

pub use plan::{LABEL_GAP, LABEL_HEIGHT, LayoutPlan, PADDING, RowPlan, plan};
