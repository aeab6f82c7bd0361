//! CPU rasterization onto the shared canvas.

pub(crate) mod cell;
pub(crate) mod labels;
pub(crate) mod surface;
