//! Shared primitives: error type, pixel geometry, premultiplied color.

pub(crate) mod error;
pub(crate) mod geom;
