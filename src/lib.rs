//! Pairsheet builds before/after comparison sheets from pairs of images.
//!
//! Image pairs arrive as data URIs or file paths, land in a two-column grid
//! (before on the left, after on the right, one pair per row), and leave as a
//! single PNG. The public API is job-oriented:
//!
//! - Describe the input with [`ImagePair`]s and a [`LayoutConfig`]
//! - Create a [`Compositor`], optionally with a [`LabelFont`]
//! - Call [`Compositor::merge`] to get the encoded sheet
//!
//! Loading is parallel and all-or-nothing: one unreadable reference fails the
//! whole merge, and an input with no complete pair is an error rather than an
//! empty sheet.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;

pub(crate) mod render;

/// Gallery grid geometry.
pub mod layout;
/// Boundary model for image pairs and layout settings.
pub mod model;

pub use crate::assets::source::ImageRef;
pub use crate::assets::text::LabelFont;
pub use crate::compose::{CompositeResult, Compositor};
pub use crate::foundation::error::{PairsheetError, PairsheetResult};
pub use crate::foundation::geom::{CanvasSize, PixelRect, Point, Rect, Rgba8Premul, Vec2};
pub use crate::model::{ImagePair, LayoutConfig, MergeJob};
