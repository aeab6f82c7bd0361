//! Image and font input: reference resolution, decoding, parallel loading,
//! text shaping.

pub(crate) mod decode;
pub(crate) mod loader;
pub(crate) mod source;
pub(crate) mod text;
