/// Convenience result type used across pairsheet.
pub type PairsheetResult<T> = Result<T, PairsheetError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every failure is fatal to the merge call that raised it: the engine never
/// retries and never returns partial output.
#[derive(thiserror::Error, Debug)]
pub enum PairsheetError {
    /// No fully-populated image pair was present in the input.
    #[error("no valid image pairs to merge")]
    EmptyInput,

    /// A referenced image could not be read or decoded.
    #[error("image decode error: {0}")]
    Decode(String),

    /// The finished canvas could not be encoded to the output format.
    #[error("image encode error: {0}")]
    Encode(String),

    /// Errors while compositing cells or labels onto the canvas.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PairsheetError {
    /// Build a [`PairsheetError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PairsheetError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PairsheetError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PairsheetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PairsheetError::decode("x")
                .to_string()
                .contains("image decode error:")
        );
        assert!(
            PairsheetError::encode("x")
                .to_string()
                .contains("image encode error:")
        );
        assert!(
            PairsheetError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            PairsheetError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            PairsheetError::EmptyInput
                .to_string()
                .contains("no valid image pairs")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PairsheetError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
