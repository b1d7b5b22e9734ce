/// Convenience result type used across Filtra.
pub type FiltraResult<T> = Result<T, FiltraError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Geometric degeneracy (singular matrices, empty intersections) and surface
/// allocation failure are not errors: they surface as `None`/empty results so
/// filter evaluation degrades to transparent output. `FiltraError` is
/// reserved for invalid caller-provided data.
#[derive(thiserror::Error, Debug)]
pub enum FiltraError {
    /// Invalid caller-provided data (dimensions, pixel buffers, parameters).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FiltraError {
    /// Build a [`FiltraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
