use thiserror::Error;

/// Top-level error type for the euklid geometry kernel.
#[derive(Debug, Error)]
pub enum EuklidError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric values and their construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to polyline and curve operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`EuklidError`].
pub type Result<T> = std::result::Result<T, EuklidError>;

/// Maps a possibly negative index onto `0..len`.
///
/// Negative indices count from the end (`-1` is the last element).
///
/// # Errors
///
/// Returns `GeometryError::IndexOutOfRange` if the index falls outside
/// `-len..len`.
pub(crate) fn normalize_index(index: isize, len: usize) -> Result<usize> {
    let out_of_range = || GeometryError::IndexOutOfRange { index, len };
    let len_signed = isize::try_from(len).map_err(|_| out_of_range())?;
    let effective = if index < 0 { len_signed + index } else { index };
    if effective < 0 || effective >= len_signed {
        return Err(out_of_range().into());
    }
    usize::try_from(effective).map_err(|_| out_of_range().into())
}
