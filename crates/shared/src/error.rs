use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("invalid row index {position} (list has {len} rows)")]
    InvalidIndex { position: i64, len: usize },
}

impl ListError {
    /// Converts an untrusted signed position into an index, rejecting
    /// negatives with the same error as out-of-range positions.
    pub fn index_from_signed(position: i64, len: usize) -> Result<usize, ListError> {
        usize::try_from(position).map_err(|_| ListError::InvalidIndex { position, len })
    }
}
