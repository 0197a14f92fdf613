/// Rejected form input. The display text is shown to the user as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotFinite { field: &'static str },

    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying key-value store refused the operation (quota, disabled storage, ...).
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored workouts are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stored workout {id} is invalid: {reason}")]
    InvalidRecord { id: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("click on the map to choose where the workout took place")]
    NoPendingLocation,

    #[error("stored workouts could not be read, so they were not overwritten; reset to start over")]
    SaveBlocked,
}
