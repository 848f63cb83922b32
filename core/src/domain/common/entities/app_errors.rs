use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Invalid input")]
    Invalid,

    #[error("Draw requested on an empty candidate pool")]
    EmptyPool,

    #[error("A spin is already in flight")]
    SpinInFlight,

    #[error("Failed to save preferences")]
    SaveFailed,

    #[error("Internal server error")]
    InternalServerError,
}
