use thiserror::Error;

/// Failure surfaced by the primary backend client. Callers of the client
/// see this; callers of the repository façade never do, because the
/// façade absorbs it by falling back to the local snapshot.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("primary backend unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// The only failure that crosses the repository façade. A by-id miss is
/// `None`, not an error, and backend trouble is absorbed by fallback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("invalid listing id: {0:?}")]
    InvalidId(String),
}
