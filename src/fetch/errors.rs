use thiserror::Error;

/// Failure modes of a page fetch.
///
/// The adapter never retries and never swallows a failure: transport errors
/// must reach the caller so the table can leave its loading state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The fetch was superseded or the view was torn down.
    #[error("request cancelled")]
    Cancelled,

    /// Network-level failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The response body did not match the expected page shape.
    #[error("decode error: {0}")]
    Decode(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
