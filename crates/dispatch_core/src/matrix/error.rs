use thiserror::Error;

/// Failure modes for one travel-time query.
///
/// Both variants collapse to the same scheduling outcome; they stay
/// distinct so logs can tell an unreachable service from a broken reply.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The service could not be reached or did not answer in time.
    #[error("travel-time service unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),
    /// The reply decoded but violated the matrix contract.
    #[error("travel-time reply rejected: {0}")]
    Malformed(String),
}
