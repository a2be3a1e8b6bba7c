use serde::Deserialize;
use thiserror::Error;

/// Failure reported by the apiserver
///
/// Decoded from the `Status` document sent along with a non-2xx code.
#[derive(Error, Deserialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// `Failure` for every error the server reports
    pub status: String,
    /// Human readable description
    #[serde(default)]
    pub message: String,
    /// Machine readable cause, such as `NotFound`
    #[serde(default)]
    pub reason: String,
    /// The http status code
    pub code: u16,
}
