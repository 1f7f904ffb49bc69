/*!
 * Error types for the transfix application.
 *
 * This module contains custom error types for the two remote services and the
 * application around them, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a remote text service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Error when building or sending the request fails
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The transport-level timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error returned by the service itself
    #[error("Service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Response body, if any
        message: String,
    },

    /// The response body could not be read as text
    #[error("Failed to parse service response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() || error.is_body() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Failure of one stage of the translation pipeline.
///
/// The variants never overlap: a failed operation carries exactly one of them.
#[derive(Error, Debug)]
pub enum StageError {
    /// The primary translation service failed
    #[error("Primary translation service unavailable: {0}")]
    PrimaryServiceUnavailable(#[source] ServiceError),

    /// The post-processing service failed
    #[error("Post-processing service unavailable: {0}")]
    SecondaryServiceUnavailable(#[source] ServiceError),
}

/// Error from the line-by-line batch mode
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file or stream operation
    #[error("File error: {0}")]
    File(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
