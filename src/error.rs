//! Error types for the InmoStore client

use crate::transport::TransportError;
use thiserror::Error;

/// Result type for InmoStore client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the InmoStore client
///
/// Every variant is `Clone` so the outcome of the version handshake can be
/// cached and handed back to later `init()` callers.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Missing required configuration (e.g. an empty API key)
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Configuration present but unusable (e.g. a malformed API root)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// The version handshake could not be completed
    #[error("Could not connect to the InmoStore API: {cause}")]
    Connectivity {
        /// HTTP status, when the server answered at all
        status: Option<u16>,
        cause: String,
        /// Transport failure, when no response was obtained
        #[source]
        source: Option<TransportError>,
    },

    /// Transport failure while running a query
    #[error("{operation} request to {endpoint} failed: {source}")]
    RequestError {
        operation: &'static str,
        endpoint: String,
        #[source]
        source: TransportError,
    },

    /// Non-success status returned by the API for a query
    #[error("{operation} request to {endpoint} returned HTTP {status}")]
    ApiError {
        operation: &'static str,
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body does not match the shape expected for the operation
    #[error("Invalid response for {operation} from {endpoint}: {message}")]
    InvalidResponse {
        operation: &'static str,
        endpoint: String,
        message: String,
        body: String,
    },
}

impl Error {
    /// Whether this error was raised before any network call, from configuration alone.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingConfig(_) | Error::InvalidConfig(_) | Error::EnvError(_)
        )
    }

    /// Whether this error came out of a failed version handshake.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity { .. })
    }

    /// Name of the query operation that failed, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::RequestError { operation, .. }
            | Error::ApiError { operation, .. }
            | Error::InvalidResponse { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
