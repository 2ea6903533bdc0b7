use thiserror::Error;

/// Errors raised while listing resources through Azure Resource Manager.
///
/// SECURITY: Error messages must NEVER contain the bearer token.
#[derive(Debug, Error)]
pub enum ArmError {
    /// The token could not be turned into an `Authorization` header
    #[error("invalid access token format")]
    InvalidToken,

    /// ARM answered with a non-success status
    #[error("{collection} request failed ({status} {code}): {message}")]
    Api {
        collection: String,
        status: u16,
        code: String,
        message: String,
    },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response whose body did not match the expected shape
    #[error("failed to parse {collection} response: {message}")]
    Parse { collection: String, message: String },

    #[error("{collection} pagination returned the same nextLink twice")]
    PaginationLoop { collection: String },
}

impl ArmError {
    /// HTTP status of an API rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ArmError::Api { status, .. } => Some(*status),
            ArmError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_authorization_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
