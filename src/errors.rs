use std::time::Duration;

/// All error types that can occur while discovering or connecting to a bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// A network socket operation failed.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// A bridge client could not reach the bridge or the request failed in transit.
    #[error("bridge {address} unreachable: {reason}")]
    Unreachable { address: String, reason: String },

    /// A network operation did not settle within the configured timeout.
    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },

    /// The bridge refused to register a new user until its link button is pressed.
    #[error("link button on bridge {0} not pressed")]
    LinkButtonNotPressed(String),

    /// The bridge denied user registration for another reason.
    #[error("registration denied by bridge {address}: {reason}")]
    RegistrationDenied { address: String, reason: String },

    /// The credential is missing, invalid or revoked.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The bridge answered with something that could not be interpreted.
    #[error("malformed bridge response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new unreachable error
    pub fn unreachable(address: &str, reason: impl ToString) -> Self {
        Error::Unreachable {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new timeout error
    pub fn timeout(operation: &str, after: Duration) -> Self {
        Error::Timeout {
            operation: operation.to_string(),
            after,
        }
    }

    /// Create a new registration denied error
    pub fn registration_denied(address: &str, reason: impl ToString) -> Self {
        Error::RegistrationDenied {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
