//! Error types for evenkeel
//!
//! Provides the error surface shared by every orchestrator call.

use thiserror::Error;

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Errors surfaced by the orchestration-service client.
///
/// Nothing in this repo retries; an error from any call aborts the
/// current audit cycle and the next scheduled invocation starts over
/// from current cluster state.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OrchestratorError::Api {
            status: 503,
            message: "cluster unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - cluster unavailable");
    }
}
