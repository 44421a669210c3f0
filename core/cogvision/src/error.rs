use thiserror::Error;

/// Boxed cause carried by [`CognitiveError::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by cogvision operations.
#[derive(Debug, Error)]
pub enum CognitiveError {
    /// The client is misconfigured. Raised before any network attempt.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The input image could not be decoded for upload.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The upload JPEG could not be produced.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// The request never produced a reply (network, DNS, TLS).
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The exchange completed but the reply carried no body.
    #[error("service returned an empty response")]
    EmptyResponse,

    /// The reply body is not valid JSON.
    ///
    /// `status` holds the HTTP status when the service also reported a
    /// failure for the same exchange.
    #[error("failed to parse response{}: {source}", status_suffix(.status))]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// Non-success HTTP status of the reply, if any.
        status: Option<u16>,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CognitiveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn parse_message_mentions_status() {
        let source = serde_json::from_slice::<serde_json::Value>(b"not json").unwrap_err();
        let err = CognitiveError::Parse {
            source,
            status: Some(503),
        };
        assert!(err.to_string().contains("HTTP 503"));
        assert!(err.source().is_some());
    }

    #[test]
    fn transport_exposes_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = CognitiveError::Transport(Box::new(cause));
        assert_eq!(err.source().unwrap().to_string(), "refused");
    }
}
