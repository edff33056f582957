//! Error types for the demo client.
//!
//! # Design
//! A request either produced a response the status predicate rejected
//! (`Response`, which keeps the whole envelope for inspection) or produced no
//! response at all (`Transport`). The remaining variants cover failures that
//! happen locally, before transmission or after the body arrived.

use thiserror::Error;

use crate::response::ResponseEnvelope;

/// Why no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    /// Connection refused, DNS failure, reset, unreadable body.
    Network,
    /// The per-request timeout elapsed before a response arrived.
    Timeout,
    /// The request's `CancellationHandle` was cancelled before settlement.
    Cancelled { reason: String },
}

/// Errors returned by `DemoClient::send` and the controller operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server responded with a status outside the accepted range.
    #[error("Request failed with status code {}", .0.status)]
    Response(Box<ResponseEnvelope>),

    /// No response was obtained.
    #[error("{message}")]
    Transport { kind: TransportKind, message: String },

    /// A request interceptor aborted the request before transmission.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The request body could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A response transform failed.
    #[error("response transform failed: {0}")]
    Transform(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Transport {
            kind: TransportKind::Network,
            message: message.into(),
        }
    }

    pub fn timeout(timeout_ms: u128) -> Self {
        ApiError::Transport {
            kind: TransportKind::Timeout,
            message: format!("timeout of {timeout_ms}ms exceeded"),
        }
    }

    pub fn cancelled(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        ApiError::Transport {
            message: reason.clone(),
            kind: TransportKind::Cancelled { reason },
        }
    }

    /// The response carried by a `Response` error.
    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match self {
            ApiError::Response(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Status code of the rejected response, if there was one.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|envelope| envelope.status)
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        match self {
            ApiError::Transport {
                kind: TransportKind::Cancelled { reason },
                ..
            } => Some(reason),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ApiError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_carries_reason_as_message() {
        let err = ApiError::cancelled("Request cancelled");
        assert_eq!(err.cancellation_reason(), Some("Request cancelled"));
        assert_eq!(err.to_string(), "Request cancelled");
        assert!(err.status().is_none());
    }

    #[test]
    fn timeout_message_names_the_limit() {
        let err = ApiError::timeout(5);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "timeout of 5ms exceeded");
    }

    #[test]
    fn network_is_neither_timeout_nor_cancel() {
        let err = ApiError::network("connection refused");
        assert!(!err.is_timeout());
        assert!(err.cancellation_reason().is_none());
    }
}
