//! User-facing notices for failed or noteworthy requests.

use std::fmt;

use crate::error::{ApiError, TransportKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Undifferentiated failure, carrying the error message.
    Failed(String),
    NotFound,
    ServerError(u16),
    /// Any other rejected status.
    ErrorStatus(u16),
    TimedOut(String),
    Cancelled(String),
    /// The request went out but no response came back.
    NoResponse(String),
}

impl Notice {
    /// Differentiate by error kind and status.
    pub fn classify(error: &ApiError) -> Self {
        match error {
            ApiError::Response(envelope) => {
                Notice::for_status(envelope.status).unwrap_or(Notice::ErrorStatus(envelope.status))
            }
            ApiError::Transport { kind, message } => match kind {
                TransportKind::Timeout => Notice::TimedOut(message.clone()),
                TransportKind::Cancelled { reason } => Notice::Cancelled(reason.clone()),
                TransportKind::Network => Notice::NoResponse(message.clone()),
            },
            other => Notice::Failed(other.to_string()),
        }
    }

    /// Caller-side classification of a status code. `None` for statuses that
    /// need no report.
    pub fn for_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(Notice::NotFound),
            s if s >= 500 => Some(Notice::ServerError(s)),
            _ => None,
        }
    }

    pub fn failed(error: &ApiError) -> Self {
        Notice::Failed(error.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Failed(message) => write!(f, "{message}"),
            Notice::NotFound => write!(f, "Error: Page Not Found"),
            Notice::ServerError(status) => write!(f, "Server error ({status})"),
            Notice::ErrorStatus(status) => write!(f, "Request failed with status code {status}"),
            Notice::TimedOut(message) => write!(f, "Request timed out: {message}"),
            Notice::Cancelled(reason) => write!(f, "Request canceled: {reason}"),
            Notice::NoResponse(message) => write!(f, "No response received: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(Notice::for_status(404), Some(Notice::NotFound));
        assert_eq!(Notice::for_status(500), Some(Notice::ServerError(500)));
        assert_eq!(Notice::for_status(503), Some(Notice::ServerError(503)));
        assert_eq!(Notice::for_status(200), None);
        assert_eq!(Notice::for_status(401), None);
    }

    #[test]
    fn transport_errors_are_differentiated() {
        assert_eq!(
            Notice::classify(&ApiError::cancelled("Request cancelled")),
            Notice::Cancelled("Request cancelled".into())
        );
        assert!(matches!(Notice::classify(&ApiError::timeout(10)), Notice::TimedOut(_)));
        assert!(matches!(
            Notice::classify(&ApiError::network("refused")),
            Notice::NoResponse(_)
        ));
    }

    #[test]
    fn local_errors_fall_back_to_failed() {
        let notice = Notice::classify(&ApiError::Rejected("no token".into()));
        assert_eq!(notice.to_string(), "request rejected: no token");
    }
}
