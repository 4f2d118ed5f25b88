use thiserror::Error;

/// Failures from a single backend round-trip.
///
/// Produced by the prompt dispatcher and converted into a visible
/// `system_error` history entry by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The server could not be reached, the call timed out, or the body
    /// could not be read.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body does not match the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl DispatchError {
    /// Short machine-friendly label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::NetworkFailure(_) => "network_failure",
            DispatchError::Http { .. } => "http_error",
            DispatchError::Protocol(_) => "protocol_error",
        }
    }
}

/// Internal-consistency errors raised by the history log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history is empty")]
    Empty,

    #[error("last history entry is not pending")]
    NotPending,

    #[error("a pending entry already exists at order {0}")]
    AlreadyPending(u64),
}

/// Errors surfaced by the session controller to the UI shell.
///
/// Backend failures are never returned here; they become history entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("a submission is already in flight")]
    Busy,

    #[error("session controller has been disposed")]
    Disposed,

    #[error("history consistency error: {0}")]
    History(#[from] HistoryError),
}
