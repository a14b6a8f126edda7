use thiserror::Error;

/// Failures surfaced to the host from session operations.
///
/// Project-root resolution and stale registry entries are recovered
/// internally and deliberately have no variants here. Every variant aborts
/// only the current operation; existing sessions are left untouched.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The process handle exists but its input channel is gone
    /// (the assistant exited out-of-band).
    #[error("assistant session is no longer accepting input (process exited)")]
    NoChannel,

    /// The payload was empty or identified no addressable content.
    /// No session is created as a side effect.
    #[error("nothing to send: {0}")]
    NothingToSend(String),

    /// The assistant process or its terminal window could not be created.
    #[error("failed to launch assistant session")]
    Launch(#[source] anyhow::Error),
}

impl SessionError {
    pub fn nothing_to_send(reason: impl Into<String>) -> Self {
        SessionError::NothingToSend(reason.into())
    }
}
