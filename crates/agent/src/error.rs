use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Typed agent-boundary errors. Callers substitute a fixed localized apology
/// for any of these and continue the turn.
#[derive(Debug, Error)]
pub enum Error {
    /// No agent endpoint is configured.
    #[error("agent endpoint not configured")]
    NotConfigured,

    /// Transport-level failure talking to the agent service.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The agent service answered with a non-success status.
    #[error("agent returned status {status}")]
    Upstream { status: u16 },
}
