use thiserror::Error;

/// Workflow errors surfaced to the UI.
///
/// Every remote call converts its failures into one of these before the
/// command boundary turns them into a plain string. `Validation` never
/// leaves the process; the rest describe what went wrong talking to the
/// Google backends.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required external identifier is missing or still a placeholder.
    /// Fatal to the operation; there is nothing to retry.
    #[error("{0}")]
    Config(String),

    /// The bounded wait for a remote call elapsed. The user may retry.
    #[error("Request timed out. Please check your internet connection.")]
    Timeout,

    /// The backend answered with a non-success response. Carries the
    /// backend's message when one could be extracted.
    #[error("{0}")]
    Remote(String),

    /// A local form constraint was not met. Never sent over the network.
    #[error("{0}")]
    Validation(String),

    /// Unexpected local failure (filesystem, serialization).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        AppError::Remote(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Classify a transport-level failure: timeouts keep their retry
    /// affordance, everything else is reported as a remote failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else {
            AppError::Remote(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
