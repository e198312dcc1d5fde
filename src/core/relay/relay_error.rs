use thiserror::Error;

/// Every way a relay command can end without delivering results.
///
/// The `Display` text is exactly what the invoking user sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("This command can only be used in the {channel_label} channel.")]
    WrongChannel { channel_label: &'static str },
    #[error("Failed to fetch {resource} from {service} API. Please try again later.")]
    UpstreamUnavailable {
        service: &'static str,
        resource: &'static str,
    },
    #[error("An error occurred while fetching {resource}: {message}")]
    UpstreamClientError {
        resource: &'static str,
        message: String,
    },
    #[error("{0}")]
    EmptyResult(String),
}

/// Short tag for logs and dispatch outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    WrongChannel,
    UpstreamUnavailable,
    UpstreamClientError,
    EmptyResult,
}

impl RelayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RelayError::WrongChannel { .. } => FailureKind::WrongChannel,
            RelayError::UpstreamUnavailable { .. } => FailureKind::UpstreamUnavailable,
            RelayError::UpstreamClientError { .. } => FailureKind::UpstreamClientError,
            RelayError::EmptyResult(_) => FailureKind::EmptyResult,
        }
    }

    /// The user-facing notice for this failure.
    pub fn notice(&self) -> String {
        self.to_string()
    }
}
