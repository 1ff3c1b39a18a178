use thiserror::Error;

/// Why a read of the remote text API failed
///
/// The message is what the reader sees inline; the variant is what state
/// transitions match on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to load Surahs. Please try again later.")]
    Index,
    #[error("Failed to load Surah content. Please try again.")]
    Content { surah: u32 },
}

/// Low-level failure reported by a [`Transport`](crate::transport::Transport)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Rejections from the demo login/signup flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },
    #[error("An account with this email already exists.")]
    AccountExists,
    #[error("Local storage error: {0}")]
    Storage(String),
}
