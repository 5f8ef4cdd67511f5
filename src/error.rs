//! Error taxonomy shared by the API client and the panel handlers.

use thiserror::Error;

/// Everything that can go wrong between a user action and the admin server.
///
/// Only `AuthExpired` is terminal for the panel session: the caller must
/// reload (re-authenticate) instead of retrying.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Rejected locally, before any network call
    #[error("{0}")]
    Validation(String),

    /// The requested language is not part of the loaded translation set
    #[error("translations for language '{0}' not found")]
    LanguageNotFound(String),

    /// The server answered 401; the session cookie is no longer valid
    #[error("authentication required")]
    AuthExpired,

    /// Transport failure: the request never produced a response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a structured failure; the message is verbatim
    #[error("{0}")]
    Server(String),
}

impl AdminError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, AdminError::AuthExpired)
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;
