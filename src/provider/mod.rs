//! Identity provider interface consumed by the auth flows.
//!
//! The provider verifies credentials, registers accounts, and sends
//! password-reset email. It never decides admin status: role decisions are
//! roster-derived, and the live session flag the provider exposes is only
//! consulted by the mount-time redirect guard.

pub mod http;

pub use http::HttpProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Failure surfaced by the identity provider.
///
/// `Rejected` carries the provider's message verbatim; anything without a
/// usable message collapses to `Unknown`, which renders as a fixed generic
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{message}")]
    Rejected { message: String },
    #[error("An error occurred")]
    Unknown,
}

impl ProviderError {
    /// Build a rejection from an optional message, falling back to `Unknown`
    /// when the message is missing or blank.
    #[must_use]
    pub fn from_message(message: Option<&str>) -> Self {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => Self::Rejected {
                message: message.to_string(),
            },
            None => Self::Unknown,
        }
    }
}

/// Behavioral contract of the external identity provider.
///
/// Every call either settles successfully or fails with a [`ProviderError`];
/// the flows perform no retries and apply no timeout of their own.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and establish a session on success.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<(), ProviderError>;

    /// Register a new account, triggering a provider-side verification email.
    async fn register_account(&self, email: &str, password: &str) -> Result<(), ProviderError>;

    /// Request a password-reset email with a callback link to `callback_url`.
    async fn request_password_reset(
        &self,
        email: &str,
        callback_url: &str,
    ) -> Result<(), ProviderError>;

    /// Whether the provider's current session, if any, is an admin session.
    /// Independent of the roster; observed only by the mount-time guard.
    async fn session_is_admin(&self) -> Result<bool, ProviderError>;
}
