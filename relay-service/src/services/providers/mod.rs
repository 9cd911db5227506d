//! External provider abstractions.
//!
//! Handlers only see the traits below, so the SMTP and Gemini backends can be
//! swapped for the mocks in tests.

pub mod email;
pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

pub use email::SmtpProvider;
pub use gemini::GeminiTextProvider;
pub use mock::{MockEmailProvider, MockTextProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Send error: {0}")]
    SendFailed(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limited")]
    RateLimited,
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Configuration(_) => "configuration",
            ProviderError::Connection(_) => "connection",
            ProviderError::SendFailed(_) => "send_failed",
            ProviderError::InvalidRecipient(_) => "invalid_recipient",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::RateLimited => "rate_limited",
        }
    }
}

/// Outcome of a delivered email.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub provider_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    /// Display name for the sender; the address is always the mail user.
    pub from_name: Option<String>,
    pub reply_to: Option<String>,
}

/// Text produced by an answering provider.
#[derive(Debug, Clone, Default)]
pub struct GeneratedText {
    /// First text part of the first candidate, if any.
    pub text: Option<String>,
    pub finish_reason: Option<String>,
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Check that the mail server accepts connections with our credentials.
    async fn verify(&self) -> Result<(), ProviderError>;
    async fn send(&self, email: &EmailMessage) -> Result<SendReceipt, ProviderError>;
}

#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, ProviderError>;
    fn is_configured(&self) -> bool;
}
