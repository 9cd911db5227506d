//! Mock provider implementations for testing.

use super::{
    AnswerProvider, EmailMessage, EmailProvider, GeneratedText, ProviderError, SendReceipt,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Mock email provider that records every delivery attempt.
pub struct MockEmailProvider {
    verify_ok: bool,
    failing_recipients: Vec<String>,
    send_attempts: AtomicU64,
    delivered: Mutex<Vec<EmailMessage>>,
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmailProvider {
    pub fn new() -> Self {
        Self {
            verify_ok: true,
            failing_recipients: Vec::new(),
            send_attempts: AtomicU64::new(0),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Connection verification fails, as with a wrong password or host.
    pub fn with_failed_verification(mut self) -> Self {
        self.verify_ok = false;
        self
    }

    /// Every send addressed to `recipient` fails.
    pub fn failing_for(mut self, recipient: impl Into<String>) -> Self {
        self.failing_recipients.push(recipient.into());
        self
    }

    pub fn send_attempts(&self) -> u64 {
        self.send_attempts.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<EmailMessage> {
        self.delivered
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn verify(&self) -> Result<(), ProviderError> {
        if self.verify_ok {
            Ok(())
        } else {
            Err(ProviderError::Connection(
                "[MOCK] SMTP connection test failed".to_string(),
            ))
        }
    }

    async fn send(&self, email: &EmailMessage) -> Result<SendReceipt, ProviderError> {
        let attempt = self.send_attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if self.failing_recipients.iter().any(|r| r == &email.to) {
            return Err(ProviderError::SendFailed(format!(
                "[MOCK] delivery to {} rejected",
                email.to
            )));
        }

        if let Ok(mut delivered) = self.delivered.lock() {
            delivered.push(email.clone());
        }

        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "[MOCK] Email would be sent"
        );

        Ok(SendReceipt {
            provider_id: Some(format!("mock-email-{}", attempt)),
        })
    }
}

enum MockAnswer {
    Text(String),
    Empty,
    Failure,
}

/// Mock answering provider that records the prompts it receives.
pub struct MockTextProvider {
    answer: MockAnswer,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn answering(text: impl Into<String>) -> Self {
        Self::with_answer(MockAnswer::Text(text.into()))
    }

    /// Responds successfully but without any candidate text.
    pub fn empty() -> Self {
        Self::with_answer(MockAnswer::Empty)
    }

    pub fn failing() -> Self {
        Self::with_answer(MockAnswer::Failure)
    }

    fn with_answer(answer: MockAnswer) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AnswerProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedText, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.answer {
            MockAnswer::Text(text) => Ok(GeneratedText {
                text: Some(text.clone()),
                finish_reason: Some("STOP".to_string()),
                input_tokens: Some(prompt.len() as i32 / 4),
                output_tokens: Some(text.len() as i32 / 4),
            }),
            MockAnswer::Empty => Ok(GeneratedText::default()),
            MockAnswer::Failure => Err(ProviderError::NetworkError(
                "[MOCK] connection reset".to_string(),
            )),
        }
    }

    fn is_configured(&self) -> bool {
        true
    }
}
