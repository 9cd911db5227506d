use crate::client::{ClientError, RelayClient};
use crate::models::{ContactForm, RelayReply};

/// Shown when the relay cannot be reached at all.
pub const NETWORK_FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";
/// Shown when the relay answers without a message.
pub const MISSING_MESSAGE_FALLBACK: &str = "Something went wrong. Please try again.";

/// Contact form fields plus the submit/response state around them.
#[derive(Debug, Default)]
pub struct ContactFormState {
    form: ContactForm,
    is_submitting: bool,
    response_message: Option<String>,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Field edits go straight to the form.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// The submit control is disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn response_message(&self) -> Option<&str> {
        self.response_message.as_deref()
    }

    /// Start a submission. Returns the form to send, or `None` if one is
    /// already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactForm> {
        if self.is_submitting {
            return None;
        }
        self.is_submitting = true;
        self.response_message = None;
        Some(self.form.clone())
    }

    /// Apply the relay's outcome and re-enable the submit control.
    pub fn finish(&mut self, outcome: Result<RelayReply, ClientError>) -> &str {
        let message = match outcome {
            Ok(reply) => {
                if reply.ok {
                    self.form.clear();
                }
                reply
                    .message
                    .unwrap_or_else(|| MISSING_MESSAGE_FALLBACK.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact submission did not reach the relay");
                NETWORK_FAILURE_MESSAGE.to_string()
            }
        };

        self.is_submitting = false;
        self.response_message.insert(message).as_str()
    }

    /// Submit through `client`. Returns `None` when a submission is
    /// already in flight.
    pub async fn submit(&mut self, client: &RelayClient) -> Option<&str> {
        let form = self.begin_submit()?;
        let outcome = client.submit_contact(&form).await;
        Some(self.finish(outcome))
    }
}
