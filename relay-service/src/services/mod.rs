pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod templates;

pub use metrics::{
    get_metrics, init_metrics, record_contact_submission, record_email, record_provider_call,
    record_question,
};
pub use providers::{
    AnswerProvider, EmailMessage, EmailProvider, GeminiTextProvider, GeneratedText,
    MockEmailProvider, MockTextProvider, ProviderError, SendReceipt, SmtpProvider,
};
