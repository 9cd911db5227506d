use super::{EmailMessage, EmailProvider, ProviderError, SendReceipt};
use crate::config::MailConfig;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use once_cell::sync::OnceCell;
use secrecy::ExposeSecret;

/// Port that speaks TLS from the first byte (SMTPS); every other port is
/// upgraded with STARTTLS.
const SMTPS_PORT: u16 = 465;

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// SMTP-backed email provider.
///
/// The transport (and its connection pool) is built on first use and then
/// shared by every request for the lifetime of the process.
pub struct SmtpProvider {
    config: MailConfig,
    transport: OnceCell<SmtpTransport>,
}

impl SmtpProvider {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            transport: OnceCell::new(),
        }
    }

    fn transport(&self) -> Result<&SmtpTransport, ProviderError> {
        self.transport
            .get_or_try_init(|| build_transport(&self.config))
    }

    fn sender(&self, display_name: Option<&str>) -> Result<Mailbox, ProviderError> {
        let user = self.config.user.as_deref().ok_or_else(|| {
            ProviderError::NotConfigured("EMAIL_USER is not set".to_string())
        })?;
        let address: Address = user
            .parse()
            .map_err(|e| ProviderError::Configuration(format!("Invalid sender address: {}", e)))?;
        let name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.config.from_name);

        Ok(Mailbox::new(Some(name.trim().to_string()), address))
    }
}

fn build_transport(config: &MailConfig) -> Result<SmtpTransport, ProviderError> {
    let (Some(host), Some(port), Some(user), Some(password)) = (
        config.host.as_deref(),
        config.port,
        config.user.as_deref(),
        config.password.as_ref(),
    ) else {
        return Err(ProviderError::NotConfigured(format!(
            "missing {}",
            config.missing_settings().join(", ")
        )));
    };

    let creds = Credentials::new(user.to_string(), password.expose_secret().clone());

    let builder = if port == SMTPS_PORT {
        SmtpTransport::relay(host)
    } else {
        SmtpTransport::starttls_relay(host)
    }
    .map_err(|e| ProviderError::Configuration(format!("Failed to create SMTP relay: {}", e)))?;

    tracing::info!(host = %host, port, "SMTP transport initialized");

    Ok(builder.port(port).credentials(creds).build())
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn verify(&self) -> Result<(), ProviderError> {
        let transport = self.transport()?;

        match transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ProviderError::Connection(
                "SMTP server refused the connection".to_string(),
            )),
            Err(e) => Err(ProviderError::Connection(format!(
                "SMTP connection test failed: {}",
                e
            ))),
        }
    }

    async fn send(&self, email: &EmailMessage) -> Result<SendReceipt, ProviderError> {
        let transport = self.transport()?;

        let from_mailbox = self.sender(email.from_name.as_deref())?;

        let to_mailbox: Mailbox = email
            .to
            .parse()
            .map_err(|e| ProviderError::InvalidRecipient(format!("Invalid recipient: {}", e)))?;

        let mut message_builder = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let reply_mailbox: Mailbox = reply_to.parse().map_err(|e| {
                ProviderError::InvalidRecipient(format!("Invalid reply-to address: {}", e))
            })?;
            message_builder = message_builder.reply_to(reply_mailbox);
        }

        let message = match (&email.body_text, &email.body_html) {
            (Some(text), Some(html)) => message_builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            ),
            (Some(text), None) => message_builder
                .header(ContentType::TEXT_PLAIN)
                .body(text.clone()),
            (None, Some(html)) => message_builder
                .header(ContentType::TEXT_HTML)
                .body(html.clone()),
            (None, None) => {
                return Err(ProviderError::SendFailed(
                    "Email must have either text or HTML body".to_string(),
                ));
            }
        }
        .map_err(|e| ProviderError::SendFailed(format!("Failed to build message: {}", e)))?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| ProviderError::SendFailed(format!("Failed to send email: {}", e)))?;

        let provider_id = response.message().next().map(|s| s.to_string());

        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Email sent successfully"
        );

        Ok(SendReceipt { provider_id })
    }
}
