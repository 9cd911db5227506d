//! JSON client for the relay service.

use crate::models::{ChatEntry, ContactForm, RelayReply};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Relay request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct AskBody<'a> {
    question: &'a str,
    conversation_history: &'a [ChatEntry],
}

pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post the contact form. Any HTTP status is a reply; only transport
    /// failures are errors.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<RelayReply, ClientError> {
        let (ok, status, body) = self.post("/contact", form).await?;
        Ok(RelayReply {
            ok,
            status,
            message: field(body.as_ref(), "message"),
        })
    }

    /// Ask a question, sending the chat log so far as context.
    pub async fn ask(
        &self,
        question: &str,
        history: &[ChatEntry],
    ) -> Result<RelayReply, ClientError> {
        let body = AskBody {
            question,
            conversation_history: history,
        };
        let (ok, status, body) = self.post("/ask", &body).await?;
        let key = if ok { "answer" } else { "error" };
        Ok(RelayReply {
            ok,
            status,
            message: field(body.as_ref(), key),
        })
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(bool, u16, Option<Value>), ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::error!("Failed to send POST request to {}: {}", url, e);
            ClientError::from(e)
        })?;

        let status = response.status();
        // A body that is not JSON is treated like one without a message.
        let body = response.json::<Value>().await.ok();

        tracing::debug!(url = %url, status = status.as_u16(), "Relay replied");
        Ok((status.is_success(), status.as_u16(), body))
    }
}

fn field(body: Option<&Value>, key: &str) -> Option<String> {
    body.and_then(|b| b.get(key))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
