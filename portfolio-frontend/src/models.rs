use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields of the contact form as posted to the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// One line of the chat log. Serialized the way the relay expects
/// conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub text: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatEntry {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: true,
            timestamp: Utc::now(),
        }
    }

    pub fn visitor(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: false,
            timestamp: Utc::now(),
        }
    }
}

/// What the relay said, before any fallback text is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    /// Whether the relay answered with a 2xx status.
    pub ok: bool,
    pub status: u16,
    /// `message` for contact replies, `answer` or `error` for questions.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_entry_uses_camel_case_on_the_wire() {
        let entry = ChatEntry::visitor("What do you build?");
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["text"], "What do you build?");
        assert_eq!(value["isBot"], false);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_clear_empties_every_field() {
        let mut form = ContactForm::new("Jo", "jo@example.com", "hello");
        assert!(!form.is_empty());

        form.clear();

        assert!(form.is_empty());
    }
}
