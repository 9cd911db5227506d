use crate::client::{ClientError, RelayClient};
use crate::models::{ChatEntry, RelayReply};

pub const GREETING: &str =
    "Hi! I'm Saunak's assistant. Ask me about his skills, projects or experience.";
pub const UNREACHABLE_MESSAGE: &str =
    "Sorry, I couldn't reach the server. Please try again later.";
pub const MISSING_ANSWER_FALLBACK: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatVisibility {
    #[default]
    Closed,
    Open,
}

/// A question ready to send, with the log as it stood before it was asked.
#[derive(Debug, Clone)]
pub struct PendingQuestion {
    pub question: String,
    pub history: Vec<ChatEntry>,
}

/// The floating chat widget: open/closed plus its message log.
#[derive(Debug)]
pub struct ChatWidget {
    visibility: ChatVisibility,
    entries: Vec<ChatEntry>,
    awaiting_reply: bool,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            visibility: ChatVisibility::Closed,
            entries: vec![ChatEntry::bot(GREETING)],
            awaiting_reply: false,
        }
    }

    pub fn visibility(&self) -> ChatVisibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == ChatVisibility::Open
    }

    pub fn toggle(&mut self) -> ChatVisibility {
        self.visibility = match self.visibility {
            ChatVisibility::Closed => ChatVisibility::Open,
            ChatVisibility::Open => ChatVisibility::Closed,
        };
        self.visibility
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Record the visitor's question. Refused when the widget is closed,
    /// the input is blank, or a reply is still pending.
    pub fn begin_ask(&mut self, input: &str) -> Option<PendingQuestion> {
        let question = input.trim();
        if !self.is_open() || question.is_empty() || self.awaiting_reply {
            return None;
        }

        let history = self.entries.clone();
        self.entries.push(ChatEntry::visitor(question));
        self.awaiting_reply = true;

        Some(PendingQuestion {
            question: question.to_string(),
            history,
        })
    }

    /// Append the bot's side of the exchange. Does nothing unless a
    /// question is waiting for its reply.
    pub fn finish(&mut self, outcome: Result<RelayReply, ClientError>) -> Option<&ChatEntry> {
        if !self.awaiting_reply {
            return None;
        }

        let text = match outcome {
            Ok(reply) => reply
                .message
                .unwrap_or_else(|| MISSING_ANSWER_FALLBACK.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Question did not reach the relay");
                UNREACHABLE_MESSAGE.to_string()
            }
        };

        self.awaiting_reply = false;
        self.entries.push(ChatEntry::bot(text));
        self.entries.last()
    }

    pub async fn ask(&mut self, client: &RelayClient, input: &str) -> Option<&ChatEntry> {
        let pending = self.begin_ask(input)?;
        let outcome = client.ask(&pending.question, &pending.history).await;
        self.finish(outcome)
    }
}
