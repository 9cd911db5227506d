use serde::{Deserialize, Serialize};
use validator::Validate;

pub const QUESTION_REQUIRED: &str = "Question is required";
pub const NO_ANSWER_FALLBACK: &str = "No answer found";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// A visitor question from the chat widget.
///
/// The question arrives trimmed; a missing or non-string question reads as
/// empty. `conversation_history` is kept as raw JSON: it is advisory prompt
/// context and malformed entries are dropped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuestionRequest {
    #[serde(default, deserialize_with = "super::lenient::trimmed_text")]
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[serde(default, alias = "conversationHistory")]
    pub conversation_history: Option<serde_json::Value>,
}

/// One line of the chat widget transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub text: String,
    #[serde(default, alias = "is_bot")]
    pub is_bot: bool,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
}

impl QuestionRequest {
    /// History entries that look like chat lines, in their original order.
    pub fn history(&self) -> Vec<ChatEntry> {
        match &self.conversation_history {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<ChatEntry>(item.clone()).ok())
                .filter(|entry| !entry.text.trim().is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerReply {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}
