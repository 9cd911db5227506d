//! Prompt assembly for the Q&A endpoint.

use crate::models::{ChatEntry, PersonalInfo};

/// Only the most recent turns are forwarded to keep the prompt bounded.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Compose the single prompt sent to the answering provider: the grounding
/// instruction, the personal information document, optional recent chat turns
/// and the visitor's question.
pub fn build_prompt(info: &PersonalInfo, history: &[ChatEntry], question: &str) -> String {
    let mut prompt = format!(
        "Answer the following question using ONLY this information:\n{}\n",
        info.as_str()
    );

    let recent = &history[history.len().saturating_sub(MAX_HISTORY_ENTRIES)..];
    if !recent.is_empty() {
        prompt.push_str("Previous conversation:\n");
        for entry in recent {
            let speaker = if entry.is_bot { "Assistant" } else { "Visitor" };
            prompt.push_str(speaker);
            prompt.push_str(": ");
            prompt.push_str(entry.text.trim());
            prompt.push('\n');
        }
    }

    prompt.push_str("Question: ");
    prompt.push_str(question);
    prompt.push_str("\nAnswer:");
    prompt
}
