//! Chat-completion client and the checklist generator built on top of it.

mod generator;
mod openai;

pub use generator::{split_checklist, ChecklistGenerator};
pub use openai::OpenAiClient;

use serde::{Deserialize, Serialize};

/// One message of a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}
