//! Append-only chat transcript between the user and the assistant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;
use crate::responder::ChatResponder;

pub const GREETING: &str = "Hello! How can I help you with your expenses today?";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// New history opened with the assistant greeting.
    pub fn new() -> Self {
        let mut h = Self { messages: Vec::new() };
        h.push(Sender::Assistant, GREETING);
        h
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Record the question and the responder's answer. Blank input is ignored.
    pub fn ask(
        &mut self,
        question: &str,
        expenses: &[ExpenseRecord],
        responder: &ChatResponder,
    ) -> Option<String> {
        if question.trim().is_empty() {
            return None;
        }
        self.push(Sender::User, question);
        let reply = responder.respond(question, expenses);
        self.push(Sender::Assistant, &reply);
        Some(reply)
    }

    fn push(&mut self, sender: Sender, text: &str) {
        self.messages.push(ChatMessage {
            id: format!("msg-{:04}", self.messages.len() + 1),
            text: text.to_string(),
            sender,
            sent_at: Utc::now(),
        });
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}
