//! Timeline entry model.

use serde::{Deserialize, Serialize};

/// Who authored a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Label shown in front of the entry text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Assistant",
        }
    }
}

/// One message in the conversation log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub sender: Sender,
    pub text: String,
}

impl TimelineEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }

    /// `"You: hi"` / `"Assistant: hello"`.
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.sender.label(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_sender_lowercase() {
        let json = serde_json::to_value(TimelineEntry::assistant("Hello!")).unwrap();
        assert_eq!(json["sender"], "assistant");
        assert_eq!(json["text"], "Hello!");
    }

    #[test]
    fn display_uses_labels() {
        assert_eq!(TimelineEntry::user("hi").display_line(), "You: hi");
        assert_eq!(
            TimelineEntry::assistant("hello").display_line(),
            "Assistant: hello"
        );
    }
}
