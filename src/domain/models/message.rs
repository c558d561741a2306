#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A single turn of the transcript. Messages are immutable once they are
/// appended to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
}

impl Message {
    pub fn system(text: &str) -> Message {
        return Message::System(text.to_string());
    }

    pub fn user(text: &str) -> Message {
        return Message::User(text.to_string());
    }

    pub fn assistant(text: &str) -> Message {
        return Message::Assistant(text.to_string());
    }

    /// Role name used by chat completion APIs.
    pub fn role(&self) -> &'static str {
        match self {
            Message::System(_) => return "system",
            Message::User(_) => return "user",
            Message::Assistant(_) => return "assistant",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Message::System(text) | Message::User(text) | Message::Assistant(text) => {
                return text;
            }
        }
    }

    pub fn is_system(&self) -> bool {
        return matches!(self, Message::System(_));
    }
}
