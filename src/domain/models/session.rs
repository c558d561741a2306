#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::Message;

pub const PRIMER: &str = "You are a contract specialist. Answer based on the provided text.";

/// Conversation state for one interaction context: the transcript sent to
/// the model and the text of the currently loaded document.
///
/// The transcript always starts with exactly one system primer. Only
/// `reset` ever replaces it.
#[derive(Clone, Debug)]
pub struct Session {
    transcript: Vec<Message>,
    document_text: String,
}

impl Default for Session {
    fn default() -> Session {
        return Session {
            transcript: vec![Message::system(PRIMER)],
            document_text: "".to_string(),
        };
    }
}

impl Session {
    pub fn reset(&mut self) {
        self.transcript = vec![Message::system(PRIMER)];
        self.document_text = "".to_string();
    }

    pub fn set_document(&mut self, text: String) -> Result<()> {
        if text.trim().is_empty() {
            bail!("Refusing to store an empty document");
        }

        self.document_text = text;
        return Ok(());
    }

    pub fn append(&mut self, message: Message) -> Result<()> {
        if message.is_system() {
            bail!("The transcript may only contain the primer as a system message");
        }

        self.transcript.push(message);
        return Ok(());
    }

    pub fn has_document(&self) -> bool {
        return !self.document_text.is_empty();
    }

    pub fn transcript(&self) -> &[Message] {
        return &self.transcript;
    }

    pub fn document_text(&self) -> &str {
        return &self.document_text;
    }
}
