#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;

use super::Author;
use super::Message;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Normal,
    Success,
    Warning,
    Error,
}

/// Something shown in the chat window. Entries are derived from the
/// session transcript, plus notices raised by the app itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub author: Author,
    pub text: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(author: Author, text: &str) -> Entry {
        return Entry {
            author,
            text: text.replace('\t', "  "),
            kind: EntryKind::Normal,
        };
    }

    pub fn notice(kind: EntryKind, text: &str) -> Entry {
        return Entry {
            author: Author::PdfChat,
            text: text.replace('\t', "  "),
            kind,
        };
    }

    /// The primer is never displayed.
    pub fn from_message(message: &Message) -> Option<Entry> {
        match message {
            Message::System(_) => return None,
            Message::User(text) => return Some(Entry::new(Author::User, text)),
            Message::Assistant(text) => return Some(Entry::new(Author::Model, text)),
        }
    }
}
