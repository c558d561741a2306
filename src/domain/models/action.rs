use std::path::PathBuf;

use super::Message;

#[derive(Clone, Debug)]
pub struct AskRequest {
    pub transcript: Vec<Message>,
    pub document_text: String,
    pub question: String,
}

#[derive(Debug)]
pub enum Action {
    Ask(AskRequest),
    LoadDocument(PathBuf),
}
