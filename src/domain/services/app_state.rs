#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::AskRequest;
use crate::domain::models::Author;
use crate::domain::models::Entry;
use crate::domain::models::EntryKind;
use crate::domain::models::ExtractedText;
use crate::domain::models::ExtractionError;
use crate::domain::models::Message;
use crate::domain::models::ServiceError;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;

const GREETING: &str =
    "Hey there! Load a PDF contract with /load PATH, then ask me anything about it.";

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /load (/l, /upload) [PATH] - Loads a PDF contract. Its text replaces any previously loaded contract.
- /reset (/r) - Clears the conversation and the loaded contract.
- /quit /exit (/q) - Exit PdfChat.
- /help (/h) - Provides this help menu.

Anything else you type is sent as a question about the loaded contract.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit PdfChat.
        "#;

    return text.trim().to_string();
}

fn file_name(path: &Path) -> String {
    return path
        .file_name()
        .map(|name| return name.to_string_lossy().to_string())
        .unwrap_or_else(|| return path.to_string_lossy().to_string());
}

fn service_error_text(err: &ServiceError) -> String {
    if let ServiceError::Unauthorized(_) = err {
        return format!("{err}. Double check your API key and try again.");
    }

    return format!("Sorry, I couldn't get an answer: {err}. Press Enter to try again.");
}

pub struct AppState {
    pub session: Session,
    /// Notices anchored to the transcript length at the time they were
    /// raised, so they stay in place between the messages around them.
    notices: Vec<(usize, Entry)>,
    pending_question: Option<String>,
    document_name: Option<String>,
    loading_label: String,
    pub bubble_list: BubbleList,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub scroll: Scroll,
    pub waiting_for_backend: bool,
}

impl AppState {
    pub fn new(health_check_error: Option<&ServiceError>) -> AppState {
        let mut app_state = AppState {
            session: Session::default(),
            notices: vec![],
            pending_question: None,
            document_name: None,
            loading_label: "".to_string(),
            bubble_list: BubbleList::default(),
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            waiting_for_backend: false,
        };

        app_state.add_notice(EntryKind::Normal, GREETING);
        if let Some(err) = health_check_error {
            app_state.add_notice(
                EntryKind::Warning,
                &format!("Hey, it looks like I can't reach the completion API. You can still load a contract, but questions may fail until it's back.\n\nError: {err}"),
            );
        }

        return app_state;
    }

    /// Everything shown in the chat window, in display order.
    pub fn entries(&self) -> Vec<Entry> {
        let transcript = self.session.transcript();
        let mut entries = vec![];

        for (idx, message) in transcript.iter().enumerate() {
            entries.extend(self.notices_at(idx));
            if let Some(entry) = Entry::from_message(message) {
                entries.push(entry);
            }
        }

        entries.extend(
            self.notices
                .iter()
                .filter(|(anchor, _)| return *anchor >= transcript.len())
                .map(|(_, entry)| return entry.clone()),
        );

        if let Some(question) = &self.pending_question {
            entries.push(Entry::new(Author::User, question));
        }

        return entries;
    }

    fn notices_at(&self, anchor: usize) -> Vec<Entry> {
        return self
            .notices
            .iter()
            .filter(|(notice_anchor, _)| return *notice_anchor == anchor)
            .map(|(_, entry)| return entry.clone())
            .collect();
    }

    pub fn status_text(&self) -> String {
        let document = self
            .document_name
            .clone()
            .unwrap_or_else(|| return "none, use /load PATH".to_string());

        return format!(
            "Contract: {document} | Model: {} | /help for commands",
            Author::Model.to_string()
        );
    }

    pub fn loading_label(&self) -> &str {
        return &self.loading_label;
    }

    pub fn add_notice(&mut self, kind: EntryKind, text: &str) {
        self.notices
            .push((self.session.transcript().len(), Entry::notice(kind, text)));
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.notices.clear();
        self.pending_question = None;
        self.document_name = None;
        self.add_notice(EntryKind::Success, "Conversation cleared.");
        self.add_notice(EntryKind::Normal, GREETING);
    }

    /// Handles a line submitted from the prompt box. Returns true when the
    /// app should exit.
    pub fn handle_input(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        if let Some(command) = SlashCommand::parse(text) {
            if command.is_quit() {
                return Ok(true);
            }

            if command.is_help() {
                self.add_notice(EntryKind::Normal, &help_text());
                return Ok(false);
            }

            if command.is_reset() {
                self.reset();
                return Ok(false);
            }

            if command.is_load() {
                let path = command.args_text();
                if path.is_empty() {
                    self.add_notice(
                        EntryKind::Warning,
                        "You need to tell me which file to load, for example `/load ./contract.pdf`.",
                    );
                    return Ok(false);
                }

                self.load_document(PathBuf::from(path), tx)?;
                return Ok(false);
            }
        }

        if !self.session.has_document() {
            self.add_notice(
                EntryKind::Warning,
                "Please load a contract first with `/load PATH`, then ask your question.",
            );
            return Ok(false);
        }

        tracing::debug!(question_len = text.len(), "Submitting question");
        self.pending_question = Some(text.to_string());
        self.loading_label = "Reading the contract...".to_string();
        self.waiting_for_backend = true;
        self.sync_dependants();
        self.scroll.last();

        tx.send(Action::Ask(AskRequest {
            transcript: self.session.transcript().to_vec(),
            document_text: self.session.document_text().to_string(),
            question: text.to_string(),
        }))?;

        return Ok(false);
    }

    pub fn load_document(
        &mut self,
        path: PathBuf,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.loading_label = format!("Loading {}...", file_name(&path));
        self.waiting_for_backend = true;
        tx.send(Action::LoadDocument(path))?;

        return Ok(());
    }

    pub fn handle_document(
        &mut self,
        path: &Path,
        res: Result<ExtractedText, ExtractionError>,
    ) {
        self.waiting_for_backend = false;
        let name = file_name(path);

        match res {
            Ok(ExtractedText::Text(text)) => {
                let len = text.chars().count();
                if let Err(err) = self.session.set_document(text) {
                    self.add_notice(EntryKind::Error, &err.to_string());
                    return;
                }

                self.add_notice(
                    EntryKind::Success,
                    &format!("Loaded {name} ({len} characters of text). Ask away!"),
                );
                self.document_name = Some(name);
            }
            Ok(ExtractedText::NoTextFound) => {
                self.add_notice(
                    EntryKind::Warning,
                    &format!("I couldn't find any text in {name}. Scanned documents aren't supported, try a PDF with selectable text."),
                );
            }
            Err(err) => {
                tracing::warn!(path = ?path, error = %err, "Failed to load document");
                self.add_notice(
                    EntryKind::Error,
                    &format!("I couldn't load {name}: {err}"),
                );
            }
        }
    }

    /// Records an answered question in the transcript. On failure nothing is
    /// recorded and the question is handed back for resubmission.
    pub fn handle_answer(
        &mut self,
        question: String,
        res: Result<String, ServiceError>,
    ) -> Result<Option<String>> {
        self.waiting_for_backend = false;
        self.pending_question = None;

        match res {
            Ok(answer) => {
                self.session.append(Message::user(&question))?;
                self.session.append(Message::assistant(&answer))?;
                self.sync_dependants();
                self.scroll.last();

                return Ok(None);
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to get an answer");
                self.add_notice(EntryKind::Error, &service_error_text(&err));

                return Ok(Some(question));
            }
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_entries(&self.entries(), self.last_known_width);

        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
