use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::EntryKind;
use crate::domain::models::ExtractedText;
use crate::domain::models::ExtractionError;
use crate::domain::models::Message;
use crate::domain::models::ServiceError;
use crate::domain::models::PRIMER;

fn app_state() -> AppState {
    let mut app_state = AppState::new(None);
    app_state.set_rect(Rect::new(0, 0, 100, 300));
    return app_state;
}

fn app_state_with_document() -> AppState {
    let mut app_state = app_state();
    app_state.handle_document(
        Path::new("./contract.pdf"),
        Ok(ExtractedText::Text("Contract X".to_string())),
    );
    return app_state;
}

fn last_kind(app_state: &AppState) -> Option<EntryKind> {
    return app_state.entries().last().map(|entry| return entry.kind);
}

mod new {
    use super::*;

    #[test]
    fn it_greets_the_user() {
        let app_state = AppState::new(None);
        let entries = app_state.entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].author, Author::PdfChat);
        assert_eq!(entries[0].kind, EntryKind::Normal);
        assert_eq!(app_state.session.transcript(), &[Message::system(PRIMER)]);
    }

    #[test]
    fn it_warns_when_the_health_check_failed() {
        let app_state = AppState::new(Some(&ServiceError::RateLimited));
        let entries = app_state.entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, EntryKind::Warning);
        assert!(entries[1].text.contains("rate limit"));
    }
}

mod handle_input {
    use super::*;

    #[test]
    fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        assert!(app_state.handle_input("/q", &tx)?);
        assert!(app_state.handle_input("/exit", &tx)?);
        assert!(!app_state.waiting_for_backend);

        return Ok(());
    }

    #[test]
    fn it_ignores_empty_input() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        assert!(!app_state.handle_input("   ", &tx)?);
        assert_eq!(app_state.entries().len(), 1);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_shows_help() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.handle_input("/help", &tx)?;

        let entries = app_state.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].text.contains("COMMANDS:"));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_warns_when_no_document_is_loaded() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        let should_break = app_state.handle_input("What is the term?", &tx)?;

        assert!(!should_break);
        assert!(!app_state.waiting_for_backend);
        assert_eq!(last_kind(&app_state), Some(EntryKind::Warning));
        assert_eq!(app_state.session.transcript().len(), 1);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_requests_a_document_load() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.handle_input("/load ./my contract.pdf", &tx)?;

        assert!(app_state.waiting_for_backend);
        assert_eq!(app_state.loading_label(), "Loading my contract.pdf...");
        match rx.try_recv()? {
            Action::LoadDocument(path) => {
                assert_eq!(path, PathBuf::from("./my contract.pdf"));
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_warns_when_load_has_no_path() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.handle_input("/upload", &tx)?;

        assert!(!app_state.waiting_for_backend);
        assert_eq!(last_kind(&app_state), Some(EntryKind::Warning));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_sends_a_transcript_snapshot_with_the_question() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state_with_document();

        app_state.handle_input("  What is the term?  ", &tx)?;

        assert!(app_state.waiting_for_backend);
        assert_eq!(app_state.session.transcript().len(), 1);

        let pending = app_state.entries();
        assert_eq!(pending.last().map(|e| return e.author.clone()), Some(Author::User));

        match rx.try_recv()? {
            Action::Ask(request) => {
                assert_eq!(request.transcript, vec![Message::system(PRIMER)]);
                assert_eq!(request.document_text, "Contract X");
                assert_eq!(request.question, "What is the term?");
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_resets_the_conversation() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state_with_document();
        app_state.handle_input("What is the term?", &tx)?;
        app_state.handle_answer(
            "What is the term?".to_string(),
            Ok("Twelve months.".to_string()),
        )?;

        app_state.handle_input("/reset", &tx)?;

        assert_eq!(app_state.session.transcript(), &[Message::system(PRIMER)]);
        assert_eq!(app_state.session.document_text(), "");
        assert!(!app_state.session.has_document());

        let entries = app_state.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| return e.author == Author::PdfChat));

        return Ok(());
    }
}

mod handle_document {
    use super::*;

    #[test]
    fn it_stores_extracted_text() {
        let app_state = app_state_with_document();

        assert_eq!(app_state.session.document_text(), "Contract X");
        assert_eq!(app_state.session.transcript().len(), 1);
        assert_eq!(last_kind(&app_state), Some(EntryKind::Success));
    }

    #[test]
    fn it_names_the_document_in_the_status_line() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state_with_document();
        assert!(app_state.status_text().contains("Contract: contract.pdf"));

        app_state.handle_input("/r", &tx)?;
        assert!(app_state.status_text().contains("Contract: none"));

        return Ok(());
    }

    #[test]
    fn it_replaces_the_previous_document() {
        let mut app_state = app_state_with_document();
        app_state.handle_document(
            Path::new("./other.pdf"),
            Ok(ExtractedText::Text("Contract Y".to_string())),
        );

        assert_eq!(app_state.session.document_text(), "Contract Y");
    }

    #[test]
    fn it_keeps_the_document_when_no_text_is_found() {
        let mut app_state = app_state_with_document();
        app_state.waiting_for_backend = true;
        app_state.handle_document(Path::new("./scan.pdf"), Ok(ExtractedText::NoTextFound));

        assert!(!app_state.waiting_for_backend);
        assert_eq!(app_state.session.document_text(), "Contract X");
        assert_eq!(last_kind(&app_state), Some(EntryKind::Warning));
    }

    #[test]
    fn it_keeps_the_document_on_errors() {
        let mut app_state = app_state_with_document();
        app_state.handle_document(Path::new("./locked.pdf"), Err(ExtractionError::Encrypted));

        assert_eq!(app_state.session.document_text(), "Contract X");
        assert_eq!(last_kind(&app_state), Some(EntryKind::Error));
        assert!(app_state
            .entries()
            .last()
            .is_some_and(|e| return e.text.contains("locked.pdf")));
    }
}

mod handle_answer {
    use super::*;

    #[test]
    fn it_records_the_question_and_answer() -> Result<()> {
        let mut app_state = app_state_with_document();
        app_state.waiting_for_backend = true;

        let restored = app_state.handle_answer(
            "What is the term?".to_string(),
            Ok("Twelve months.".to_string()),
        )?;

        assert_eq!(restored, None);
        assert!(!app_state.waiting_for_backend);
        assert_eq!(
            app_state.session.transcript(),
            &[
                Message::system(PRIMER),
                Message::user("What is the term?"),
                Message::assistant("Twelve months."),
            ]
        );

        let entries = app_state.entries();
        let authors = entries
            .iter()
            .map(|e| return e.author.clone())
            .collect::<Vec<Author>>();
        assert_eq!(
            authors,
            vec![Author::PdfChat, Author::PdfChat, Author::User, Author::Model]
        );

        return Ok(());
    }

    #[test]
    fn it_keeps_the_transcript_on_errors() -> Result<()> {
        let mut app_state = app_state_with_document();

        let restored = app_state.handle_answer(
            "What is the term?".to_string(),
            Err(ServiceError::Status {
                status: 500,
                body: "oops".to_string(),
            }),
        )?;

        assert_eq!(restored, Some("What is the term?".to_string()));
        assert_eq!(app_state.session.transcript().len(), 1);
        assert_eq!(last_kind(&app_state), Some(EntryKind::Error));

        return Ok(());
    }

    #[test]
    fn it_appends_exactly_one_exchange_on_resubmission() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state_with_document();

        app_state.handle_input("What is the term?", &tx)?;
        rx.try_recv()?;
        let restored = app_state.handle_answer(
            "What is the term?".to_string(),
            Err(ServiceError::RateLimited),
        )?;
        let before = app_state.session.transcript().len();

        if let Some(question) = restored {
            app_state.handle_input(&question, &tx)?;
        }
        match rx.try_recv()? {
            Action::Ask(request) => {
                assert_eq!(request.transcript.len(), before);
                app_state.handle_answer(request.question, Ok("Twelve months.".to_string()))?;
            }
            _ => bail!("Wrong enum"),
        }

        assert_eq!(app_state.session.transcript().len(), before + 2);
        assert_eq!(
            app_state.session.transcript()[before],
            Message::user("What is the term?")
        );

        return Ok(());
    }

    #[test]
    fn it_keeps_notices_in_place() -> Result<()> {
        let mut app_state = app_state_with_document();
        app_state.handle_answer(
            "What is the term?".to_string(),
            Ok("Twelve months.".to_string()),
        )?;
        app_state.handle_document(Path::new("./scan.pdf"), Ok(ExtractedText::NoTextFound));

        let kinds = app_state
            .entries()
            .iter()
            .map(|e| return e.kind)
            .collect::<Vec<EntryKind>>();
        assert_eq!(
            kinds,
            vec![
                EntryKind::Normal,
                EntryKind::Success,
                EntryKind::Normal,
                EntryKind::Normal,
                EntryKind::Warning,
            ]
        );

        return Ok(());
    }
}
