use std::path::PathBuf;

use tui_textarea::Input;

use super::ExtractedText;
use super::ExtractionError;
use super::ServiceError;

#[derive(Debug)]
pub enum Event {
    AnswerReceived(String, Result<String, ServiceError>),
    DocumentLoaded(PathBuf, Result<ExtractedText, ExtractionError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
