use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        return TextArea::with_title("Ask a question about the contract, or type /help");
    }

    /// Prompt box pre-filled with text, used to hand a failed question back
    /// to the user for resubmission.
    pub fn with_text(text: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea = TextArea::with_title("Press Enter to resubmit");
        textarea.insert_str(text);

        return textarea;
    }

    fn with_title(title: &'a str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }
}
