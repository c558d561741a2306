use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::ServiceError;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    let document = Config::get(ConfigKey::Document);
    if !document.is_empty() {
        app_state.load_document(PathBuf::from(document), &tx)?;
    }

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            if usize::from(layout[1].width) != app_state.last_known_width
                || usize::from(layout[1].height) != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            frame.render_widget(
                Paragraph::new(app_state.status_text())
                    .style(Style::default().fg(Color::DarkGray)),
                layout[0],
            );

            app_state
                .bubble_list
                .render(frame, layout[1], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[1].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.waiting_for_backend {
                loading.render(frame, layout[2], app_state.loading_label());
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::AnswerReceived(question, res) => {
                if let Some(restored) = app_state.handle_answer(question, res)? {
                    textarea = TextArea::with_text(&restored);
                }
            }
            Event::DocumentLoaded(path, res) => {
                app_state.handle_document(&path, res);
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_backend {
                    textarea.input(input);
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_backend {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                if app_state.handle_input(&input_str, &tx)? {
                    break;
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_backend {
                    // The prompt box is single line, Enter submits.
                    textarea.insert_str(text.replace("\r\n", " ").replace(['\r', '\n'], " "));
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UIResize() | Event::UITick() => (),
        }
    }

    return Ok(());
}

/// Best effort terminal restore, used from the panic hook and before
/// printing fatal errors.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    health_check_error: Option<ServiceError>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(health_check_error.as_ref());

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
