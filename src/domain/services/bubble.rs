#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::Author;
use crate::domain::models::Entry;
use crate::domain::models::EntryKind;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    entry: &'a Entry,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

/// Terminal columns taken by text. CJK and emoji take two.
fn text_width(text: &str) -> usize {
    return text.width();
}

/// Splits off the longest head of word that fits in max_width columns. The
/// head always holds at least one char.
fn split_at_width(word: &str, max_width: usize) -> (String, String) {
    let mut used = 0;
    let mut split = word.len();
    for (idx, ch) in word.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if idx > 0 && used + ch_width > max_width {
            split = idx;
            break;
        }
        used += ch_width;
    }

    return (word[..split].to_string(), word[split..].to_string());
}

fn fill(total: usize, used: usize) -> String {
    return " ".repeat(total.saturating_sub(used));
}

/// Splits a line into rows no wider than max_line_length, breaking on
/// spaces. Words longer than a row are broken mid-word.
fn wrap_line(line: &str, max_line_length: usize) -> Vec<String> {
    let mut rows: Vec<String> = vec![];
    let mut row = String::new();

    for word in line.split(' ') {
        let mut word = word.to_string();
        while text_width(&word) > max_line_length {
            if !row.is_empty() {
                rows.push(row);
                row = String::new();
            }
            let (head, rest) = split_at_width(&word, max_line_length);
            word = rest;
            rows.push(head);
        }

        if row.is_empty() {
            row = word;
        } else if text_width(&row) + 1 + text_width(&word) <= max_line_length {
            row = format!("{row} {word}");
        } else {
            rows.push(row);
            row = word;
        }
    }
    rows.push(row);

    return rows;
}

impl<'a> Bubble<'a> {
    pub fn new(
        entry: &'a Entry,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            entry,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Left border + space, space + right border.
            bubble_padding: 4,
            // Bubble padding + scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let mut text = self.entry.text.to_string();
        if text.is_empty() {
            text = " ".to_string();
        }

        let lines = text
            .lines()
            .flat_map(|line| {
                return wrap_line(line.trim_end(), max_line_length);
            })
            .map(|row| {
                return self.row_to_line(row, max_line_length);
            })
            .collect();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn row_to_line(&self, row: String, max_line_length: usize) -> Line<'static> {
        let row_len = text_width(&row);
        let row_fill = fill(max_line_length, row_len);
        let outer_padding = fill(
            self.window_max_width,
            max_line_length + Bubble::style_config().bubble_padding,
        );

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::from(row),
            self.highlight_span(format!("{row_fill} │")),
        ];

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_padding));
            return Line::from(spans);
        }

        spans.insert(0, Span::from(outer_padding));
        return Line::from(spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self.window_max_width.saturating_sub(line_border_width);

        let longest = self
            .entry
            .text
            .lines()
            .map(|line| {
                return text_width(line.trim_end());
            })
            .max()
            .unwrap_or(0);

        let username_len = text_width(&self.entry.author.to_string());

        return longest.min(available).max(username_len).max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let username = self.entry.author.to_string();
        // Add 2 for the spaces next to the vertical bars.
        let inner_width = max_line_length + 2;
        let top_bar = format!(
            "╭{username}{}╮",
            "─".repeat(inner_width.saturating_sub(text_width(&username)))
        );
        let bottom_bar = format!("╰{}╯", "─".repeat(inner_width));
        let outer_padding = fill(
            self.window_max_width,
            max_line_length + Bubble::style_config().bubble_padding,
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{outer_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{outer_padding}")));
        } else {
            res.push(self.highlight_line(format!("{outer_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{outer_padding}{bottom_bar}")));
        }

        return res;
    }

    fn border_color(&self) -> Option<Color> {
        match self.entry.kind {
            EntryKind::Error => return Some(Color::Red),
            EntryKind::Warning => return Some(Color::Yellow),
            EntryKind::Success => return Some(Color::Green),
            EntryKind::Normal => {
                if self.entry.author == Author::PdfChat {
                    return Some(Color::Rgb(138, 85, 63)); // Brown
                }
                return None;
            }
        }
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if let Some(color) = self.border_color() {
            return Span::styled(
                text,
                Style {
                    fg: Some(color),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
