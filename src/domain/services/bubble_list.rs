use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Entry;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry {
    entry: Entry,
    lines: Vec<Line<'static>>,
}

/// Rendered chat bubbles, cached per entry index. Entries only ever get
/// appended, or all cleared on reset, so a cached index is reused as long
/// as it still holds the same entry.
#[derive(Default)]
pub struct BubbleList {
    cache: Vec<BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
}

impl BubbleList {
    pub fn set_entries(&mut self, entries: &[Entry], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        let first_stale = self
            .cache
            .iter()
            .zip(entries.iter())
            .position(|(cached, entry)| return cached.entry != *entry)
            .unwrap_or_else(|| return self.cache.len().min(entries.len()));
        self.cache.truncate(first_stale);

        for entry in entries.iter().skip(first_stale) {
            let mut align = BubbleAlignment::Left;
            if entry.author == Author::User {
                align = BubbleAlignment::Right;
            }

            self.cache.push(BubbleCacheEntry {
                entry: entry.clone(),
                lines: Bubble::new(entry, align, line_width).as_lines(),
            });
        }

        self.lines_len = self
            .cache
            .iter()
            .map(|cache_entry| return cache_entry.lines.len())
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: usize) {
        let lines: Vec<Line> = self
            .cache
            .iter()
            .flat_map(|cache_entry| {
                return cache_entry.lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
            rect,
        );
    }
}
