use crate::formatters::format_scores;
use crate::interactive::constants::RESULT_PAGE_LINES;
use crate::interactive::domain::models::QuerySession;
use crate::interactive::ui::components::{Component, view_layout::Styles};
use crate::interactive::ui::events::Message;
use crate::schemas::Chunk;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// The list view's result area: an optional LLM summary followed by the
/// full accumulated chunk sequence, re-rendered from scratch on every
/// update with 1-based display ranks.
#[derive(Default)]
pub struct ResultList {
    chunks: Vec<Chunk>,
    summary: Option<String>,
    query: Option<String>,
    is_searching: bool,
    scroll_offset: usize,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the region's session into the component.
    pub fn set_session(&mut self, session: Option<&QuerySession>, is_searching: bool) {
        match session {
            Some(session) => {
                self.chunks = session.chunks.clone();
                self.summary = session.summary.clone();
                self.query = Some(session.query.clone());
            }
            None => {
                self.chunks.clear();
                self.summary = None;
                self.query = None;
            }
        }
        self.is_searching = is_searching;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        // Each record renders as three lines (text, source/scores, blank).
        let summary_lines = if self.summary.is_some() { 2 } else { 0 };
        (self.chunks.len() * 3 + summary_lines).saturating_sub(1)
    }

    pub(crate) fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub(crate) fn content_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        if let Some(summary) = &self.summary {
            lines.push(Line::from(vec![
                Span::styled("Summary: ", Styles::label()),
                Span::styled(summary.as_str(), Styles::normal()),
            ]));
            lines.push(Line::from(""));
        }

        if self.query.is_none() {
            lines.push(Line::from(Span::styled(
                "Type a query and press Enter to search.",
                Styles::dimmed(),
            )));
            return lines;
        }

        if self.chunks.is_empty() {
            if !self.is_searching {
                lines.push(Line::from(Span::styled(
                    "No chunks returned.",
                    Styles::dimmed(),
                )));
            }
            return lines;
        }

        for (index, chunk) in self.chunks.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>3}. ", index + 1), Styles::label()),
                Span::styled(chunk.text.as_str(), Styles::normal()),
            ]));
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled(format!("Source: {}", chunk.source), Styles::dimmed()),
                Span::raw(" "),
                Span::styled(format_scores(chunk), Styles::dimmed()),
            ]));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Component for ResultList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "Search Results",
            Styles::title(),
        )))
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(title, chunks[0]);

        let content = Paragraph::new(self.content_lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));
        f.render_widget(content, chunks[1]);

        let status_text =
            "Enter: Search | ↑/↓: Scroll | Ctrl+G: Grid view | Esc: Exit | ?: Help";
        let status_bar = Paragraph::new(status_text)
            .style(Styles::dimmed())
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(status_bar, chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(RESULT_PAGE_LINES);
            }
            KeyCode::PageDown => {
                self.scroll_offset = (self.scroll_offset + RESULT_PAGE_LINES).min(self.max_scroll());
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
            }
            KeyCode::End => {
                self.scroll_offset = self.max_scroll();
            }
            _ => {}
        }
        None
    }
}
