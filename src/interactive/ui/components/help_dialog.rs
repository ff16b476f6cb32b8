use crate::interactive::constants::{HELP_DIALOG_MARGIN, HELP_DIALOG_MAX_WIDTH};
use crate::interactive::ui::components::{Component, view_layout::Styles};
use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct HelpDialog;

impl HelpDialog {
    pub fn new() -> Self {
        Self
    }

    fn help_text() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled("Personal Search - Interactive Mode", Styles::title())),
            Line::from(""),
            Line::from(Span::styled("List View:", Styles::label())),
            Line::from("  Enter       - Submit the query"),
            Line::from("  ↑/↓         - Scroll results"),
            Line::from("  Ctrl+G      - Switch to the query grid"),
            Line::from("  Esc         - Quit"),
            Line::from(""),
            Line::from(Span::styled("Grid View:", Styles::label())),
            Line::from("  Tab / Shift+Tab - Move between query columns"),
            Line::from("  Enter       - Search the focused column"),
            Line::from("  Ctrl+G      - Switch to the list view"),
            Line::from("  Esc         - Quit"),
            Line::from(""),
            Line::from(Span::styled("Connection:", Styles::label())),
            Line::from("  Queries stream over the websocket while it is open;"),
            Line::from("  otherwise each search falls back to a one-shot HTTP call."),
            Line::from("  The client never reconnects - restart it to retry."),
            Line::from(""),
            Line::from(Span::styled("Press any key to close", Styles::dimmed())),
        ]
    }
}

impl Default for HelpDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let text = Self::help_text();
        let height = (text.len() as u16 + 2).min(area.height.saturating_sub(HELP_DIALOG_MARGIN));
        let width = HELP_DIALOG_MAX_WIDTH.min(area.width.saturating_sub(HELP_DIALOG_MARGIN));
        let dialog = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        f.render_widget(Clear, dialog);
        let help = Paragraph::new(text)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .alignment(Alignment::Left);
        f.render_widget(help, dialog);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        Some(Message::CloseHelp)
    }
}
