use crate::client::ConnectionState;
use crate::interactive::domain::models::Region;
use crate::interactive::ui::components::{
    Component, text_input::TextInput, view_layout::Styles,
};
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// The list view's query input. Enter submits; the border title shows the
/// connection state and any transient status message, with error notices
/// rendered in the error style.
#[derive(Default)]
pub struct SearchBar {
    input: TextInput,
    is_searching: bool,
    message: Option<String>,
    message_is_error: bool,
    connection: Option<ConnectionState>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: &str) {
        // Only sync on external changes so the cursor survives redraws.
        if self.input.text() != query {
            self.input.set_text(query.to_string());
        }
    }

    pub fn set_searching(&mut self, is_searching: bool) {
        self.is_searching = is_searching;
    }

    pub fn set_message(&mut self, message: Option<String>, is_error: bool) {
        self.message = message;
        self.message_is_error = is_error;
    }

    pub fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = Some(connection);
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }
}

impl Component for SearchBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut title = "Search".to_string();
        if let Some(connection) = self.connection {
            title.push_str(&format!(" [{}]", connection.label()));
        }

        let mut title_spans = vec![Span::raw(title)];
        if let Some(msg) = &self.message {
            let style = if self.message_is_error {
                Styles::error()
            } else {
                Styles::dimmed()
            };
            title_spans.push(Span::styled(format!(" - {msg}"), style));
        } else if self.is_searching {
            title_spans.push(Span::styled(" - [searching...]", Styles::dimmed()));
        }

        let input = Paragraph::new(Line::from(self.input.render_cursor_spans()))
            .block(
                Block::default()
                    .title(Line::from(title_spans))
                    .borders(Borders::ALL),
            )
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(input, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => Some(Message::SubmitQuery(
                Region::List,
                self.input.text().to_string(),
            )),
            _ => {
                if self.input.handle_key(key) {
                    Some(Message::QueryChanged(self.input.text().to_string()))
                } else {
                    None
                }
            }
        }
    }
}
