use crate::interactive::domain::models::{
    GRID_COLUMNS, GRID_RESULT_ROWS, Region, SessionStore,
};
use crate::interactive::ui::components::{
    Component, text_input::TextInput, view_layout::{Styles, ViewLayout},
};
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// The 5×5 query grid. Row 0 of each column is an editable query cell;
/// the rows beneath show the first results accumulated for that column,
/// one chunk's text per cell, blank when the column has fewer results.
pub struct QueryGrid {
    inputs: Vec<TextInput>,
    focused: usize,
    columns: Vec<Vec<String>>,
    message: Option<String>,
    message_is_error: bool,
}

impl Default for QueryGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryGrid {
    pub fn new() -> Self {
        Self {
            inputs: (0..GRID_COLUMNS).map(|_| TextInput::new()).collect(),
            focused: 0,
            columns: vec![vec![String::new(); GRID_RESULT_ROWS]; GRID_COLUMNS],
            message: None,
            message_is_error: false,
        }
    }

    /// Mirror every column's accumulated sequence into the result cells.
    pub fn set_columns(&mut self, store: &SessionStore) {
        for (index, column) in self.columns.iter_mut().enumerate() {
            let chunks = store
                .session(Region::Column(index))
                .map(|session| session.chunks.as_slice())
                .unwrap_or_default();
            for (row, cell) in column.iter_mut().enumerate() {
                *cell = chunks
                    .get(row)
                    .map(|chunk| chunk.text.clone())
                    .unwrap_or_default();
            }
        }
    }

    pub fn set_message(&mut self, message: Option<String>, is_error: bool) {
        self.message = message;
        self.message_is_error = is_error;
    }

    pub fn focused_column(&self) -> usize {
        self.focused
    }

    #[cfg(test)]
    pub(crate) fn cell_text(&self, row: usize, column: usize) -> &str {
        &self.columns[column][row - 1]
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(area);

        for (index, column_area) in columns.iter().enumerate() {
            self.render_column(f, index, *column_area);
        }
    }

    fn render_column(&self, f: &mut Frame, index: usize, area: Rect) {
        let mut constraints = vec![Constraint::Length(3); 1 + GRID_RESULT_ROWS];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        // Row 0: the query input.
        let focused = index == self.focused;
        let border_style = if focused {
            Styles::title()
        } else {
            Styles::dimmed()
        };
        let input_line = if focused {
            Line::from(self.inputs[index].render_cursor_spans())
        } else if self.inputs[index].text().is_empty() {
            Line::from(Span::styled(
                format!("Query Col {index}..."),
                Styles::dimmed(),
            ))
        } else {
            Line::from(Span::raw(self.inputs[index].text()))
        };
        let input = Paragraph::new(input_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(input, rows[0]);

        // Rows 1..: read-only result cells.
        for row in 0..GRID_RESULT_ROWS {
            let cell_area = rows[1 + row];
            let width = cell_area.width.saturating_sub(2) as usize;
            let text: String = self.columns[index][row].chars().take(width).collect();
            let cell = Paragraph::new(Line::from(Span::styled(text, Styles::normal()))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::dimmed()),
            );
            f.render_widget(cell, cell_area);
        }
    }
}

impl Component for QueryGrid {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut layout = ViewLayout::new("Query Grid".to_string()).with_status_text(
            "Enter: Search column | Tab/Shift+Tab: Switch column | Ctrl+G: List view | Esc: Exit | ?: Help"
                .to_string(),
        );
        if let Some(message) = &self.message {
            layout = layout.with_subtitle(message.clone());
            if self.message_is_error {
                layout = layout.with_subtitle_style(Styles::error());
            }
        }
        layout.render(f, area, |f, content| self.render_grid(f, content));
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Tab => {
                self.focused = (self.focused + 1) % GRID_COLUMNS;
                None
            }
            KeyCode::BackTab => {
                self.focused = (self.focused + GRID_COLUMNS - 1) % GRID_COLUMNS;
                None
            }
            KeyCode::Enter => Some(Message::SubmitQuery(
                Region::Column(self.focused),
                self.inputs[self.focused].text().to_string(),
            )),
            _ => {
                self.inputs[self.focused].handle_key(key);
                None
            }
        }
    }
}
