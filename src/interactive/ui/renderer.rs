use crate::interactive::constants::SEARCH_BAR_HEIGHT;
use crate::interactive::domain::models::Region;
use crate::interactive::ui::app_state::{AppState, Mode};
use crate::interactive::ui::components::{
    Component, help_dialog::HelpDialog, query_grid::QueryGrid, result_list::ResultList,
    search_bar::SearchBar,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub struct Renderer {
    search_bar: SearchBar,
    result_list: ResultList,
    query_grid: QueryGrid,
    help_dialog: HelpDialog,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            result_list: ResultList::new(),
            query_grid: QueryGrid::new(),
            help_dialog: HelpDialog::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, state: &AppState) {
        match state.mode {
            Mode::List => self.render_list_mode(f, state),
            Mode::Grid => self.render_grid_mode(f, state),
            Mode::Help => self.render_help_mode(f, state),
        }
    }

    fn render_list_mode(&mut self, f: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT), // Search bar
                Constraint::Min(0),                    // Results
            ])
            .split(f.area());

        self.search_bar.set_query(&state.search_query);
        self.search_bar.set_searching(state.ui.is_searching);
        self.search_bar
            .set_message(state.ui.message.clone(), state.ui.message_is_error);
        self.search_bar.set_connection(state.connection);

        self.result_list
            .set_session(state.store.session(Region::List), state.ui.is_searching);

        self.search_bar.render(f, chunks[0]);
        self.result_list.render(f, chunks[1]);
    }

    fn render_grid_mode(&mut self, f: &mut Frame, state: &AppState) {
        self.query_grid.set_columns(&state.store);
        let (subtitle, is_error) = match &state.ui.message {
            Some(message) => (Some(message.clone()), state.ui.message_is_error),
            None if !state.connection.is_open() => (
                Some(format!("connection: {}", state.connection.label())),
                false,
            ),
            None => (None, false),
        };
        self.query_grid.set_message(subtitle, is_error);
        self.query_grid.render(f, f.area());
    }

    fn render_help_mode(&mut self, f: &mut Frame, state: &AppState) {
        // Render the view the help was opened from underneath.
        match state.help_backdrop() {
            Mode::Grid => self.render_grid_mode(f, state),
            _ => self.render_list_mode(f, state),
        }
        self.help_dialog.render(f, f.area());
    }

    pub fn get_search_bar_mut(&mut self) -> &mut SearchBar {
        &mut self.search_bar
    }

    pub fn get_result_list_mut(&mut self) -> &mut ResultList {
        &mut self.result_list
    }

    pub fn get_query_grid_mut(&mut self) -> &mut QueryGrid {
        &mut self.query_grid
    }

    pub fn get_help_dialog_mut(&mut self) -> &mut HelpDialog {
        &mut self.help_dialog
    }
}
