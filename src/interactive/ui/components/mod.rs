pub mod help_dialog;
pub mod query_grid;
pub mod result_list;
pub mod search_bar;
pub mod text_input;
pub mod view_layout;

#[cfg(test)]
mod search_bar_test;

use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Message>;
}
