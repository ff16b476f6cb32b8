#[cfg(test)]
mod tests {
    use super::super::Component;
    use super::super::search_bar::SearchBar;
    use crate::interactive::domain::models::Region;
    use crate::interactive::ui::events::Message;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn typing_emits_query_changed() {
        let mut bar = SearchBar::new();

        let msg = bar.handle_key(key(KeyCode::Char('c')));
        assert!(matches!(msg, Some(Message::QueryChanged(ref q)) if q == "c"));

        bar.handle_key(key(KeyCode::Char('a')));
        let msg = bar.handle_key(key(KeyCode::Char('t')));
        assert!(matches!(msg, Some(Message::QueryChanged(ref q)) if q == "cat"));
        assert_eq!(bar.query(), "cat");
    }

    #[test]
    fn enter_submits_the_list_region_query() {
        let mut bar = SearchBar::new();
        for c in "cats".chars() {
            bar.handle_key(key(KeyCode::Char(c)));
        }

        let msg = bar.handle_key(key(KeyCode::Enter));
        match msg {
            Some(Message::SubmitQuery(region, query)) => {
                assert_eq!(region, Region::List);
                assert_eq!(query, "cats");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn enter_with_empty_query_still_reports_submit() {
        // The state machine is what rejects empty queries.
        let mut bar = SearchBar::new();
        let msg = bar.handle_key(key(KeyCode::Enter));
        assert!(matches!(msg, Some(Message::SubmitQuery(Region::List, ref q)) if q.is_empty()));
    }

    #[test]
    fn set_query_only_resets_on_external_change() {
        let mut bar = SearchBar::new();
        for c in "cats".chars() {
            bar.handle_key(key(KeyCode::Char(c)));
        }
        // Redraw with the same text must not clobber editing state.
        bar.set_query("cats");
        bar.handle_key(key(KeyCode::Left));
        bar.handle_key(key(KeyCode::Backspace));
        assert_eq!(bar.query(), "cas");

        // External change replaces the text.
        bar.set_query("dogs");
        assert_eq!(bar.query(), "dogs");
    }
}
