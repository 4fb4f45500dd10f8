use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_favourites(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_favourites_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_favourites_cursor(1),
        KeyCode::Home | KeyCode::Char('g') => app.favourites_cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.move_favourites_cursor(isize::MAX / 2),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => app.unfavourite_selected(),
        KeyCode::Char('o') | KeyCode::Enter => app.open_selected_search(),
        KeyCode::Esc | KeyCode::Char('b') => app.back_to_form(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle_key;
    use super::super::test_keys::*;
    use crate::model::{GiftSuggestion, SuggestionBatch};
    use crate::ops::session::View;
    use crate::tui::app::App;
    use crate::tui::gesture::{EXIT_TICKS, SwipeDirection};
    use crate::tui::theme::Theme;
    use crossterm::event::KeyCode;

    fn with_favourites(names: &[&str]) -> App {
        let mut app = App::new(Theme::default(), true, 2025);
        app.session.draft_mut().set_characteristic(0, "Reader");
        app.session.draft_mut().location = "Ely".into();
        app.submit();
        let ticket = app.take_pending_request().unwrap();
        let batch = SuggestionBatch {
            suggestions: names
                .iter()
                .map(|n| GiftSuggestion::new(*n, "why", None))
                .collect(),
            sources: vec![],
        };
        app.deliver(ticket.generation, Ok(batch));
        for _ in names {
            app.swipe(SwipeDirection::Right);
            for _ in 0..EXIT_TICKS {
                app.tick();
            }
        }
        app
    }

    #[test]
    fn delete_removes_selected() {
        let mut app = with_favourites(&["a", "b", "c"]);
        assert_eq!(app.view(), View::Favourites);
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, ch('d'));
        let names: Vec<&str> = app.session.favourites().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = with_favourites(&["a", "b"]);
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.favourites_cursor, 0);
        handle_key(&mut app, key(KeyCode::End));
        assert_eq!(app.favourites_cursor, 1);
    }

    fn opened_ok(_url: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn no_browser(_url: &str) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"))
    }

    #[test]
    fn o_opens_search_for_selected() {
        let mut app = with_favourites(&["Star map", "Tea set"]);
        app.opener = opened_ok;
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, ch('o'));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Opened a search for Tea set")
        );
        // The next key clears the message
        handle_key(&mut app, key(KeyCode::Up));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn failed_open_shows_the_link() {
        let mut app = with_favourites(&["Star map"]);
        app.opener = no_browser;
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Could not open a browser; search at https://www.google.com/search?q=Star%20map")
        );
    }

    #[test]
    fn open_with_no_favourites_does_nothing() {
        let mut app = App::new(Theme::default(), true, 2025);
        app.opener = no_browser;
        app.show_favourites();
        handle_key(&mut app, ch('o'));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn b_goes_back_to_form() {
        let mut app = with_favourites(&["a"]);
        handle_key(&mut app, ch('b'));
        assert_eq!(app.view(), View::Form);
    }
}
