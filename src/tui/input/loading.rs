use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_loading(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => app.cancel(),
        // Also covers Ctrl+F
        KeyCode::F(2) | KeyCode::Char('f') => app.show_favourites(),
        _ => {}
    }
}
