mod favourites;
mod form;
mod loading;
mod suggestions;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::ops::session::View;

use super::app::App;

/// Handle a key event in the current view
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    app.status_message = None;

    // Help overlay swallows the next key
    if app.show_help {
        app.show_help = false;
        return;
    }

    let typing = app.view() == View::Form && app.focus.is_text();
    if !typing {
        match key.code {
            KeyCode::Char('?') => {
                app.show_help = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                app.should_quit = true;
                return;
            }
            _ => {}
        }
    }

    match app.view() {
        View::Form => form::handle_form(app, key),
        View::Loading => loading::handle_loading(app, key),
        View::Suggestions => suggestions::handle_suggestions(app, key),
        View::Favourites => favourites::handle_favourites(app, key),
    }
}

/// Handle a mouse event: budget slider drags on the form, card swipes on suggestions
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        return;
    }
    match app.view() {
        View::Form => form::handle_form_mouse(app, mouse),
        View::Suggestions => suggestions::handle_card_mouse(app, mouse),
        View::Loading | View::Favourites => {}
    }
}
