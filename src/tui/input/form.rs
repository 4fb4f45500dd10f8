use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::model::Thumb;
use crate::tui::app::{App, FormFocus};
use crate::util::unicode::{pop_grapheme, word_boundary_left};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Tab) | (_, KeyCode::Down) => app.focus_next(),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => app.focus_prev(),
        (_, KeyCode::Enter) => app.submit(),
        (_, KeyCode::F(2)) => app.show_favourites(),
        (m, KeyCode::Char('f')) if m.contains(KeyModifiers::CONTROL) => app.show_favourites(),
        (m, KeyCode::Char('n')) if m.contains(KeyModifiers::CONTROL) => app.add_characteristic(),
        (m, KeyCode::Char('d')) if m.contains(KeyModifiers::CONTROL) => {
            app.remove_characteristic()
        }
        (_, KeyCode::Esc) => app.release_drag(),
        _ => match app.focus {
            FormFocus::Gender => handle_gender(app, key),
            FormFocus::Budget => handle_budget(app, key),
            FormFocus::Submit => {
                if key.code == KeyCode::Char(' ') {
                    app.submit();
                }
            }
            _ => handle_text(app, key),
        },
    }
}

fn handle_gender(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.cycle_gender(false),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => app.cycle_gender(true),
        _ => {}
    }
}

fn handle_budget(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.step_budget(-1),
        KeyCode::Right | KeyCode::Char('l') => app.step_budget(1),
        KeyCode::PageDown => app.step_budget(-10),
        KeyCode::PageUp => app.step_budget(10),
        KeyCode::Char('[') => app.active_thumb = Thumb::Min,
        KeyCode::Char(']') => app.active_thumb = Thumb::Max,
        _ => {}
    }
}

/// Caret is always at the end of the field
fn handle_text(app: &mut App, key: KeyEvent) {
    let Some(current) = app.focused_text().map(str::to_string) else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Backspace) => {
            let mut text = current;
            if pop_grapheme(&mut text) {
                app.set_focused_text(text);
            }
        }
        // Delete the previous word
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            let cut = word_boundary_left(&current, current.len());
            app.set_focused_text(current[..cut].to_string());
        }
        // Clear the field
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.set_focused_text(String::new());
        }
        (m, KeyCode::Char(c))
            if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
        {
            let mut text = current;
            text.push(c);
            app.set_focused_text(text);
        }
        _ => {}
    }
}

pub(super) fn handle_form_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.begin_budget_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => app.update_budget_drag(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => app.release_drag(),
        _ => {}
    }
}
