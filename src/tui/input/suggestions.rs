use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::App;
use crate::tui::gesture::SwipeDirection;

pub(super) fn handle_suggestions(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('x') => {
            app.swipe(SwipeDirection::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('s') => {
            app.swipe(SwipeDirection::Right)
        }
        KeyCode::Char('f') | KeyCode::F(2) => app.show_favourites(),
        KeyCode::Esc | KeyCode::Char('b') => app.back_to_form(),
        _ => {}
    }
}

pub(super) fn handle_card_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let on_card = app.card_area.is_some_and(|area| {
                mouse.column >= area.x
                    && mouse.column < area.x + area.width
                    && mouse.row >= area.y
                    && mouse.row < area.y + area.height
            });
            if on_card {
                app.gesture.begin(mouse.column);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => app.gesture.drag_to(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => app.end_card_drag(),
        _ => {}
    }
}
