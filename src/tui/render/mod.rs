pub mod favourites_view;
pub mod form_view;
pub mod header;
pub mod help_overlay;
pub mod loading_view;
pub mod status_row;
pub mod suggestions_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::ops::session::View;

use super::app::App;

/// Main render function; dispatches to the view renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    match app.view() {
        View::Form => form_view::render_form_view(frame, app, chunks[1]),
        View::Loading => loading_view::render_loading_view(frame, app, chunks[1]),
        View::Suggestions => suggestions_view::render_suggestions_view(frame, app, chunks[1]),
        View::Favourites => favourites_view::render_favourites_view(frame, app, chunks[1]),
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn full_screen_form() {
        let mut app = test_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("giftdeck"));
        assert!(output.contains("Favourites (0)"));
        assert!(output.contains("Tell us about them"));
        assert!(app.slider_geometry.is_some());
        assert!(app.card_area.is_none());
    }

    #[test]
    fn full_screen_suggestions_records_card_area() {
        let mut app = app_with_suggestions(&[("Telescope", "Loves stars", Some("£120"))]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Telescope"));
        assert!(app.card_area.is_some());
        assert!(app.slider_geometry.is_none());
    }
}
