use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::session::View;
use crate::tui::app::{App, FormFocus};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();

    // Left side: what is going on right now
    if let Some(status) = status_text(app) {
        spans.push(Span::styled(
            format!(" {}", status),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = key_hint(app);
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn status_text(app: &App) -> Option<String> {
    if let Some(message) = &app.status_message {
        return Some(message.clone());
    }
    match app.view() {
        View::Form if !app.form_errors.is_empty() => Some(format!(
            "{} field(s) need attention",
            app.form_errors.len()
        )),
        View::Suggestions => {
            let left = app.session.queue().len();
            Some(format!(
                "{} of this batch left, {} saved",
                left,
                app.session.favourites().len()
            ))
        }
        _ => None,
    }
}

fn key_hint(app: &App) -> &'static str {
    match app.view() {
        View::Form => match app.focus {
            FormFocus::Gender => "\u{2190}\u{2192} choose  Tab next  ? help",
            FormFocus::Budget => "\u{2190}\u{2192} adjust  [ ] thumb  Tab next  ? help",
            FormFocus::Submit => "Enter find ideas  F2 favourites  ? help",
            _ => "Tab next  Enter find ideas  F2 favourites",
        },
        View::Loading if app.session.is_loading() => "Esc cancel  f favourites",
        View::Loading => "Esc back to form",
        View::Suggestions => "\u{2190} pass  \u{2192} save  f favourites  Esc form",
        View::Favourites => "\u{2191}\u{2193} move  o search  d remove  Esc form",
    }
}
