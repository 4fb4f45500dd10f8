use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::app::App;

const SPINNER: [&str; 10] = [
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280F}",
];

/// Render the waiting screen, or the outcome of a request that produced nothing
pub fn render_loading_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let dim = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    // Roughly center the block vertically
    let top_pad = area.height.saturating_sub(8) / 2;
    for _ in 0..top_pad {
        lines.push(Line::from(""));
    }

    match app.session.notice() {
        Some(notice) => {
            let (title, color) = if notice.is_error() {
                ("Something went wrong", theme.red)
            } else {
                ("No ideas this time", theme.yellow)
            };
            lines.push(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(color)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notice.message().to_string(),
                Style::default().fg(theme.text).bg(bg),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Esc or Enter: back to the form",
                dim,
            )));
        }
        None => {
            let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
            lines.push(Line::from(vec![
                Span::styled(spinner, Style::default().fg(theme.highlight).bg(bg)),
                Span::styled(
                    " Esme is searching for gift ideas...",
                    Style::default()
                        .fg(theme.text_bright)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "When they arrive, swipe through them:",
                Style::default().fg(theme.text).bg(bg),
            )));
            lines.push(Line::from(vec![
                Span::styled("\u{2190} / h", Style::default().fg(theme.dismiss).bg(bg)),
                Span::styled("  not for them     ", dim),
                Span::styled("\u{2192} / l", Style::default().fg(theme.favourite).bg(bg)),
                Span::styled("  save to favourites", dim),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Esc: cancel", dim)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
