use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::session::View;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the title row with the favourites counter, and a separator below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // separator
        ])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = chunks[0].width as usize;

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25C6}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            " giftdeck",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  gift ideas, grounded in search",
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];

    let favourites = format!(
        "\u{2606} Favourites ({}) ",
        app.session.favourites().len()
    );
    let favourites_style = if app.view() == View::Favourites {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.highlight).bg(bg)
    };

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let fav_width = display_width(&favourites);
    if used + fav_width < width {
        spans.push(Span::styled(" ".repeat(width - used - fav_width), bg_style));
        spans.push(Span::styled(favourites, favourites_style));
    } else if fav_width <= width {
        // Narrow terminal: the counter matters more than the tagline
        spans.truncate(3);
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        spans.push(Span::styled(
            " ".repeat(width.saturating_sub(used + fav_width)),
            bg_style,
        ));
        spans.push(Span::styled(favourites, favourites_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let separator = "\u{2500}".repeat(chunks[1].width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(
            separator,
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        chunks[1],
    );
}
