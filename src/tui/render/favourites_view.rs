use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::search_link::search_url;
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the favourites list. Each entry takes two rows: name and price, then the reason.
pub fn render_favourites_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let favourites = app.session.favourites();
    let width = area.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" My favourite ideas ({})", favourites.len()),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if favourites.is_empty() {
        lines.push(Line::from(Span::styled(
            " No favourites yet. Swipe right on an idea to save it here.",
            Style::default().fg(theme.dim).bg(bg),
        )));
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    // Bottom row links to a web search for the selected idea
    let (list_area, footer_area) = if area.height > 3 {
        let list = Rect {
            height: area.height - 1,
            ..area
        };
        let footer = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        (list, Some(footer))
    } else {
        (area, None)
    };

    let header_rows = lines.len();
    let rows_per_item = 3;
    let visible_items = (list_area.height as usize).saturating_sub(header_rows) / rows_per_item;
    let cursor = app.favourites_cursor.min(favourites.len() - 1);
    let scroll = if visible_items > 0 && cursor >= visible_items {
        cursor + 1 - visible_items
    } else {
        0
    };

    for (i, suggestion) in favourites.iter().enumerate().skip(scroll) {
        let selected = i == cursor;
        let row_bg = if selected { theme.selection_bg } else { bg };
        let marker = if selected { "\u{25B8} " } else { "  " };

        let price = suggestion
            .price
            .as_deref()
            .map(|p| format!("  {}", p))
            .unwrap_or_default();
        let name_width = width.saturating_sub(display_width(&price) + 2);
        let name = truncate_to_width(&suggestion.name, name_width);
        let pad = width.saturating_sub(2 + display_width(&name) + display_width(&price));

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", marker),
                Style::default().fg(theme.selection_border).bg(row_bg),
            ),
            Span::styled(
                name,
                Style::default()
                    .fg(theme.text_bright)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ".repeat(pad), Style::default().bg(row_bg)),
            Span::styled(price, Style::default().fg(theme.green).bg(row_bg)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", truncate_to_width(&suggestion.reason, width.saturating_sub(3))),
            Style::default().fg(theme.text).bg(bg),
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), list_area);

    if let (Some(footer), Some(selected)) = (footer_area, favourites.get_index(cursor)) {
        let label = " Find it (o): ";
        let url = search_url(&selected.name);
        let url_width = (footer.width as usize).saturating_sub(display_width(label));
        let footer_line = Line::from(vec![
            Span::styled(label, Style::default().fg(theme.dim).bg(bg)),
            Span::styled(
                truncate_to_width(&url, url_width),
                Style::default().fg(theme.cyan).bg(bg),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(footer_line).style(Style::default().bg(bg)),
            footer,
        );
    }
}
