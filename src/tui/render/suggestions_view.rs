use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::model::GiftSuggestion;
use crate::tui::app::App;
use crate::tui::gesture::SwipeDirection;
use crate::util::unicode::truncate_to_width;

const MAX_CARD_WIDTH: u16 = 60;
const CARD_HEIGHT: u16 = 11;

/// Render the top suggestion as a swipeable card, with sources underneath
pub fn render_suggestions_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.card_area = None;
    let bg = app.theme.background;
    let card_height = CARD_HEIGHT.min(area.height);
    let mut y = area.y + 1.min(area.height);

    if let Some(head) = app.session.queue().head() {
        let card_width = MAX_CARD_WIDTH.min(area.width.saturating_sub(4)).max(10);
        let home_x = area.x as i32 + (area.width.saturating_sub(card_width) / 2) as i32;
        let x = home_x + app.gesture.offset();

        // Clip the displaced card to the content area
        let left = x.max(area.x as i32);
        let right = (x + card_width as i32).min((area.x + area.width) as i32);
        if right > left {
            let card = Rect {
                x: left as u16,
                y,
                width: (right - left) as u16,
                height: card_height.min(area.y + area.height - y),
            };
            render_card(frame, app, head, card);
            app.card_area = Some(card);
        }
        y = y.saturating_add(card_height);

        let hints = Line::from(vec![
            Span::styled("\u{2190} / h", Style::default().fg(app.theme.dismiss).bg(bg)),
            Span::styled(" not for them     ", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled("\u{2192} / l", Style::default().fg(app.theme.favourite).bg(bg)),
            Span::styled(" favourite", Style::default().fg(app.theme.dim).bg(bg)),
        ]);
        if y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(hints).alignment(Alignment::Center),
                Rect {
                    x: area.x,
                    y,
                    width: area.width,
                    height: 1,
                },
            );
            y += 2;
        }
    } else {
        let msg = Line::from(Span::styled(
            "That's every idea in this batch. Press f for favourites or Esc for a new search.",
            Style::default().fg(app.theme.text).bg(bg),
        ));
        frame.render_widget(
            Paragraph::new(msg)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 2.min(area.y + area.height - y),
            },
        );
        y = y.saturating_add(3);
    }

    if y < area.y + area.height {
        render_sources(
            frame,
            app,
            Rect {
                x: area.x + 2.min(area.width),
                y,
                width: area.width.saturating_sub(4),
                height: area.y + area.height - y,
            },
        );
    }
}

fn render_card(frame: &mut Frame, app: &App, suggestion: &GiftSuggestion, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let border_color = match app.gesture.lean() {
        Some(SwipeDirection::Left) => theme.dismiss,
        Some(SwipeDirection::Right) => theme.favourite,
        None => theme.selection_border,
    };
    let remaining = app.session.queue().len();
    let title = format!(
        " {} idea{} left ",
        remaining,
        if remaining == 1 { "" } else { "s" }
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(title, Style::default().fg(theme.dim).bg(bg)))
        .style(Style::default().bg(bg));

    let price = match &suggestion.price {
        Some(price) => Line::from(vec![
            Span::styled("Price: ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(price.clone(), Style::default().fg(theme.green).bg(bg)),
        ]),
        None => Line::from(Span::styled(
            "Price: not given",
            Style::default().fg(theme.dim).bg(bg),
        )),
    };

    let lines = vec![
        Line::from(Span::styled(
            suggestion.name.clone(),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            suggestion.reason.clone(),
            Style::default().fg(theme.text).bg(bg),
        )),
        Line::from(""),
        price,
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_sources(frame: &mut Frame, app: &App, area: Rect) {
    let sources = app.session.sources();
    if sources.is_empty() || area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let mut lines = vec![Line::from(Span::styled(
        "Sources",
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))];
    for source in sources.iter().take(area.height.saturating_sub(1) as usize) {
        let title = truncate_to_width(&source.title, width.saturating_sub(4) / 2);
        let used = title.chars().count() + 4;
        let uri = truncate_to_width(&source.uri, width.saturating_sub(used));
        lines.push(Line::from(vec![
            Span::styled("\u{2022} ", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(title, Style::default().fg(theme.text).bg(bg)),
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(uri, Style::default().fg(theme.cyan).bg(bg)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
