use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::session::View;
use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let text_color = app.theme.text;
    let bright = app.theme.text_bright;
    let highlight = app.theme.highlight;
    let dim = app.theme.dim;

    let key_style = Style::default()
        .fg(highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(text_color).bg(bg);
    let header_style = Style::default()
        .fg(bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    match app.view() {
        View::Form => {
            lines.push(Line::from(Span::styled(" Profile form", header_style)));
            add_binding(&mut lines, " Tab/\u{2193}", "Next field", key_style, desc_style);
            add_binding(&mut lines, " S-Tab/\u{2191}", "Previous field", key_style, desc_style);
            add_binding(&mut lines, " Enter", "Find gift ideas", key_style, desc_style);
            add_binding(
                &mut lines,
                " Ctrl+N",
                "Add a characteristic",
                key_style,
                desc_style,
            );
            add_binding(
                &mut lines,
                " Ctrl+D",
                "Remove the focused characteristic",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " Ctrl+W", "Delete word", key_style, desc_style);
            add_binding(&mut lines, " Ctrl+U", "Clear field", key_style, desc_style);
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled(" Gender and budget", header_style)));
            add_binding(
                &mut lines,
                " \u{2190}\u{2192}/hl",
                "Change choice / move thumb",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " [ ]", "Pick min or max thumb", key_style, desc_style);
            add_binding(&mut lines, " PgUp/PgDn", "Move thumb further", key_style, desc_style);
            add_binding(&mut lines, " Mouse", "Drag a thumb", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Loading => {
            lines.push(Line::from(Span::styled(" Searching", header_style)));
            add_binding(&mut lines, " Esc", "Cancel, back to the form", key_style, desc_style);
            add_binding(&mut lines, " f", "Favourites", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Suggestions => {
            lines.push(Line::from(Span::styled(" Gift ideas", header_style)));
            add_binding(&mut lines, " \u{2190}/h/x", "Pass on this idea", key_style, desc_style);
            add_binding(&mut lines, " \u{2192}/l/s", "Save to favourites", key_style, desc_style);
            add_binding(&mut lines, " Mouse", "Drag the card sideways", key_style, desc_style);
            add_binding(&mut lines, " f", "Favourites", key_style, desc_style);
            add_binding(&mut lines, " Esc/b", "New search", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Favourites => {
            lines.push(Line::from(Span::styled(" Favourites", header_style)));
            add_binding(
                &mut lines,
                " \u{2191}\u{2193}/jk",
                "Move cursor",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
            add_binding(&mut lines, " o/Enter", "Search the web for it", key_style, desc_style);
            add_binding(&mut lines, " d/Del", "Remove from favourites", key_style, desc_style);
            add_binding(&mut lines, " Esc/b", "Back to the form", key_style, desc_style);
            lines.push(Line::from(""));
        }
    }

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " F2", "Favourites", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit (outside text fields)", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+C", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
