use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{
    CHARACTERISTIC_CHAR_LIMIT, Field, MAX_BUDGET, MAX_CHARACTERISTICS, MIN_BUDGET, Thumb,
};
use crate::tui::app::{App, FormFocus};
use crate::tui::slider::SliderGeometry;
use crate::util::unicode::{display_width, tail_to_width};

const MARGIN: u16 = 2;
const LABEL_WIDTH: u16 = 16;
const MAX_INPUT_WIDTH: usize = 44;
const MAX_SLIDER_WIDTH: u16 = 50;

const CHARACTERISTIC_HINTS: [&str; MAX_CHARACTERISTICS] = [
    "e.g. Loves hiking and the outdoors",
    "e.g. Big sci-fi fan",
    "e.g. Enjoys cooking Italian food",
    "e.g. Just started learning guitar",
    "e.g. Always cold",
];

/// Lines of the form, plus where the focused control and the slider ended up
struct FormLines<'a> {
    lines: Vec<Line<'a>>,
    focus_line: usize,
    slider_line: usize,
}

/// Render the recipient form
pub fn render_form_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.slider_geometry = None;
    let inner = Rect {
        x: area.x + MARGIN.min(area.width),
        y: area.y,
        width: area.width.saturating_sub(MARGIN * 2),
        height: area.height,
    };
    let slider_width = inner
        .width
        .saturating_sub(LABEL_WIDTH)
        .min(MAX_SLIDER_WIDTH);
    let input_width = (inner.width.saturating_sub(LABEL_WIDTH + 2) as usize).min(MAX_INPUT_WIDTH);

    let form = build_lines(app, input_width, slider_width);

    // Keep the focused control on screen
    let height = inner.height as usize;
    let scroll = if height > 0 && form.focus_line + 2 > height {
        form.focus_line + 2 - height
    } else {
        0
    };

    if slider_width > 1 && form.slider_line >= scroll && form.slider_line - scroll < height {
        app.slider_geometry = Some(SliderGeometry {
            row: inner.y + (form.slider_line - scroll) as u16,
            left: inner.x + LABEL_WIDTH,
            width: slider_width,
        });
    }

    let paragraph = Paragraph::new(form.lines)
        .style(Style::default().bg(app.theme.background))
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn build_lines<'a>(app: &App, input_width: usize, slider_width: u16) -> FormLines<'a> {
    let theme = &app.theme;
    let bg = theme.background;
    let draft = app.session.draft();
    let header_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let mut focus_line = 0;

    lines.push(Line::from(Span::styled("Tell us about them", header_style)));
    lines.push(Line::from(Span::styled(
        "Esme will search the web for gift ideas that fit.",
        dim,
    )));
    lines.push(Line::from(""));

    let count = draft.characteristics.len();
    let add_hint = if count < MAX_CHARACTERISTICS {
        "  Ctrl+N adds another"
    } else {
        ""
    };
    lines.push(Line::from(vec![
        Span::styled("Details about them", header_style),
        Span::styled(add_hint, dim),
    ]));

    for (i, value) in draft.characteristics.iter().enumerate() {
        let focus = FormFocus::Characteristic(i);
        if app.focus == focus {
            focus_line = lines.len();
        }
        let label = format!("  Detail #{}", i + 1);
        let counter = if app.focus == focus {
            format!(" {}/{}", value.chars().count(), CHARACTERISTIC_CHAR_LIMIT)
        } else {
            String::new()
        };
        let mut spans = label_spans(app, label, focus);
        spans.extend(input_spans(
            app,
            value,
            CHARACTERISTIC_HINTS[i.min(MAX_CHARACTERISTICS - 1)],
            focus,
            input_width,
        ));
        spans.push(Span::styled(counter, dim));
        lines.push(Line::from(spans));
        push_error(app, &mut lines, Field::Characteristic(i));
    }
    lines.push(Line::from(""));

    // Gender selector
    if app.focus == FormFocus::Gender {
        focus_line = lines.len();
    }
    let mut spans = label_spans(app, "Gender".to_string(), FormFocus::Gender);
    let selected = app.focus == FormFocus::Gender;
    spans.push(Span::styled(
        if selected { "\u{2039} " } else { "  " },
        Style::default().fg(theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(
        draft.gender.label().to_string(),
        value_style(app, selected),
    ));
    spans.push(Span::styled(
        if selected { " \u{203A}" } else { "" },
        Style::default().fg(theme.highlight).bg(bg),
    ));
    lines.push(Line::from(spans));

    // Birth year
    if app.focus == FormFocus::BirthYear {
        focus_line = lines.len();
    }
    let mut spans = label_spans(app, "Birth year".to_string(), FormFocus::BirthYear);
    spans.extend(input_spans(
        app,
        &draft.birth_year,
        "optional, e.g. 1990",
        FormFocus::BirthYear,
        input_width.min(24),
    ));
    lines.push(Line::from(spans));
    push_error(app, &mut lines, Field::BirthYear);

    // Location
    if app.focus == FormFocus::Location {
        focus_line = lines.len();
    }
    let mut spans = label_spans(app, "Location".to_string(), FormFocus::Location);
    spans.extend(input_spans(
        app,
        &draft.location,
        "e.g. London, UK",
        FormFocus::Location,
        input_width,
    ));
    lines.push(Line::from(spans));
    push_error(app, &mut lines, Field::Location);

    // Budget: description row, then the slider track
    if app.focus == FormFocus::Budget {
        focus_line = lines.len() + 1;
    }
    let mut spans = label_spans(app, "Budget (GBP)".to_string(), FormFocus::Budget);
    spans.push(Span::styled(
        draft.budget.describe(),
        value_style(app, app.focus == FormFocus::Budget),
    ));
    if app.focus == FormFocus::Budget {
        let thumb = match app.active_thumb {
            Thumb::Min => "  moving min  ([ ] to switch)",
            Thumb::Max => "  moving max  ([ ] to switch)",
        };
        spans.push(Span::styled(thumb, dim));
    }
    lines.push(Line::from(spans));
    let slider_line = lines.len();
    lines.push(slider_track(app, slider_width));
    push_error(app, &mut lines, Field::Budget);

    // Occasion
    if app.focus == FormFocus::Occasion {
        focus_line = lines.len();
    }
    let mut spans = label_spans(app, "Occasion".to_string(), FormFocus::Occasion);
    spans.extend(input_spans(
        app,
        &draft.occasion,
        "optional, e.g. Birthday",
        FormFocus::Occasion,
        input_width,
    ));
    lines.push(Line::from(spans));
    lines.push(Line::from(""));

    // Submit button
    if app.focus == FormFocus::Submit {
        focus_line = lines.len();
    }
    let button_style = if app.focus == FormFocus::Submit {
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(" ".repeat(LABEL_WIDTH as usize), Style::default().bg(bg)),
        Span::styled("[ Find gift ideas ]", button_style),
        Span::styled("  Enter", dim),
    ]));

    FormLines {
        lines,
        focus_line,
        slider_line,
    }
}

fn label_spans<'a>(app: &App, label: String, focus: FormFocus) -> Vec<Span<'a>> {
    let focused = app.focus == focus;
    let style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    };
    vec![Span::styled(
        format!("{:<width$}", label, width = LABEL_WIDTH as usize),
        style,
    )]
}

fn value_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
    } else {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
    }
}

/// A text input: value (or dim placeholder), with a caret when focused
fn input_spans<'a>(
    app: &App,
    value: &str,
    placeholder: &'a str,
    focus: FormFocus,
    width: usize,
) -> Vec<Span<'a>> {
    let focused = app.focus == focus;
    let bg = if focused {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let mut spans = Vec::new();
    if value.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        return spans;
    }
    // Leave a cell for the caret
    let shown = tail_to_width(value, width.saturating_sub(1));
    let used = display_width(&shown);
    spans.push(Span::styled(shown, value_style(app, focused)));
    if focused {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        let pad = width.saturating_sub(used + 1);
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    }
    spans
}

fn push_error<'a>(app: &App, lines: &mut Vec<Line<'a>>, field: Field) {
    if let Some(message) = app.form_errors.get(field) {
        lines.push(Line::from(vec![
            Span::styled(
                " ".repeat(LABEL_WIDTH as usize),
                Style::default().bg(app.theme.background),
            ),
            Span::styled(
                format!("! {}", message),
                Style::default().fg(app.theme.red).bg(app.theme.background),
            ),
        ]));
    }
}

/// `●━━━━●───` style track for the budget range
fn slider_track<'a>(app: &App, width: u16) -> Line<'a> {
    let theme = &app.theme;
    let bg = theme.background;
    let mut spans = vec![Span::styled(
        " ".repeat(LABEL_WIDTH as usize),
        Style::default().bg(bg),
    )];
    if width < 2 {
        return Line::from(spans);
    }
    let geometry = SliderGeometry {
        row: 0,
        left: 0,
        width,
    };
    let budget = app.session.draft().budget;
    let min_col = geometry.value_to_col(budget.min);
    let max_col = geometry.value_to_col(budget.max);
    let focused = app.focus == FormFocus::Budget;

    for col in 0..width {
        let is_min = col == min_col;
        let is_max = col == max_col;
        let (symbol, style) = if is_min || is_max {
            let active = focused
                && ((is_min && app.active_thumb == Thumb::Min)
                    || (is_max && app.active_thumb == Thumb::Max));
            let style = if active {
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.highlight).bg(bg)
            };
            ("\u{25CF}", style)
        } else if col > min_col && col < max_col {
            ("\u{2501}", Style::default().fg(theme.highlight).bg(bg))
        } else {
            ("\u{2500}", Style::default().fg(theme.dim).bg(bg))
        };
        spans.push(Span::styled(symbol, style));
    }
    spans.push(Span::styled(
        format!("  \u{00A3}{}-\u{00A3}{}+", MIN_BUDGET, MAX_BUDGET),
        Style::default().fg(theme.dim).bg(bg),
    ));
    Line::from(spans)
}
