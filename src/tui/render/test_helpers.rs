use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{GiftSuggestion, GroundingSource, SuggestionBatch};
use crate::tui::app::App;
use crate::tui::gesture::{EXIT_TICKS, SwipeDirection};
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A fresh app on the form
pub fn test_app() -> App {
    App::new(Theme::default(), true, 2025)
}

/// An app whose form passes validation
pub fn filled_app() -> App {
    let mut app = test_app();
    let draft = app.session.draft_mut();
    draft.set_characteristic(0, "Loves astronomy");
    draft.location = "Brighton".into();
    app
}

/// An app that submitted and is waiting for the model
pub fn loading_app() -> App {
    let mut app = filled_app();
    app.submit();
    app
}

fn batch(items: &[(&str, &str, Option<&str>)], sources: Vec<GroundingSource>) -> SuggestionBatch {
    SuggestionBatch {
        suggestions: items
            .iter()
            .map(|(name, reason, price)| {
                GiftSuggestion::new(*name, *reason, price.map(str::to_string))
            })
            .collect(),
        sources,
    }
}

/// An app showing the given suggestions
pub fn app_with_suggestions(items: &[(&str, &str, Option<&str>)]) -> App {
    app_with_batch(batch(items, vec![]))
}

pub fn app_with_batch_and_sources(
    items: &[(&str, &str, Option<&str>)],
    sources: &[(&str, &str)],
) -> App {
    let sources = sources
        .iter()
        .map(|(title, uri)| GroundingSource {
            uri: uri.to_string(),
            title: title.to_string(),
        })
        .collect();
    app_with_batch(batch(items, sources))
}

fn app_with_batch(batch: SuggestionBatch) -> App {
    let mut app = loading_app();
    let ticket = app.take_pending_request().unwrap();
    app.deliver(ticket.generation, Ok(batch));
    app
}

/// An app on the favourites view holding the given suggestions
pub fn app_with_favourites(items: &[(&str, &str, Option<&str>)]) -> App {
    let mut app = app_with_suggestions(items);
    for _ in items {
        app.swipe(SwipeDirection::Right);
        for _ in 0..EXIT_TICKS {
            app.tick();
        }
    }
    app
}
