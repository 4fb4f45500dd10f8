use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// The end of a string that fits in `max_cells`, with a leading `…` if
/// anything was cut. Used for text inputs, where the caret sits at the end.
pub fn tail_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".repeat(max_cells);
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut kept: Vec<&str> = Vec::new();
    for grapheme in s.graphemes(true).rev() {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        kept.push(grapheme);
    }
    let mut result = String::from("\u{2026}");
    result.extend(kept.into_iter().rev());
    result
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Remove the last grapheme cluster. Returns false on an empty string.
pub fn pop_grapheme(s: &mut String) -> bool {
    match prev_grapheme_boundary(s, s.len()) {
        Some(start) => {
            s.truncate(start);
            true
        }
        None => false,
    }
}

/// Word boundary to the left (grapheme-aware, whitespace-delimited).
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    if byte_offset == 0 {
        return 0;
    }
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    if graphemes.is_empty() {
        return 0;
    }

    let mut idx = graphemes.len() - 1;

    // Skip trailing whitespace
    while idx > 0 && graphemes[idx].1.chars().all(|c| c.is_whitespace()) {
        idx -= 1;
    }

    // Skip word characters
    while idx > 0 && !graphemes[idx - 1].1.chars().all(|c| c.is_whitespace()) {
        idx -= 1;
    }

    graphemes[idx].0
}
