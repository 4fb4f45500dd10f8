use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::model::GiftSuggestion;

/// Delimiter the plain-text fallback format uses between suggestions
pub const SUGGESTION_MARKER: &str = "###Suggestion";
/// Never show more than this many cards per request
pub const MAX_SUGGESTIONS: usize = 5;
/// Reason used when a plain-text block names a gift but gives no reason
pub const DEFAULT_REASON: &str = "No specific reason provided.";

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").unwrap());

/// What a strict JSON parse of the model text looked like
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedShape {
    /// `[{...}, {...}]`
    StructuredArray(Vec<Value>),
    /// `{"suggestions": [{...}]}`
    StructuredWrapped(Vec<Value>),
    /// `{"name": "...", "reason": "..."}`
    SingleObject(Value),
    /// Not JSON, or JSON of some other shape
    Unparseable,
}

impl ParsedShape {
    pub fn classify(text: &str) -> ParsedShape {
        let value: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "model text is not strict JSON");
                return ParsedShape::Unparseable;
            }
        };
        match value {
            Value::Array(items) => ParsedShape::StructuredArray(items),
            Value::Object(mut map) => {
                if let Some(Value::Array(items)) = map.remove("suggestions") {
                    ParsedShape::StructuredWrapped(items)
                } else if map.get("name").is_some_and(Value::is_string)
                    && map.get("reason").is_some_and(Value::is_string)
                {
                    ParsedShape::SingleObject(Value::Object(map))
                } else {
                    ParsedShape::Unparseable
                }
            }
            _ => ParsedShape::Unparseable,
        }
    }

    fn into_items(self) -> Vec<Value> {
        match self {
            ParsedShape::StructuredArray(items) | ParsedShape::StructuredWrapped(items) => items,
            ParsedShape::SingleObject(obj) => vec![obj],
            ParsedShape::Unparseable => Vec::new(),
        }
    }
}

/// Strip a surrounding ``` fence (with optional language tag), if any
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match FENCE_RE.captures(trimmed).and_then(|c| c.get(2)) {
        Some(inner) if !inner.as_str().is_empty() => inner.as_str().trim(),
        _ => trimmed,
    }
}

/// Turn one JSON element into a suggestion; items without string
/// `name` and `reason` are skipped.
fn suggestion_from_value(item: &Value) -> Option<GiftSuggestion> {
    let name = item.get("name")?.as_str()?;
    let reason = item.get("reason")?.as_str()?;
    let price = item.get("price").and_then(Value::as_str).map(str::to_string);
    Some(GiftSuggestion::new(name, reason, price))
}

fn parse_json_suggestions(text: &str) -> Vec<GiftSuggestion> {
    let items = ParsedShape::classify(text).into_items();
    let total = items.len();
    let suggestions: Vec<GiftSuggestion> = items.iter().filter_map(suggestion_from_value).collect();
    if suggestions.len() < total {
        debug!(
            dropped = total - suggestions.len(),
            kept = suggestions.len(),
            "dropped malformed suggestion entries"
        );
    }
    suggestions
}

/// Case-insensitive `label:` prefix match; returns the trimmed rest of the line
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(line[label.len()..].trim())
    } else {
        None
    }
}

/// Parse `###Suggestion` blocks with `Gift:` / `Reason:` / `Price:` lines
pub fn parse_marker_blocks(text: &str) -> Vec<GiftSuggestion> {
    let mut suggestions = Vec::new();

    for block in text.split(SUGGESTION_MARKER).skip(1) {
        let mut name: Option<&str> = None;
        let mut reason: Option<&str> = None;
        let mut price: Option<&str> = None;

        for line in block.lines() {
            let line = line.trim_start();
            if let Some(rest) = strip_label(line, "gift:") {
                name.get_or_insert(rest);
            } else if let Some(rest) = strip_label(line, "reason:") {
                reason.get_or_insert(rest);
            } else if let Some(rest) = strip_label(line, "price:") {
                price.get_or_insert(rest);
            }
        }

        let Some(name) = name.filter(|n| !n.is_empty()) else {
            debug!("skipping suggestion block without a gift name");
            continue;
        };
        let reason = reason.filter(|r| !r.is_empty()).unwrap_or(DEFAULT_REASON);
        let price = price.filter(|p| !p.is_empty()).map(str::to_string);
        suggestions.push(GiftSuggestion::new(name, reason, price));
    }

    suggestions
}

/// Parse raw model output into at most [`MAX_SUGGESTIONS`] suggestions.
///
/// JSON (bare or fenced) is tried first; if it yields nothing usable the
/// text is read as `###Suggestion` blocks instead. Never fails: unusable
/// output simply produces an empty list.
pub fn parse_suggestions(raw: &str) -> Vec<GiftSuggestion> {
    let text = raw.trim();
    let body = strip_code_fence(text);

    let mut suggestions = parse_json_suggestions(body);
    if suggestions.is_empty() {
        debug!("falling back to {} block parsing", SUGGESTION_MARKER);
        suggestions = parse_marker_blocks(text);
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn names(suggestions: &[GiftSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn bare_json_array() {
        let raw = r#"[
            {"name": "Trowel set", "reason": "Loves gardening", "price": "~£25"},
            {"name": "Seed subscription", "reason": "Year-round growing"}
        ]"#;
        let out = parse_suggestions(raw);
        assert_eq!(names(&out), vec!["Trowel set", "Seed subscription"]);
        assert_eq!(out[0].reason, "Loves gardening");
        assert_eq!(out[0].price.as_deref(), Some("~£25"));
        assert_eq!(out[1].price, None);
    }

    #[test]
    fn fenced_json_with_language_tag() {
        let raw = "```json\n[{\"name\": \"Kite\", \"reason\": \"Windy beach town\", \"price\": \"£30\"}]\n```";
        let out = parse_suggestions(raw);
        assert_eq!(names(&out), vec!["Kite"]);
    }

    #[test]
    fn fenced_json_without_language_tag() {
        let raw = "  ```\n{\"suggestions\": [{\"name\": \"Map\", \"reason\": \"Collects maps\"}]}\n```  ";
        let out = parse_suggestions(raw);
        assert_eq!(names(&out), vec!["Map"]);
    }

    #[test]
    fn wrapped_object_shape() {
        let raw = r#"{"suggestions": [{"name": "A", "reason": "a"}, {"name": "B", "reason": "b"}]}"#;
        assert_eq!(names(&parse_suggestions(raw)), vec!["A", "B"]);
    }

    #[test]
    fn single_object_shape() {
        let raw = r#"{"name": "Guitar lessons", "reason": "Learning guitar", "price": 40}"#;
        let out = parse_suggestions(raw);
        assert_eq!(names(&out), vec!["Guitar lessons"]);
        // Non-string price is dropped
        assert_eq!(out[0].price, None);
    }

    #[test]
    fn malformed_elements_are_dropped_in_order() {
        let raw = r#"[
            {"name": "One", "reason": "r1"},
            {"name": 2, "reason": "r2"},
            "just a string",
            {"reason": "no name"},
            {"name": "Five", "reason": "r5"}
        ]"#;
        assert_eq!(names(&parse_suggestions(raw)), vec!["One", "Five"]);
    }

    #[test]
    fn truncates_to_five_with_distinct_ids() {
        let items: Vec<String> = (1..=7)
            .map(|i| format!(r#"{{"name": "Gift {i}", "reason": "because {i}"}}"#))
            .collect();
        let raw = format!("[{}]", items.join(","));
        let out = parse_suggestions(&raw);
        assert_eq!(
            names(&out),
            vec!["Gift 1", "Gift 2", "Gift 3", "Gift 4", "Gift 5"]
        );
        let ids: HashSet<_> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn marker_blocks_fallback() {
        let raw = "\
Here are some ideas!
###Suggestion
Gift: Pottery class
Reason: Enjoys making things
Price: £45
###Suggestion
gift: Board game night kit
REASON: Loves hosting friends
price: ~£30
";
        let out = parse_suggestions(raw);
        assert_eq!(names(&out), vec!["Pottery class", "Board game night kit"]);
        assert_eq!(out[0].reason, "Enjoys making things");
        assert_eq!(out[0].price.as_deref(), Some("£45"));
        assert_eq!(out[1].reason, "Loves hosting friends");
        assert_eq!(out[1].price.as_deref(), Some("~£30"));
    }

    #[test]
    fn first_label_occurrence_wins() {
        let raw = "###Suggestion\nGift: First\nGift: Second\nReason: r\nReason: ignored\n";
        let out = parse_suggestions(raw);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "First");
        assert_eq!(out[0].reason, "r");
    }

    #[test]
    fn marker_block_defaults_and_skips() {
        let raw = "\
###Suggestion
Gift: Candle
###Suggestion
Reason: a block with no name
Price: £10
###Suggestion
Gift:
Reason: empty name
";
        let out = parse_suggestions(raw);
        assert_eq!(names(&out), vec!["Candle"]);
        assert_eq!(out[0].reason, DEFAULT_REASON);
        assert_eq!(out[0].price, None);
    }

    #[test]
    fn json_with_no_valid_items_falls_back() {
        let raw = r#"[{"title": "wrong keys"}]"#;
        assert!(parse_suggestions(raw).is_empty());

        // Valid JSON that has nothing usable, followed by nothing else, is empty
        assert!(parse_suggestions("{}").is_empty());
    }

    #[test]
    fn garbage_yields_empty() {
        assert!(parse_suggestions("").is_empty());
        assert!(parse_suggestions("Sorry, I can't help with that.").is_empty());
        assert!(parse_suggestions("```\n```").is_empty());
    }

    #[test]
    fn classify_shapes() {
        assert!(matches!(
            ParsedShape::classify("[]"),
            ParsedShape::StructuredArray(v) if v.is_empty()
        ));
        assert!(matches!(
            ParsedShape::classify(r#"{"suggestions": []}"#),
            ParsedShape::StructuredWrapped(_)
        ));
        assert!(matches!(
            ParsedShape::classify(r#"{"name": "x", "reason": "y"}"#),
            ParsedShape::SingleObject(_)
        ));
        assert_eq!(
            ParsedShape::classify(r#"{"name": "x"}"#),
            ParsedShape::Unparseable
        );
        assert_eq!(ParsedShape::classify("42"), ParsedShape::Unparseable);
        assert_eq!(ParsedShape::classify("not json"), ParsedShape::Unparseable);
    }

    #[test]
    fn strip_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence("  plain  "), "plain");
        assert_eq!(strip_code_fence("```js\n[1]\n```"), "[1]");
    }
}
