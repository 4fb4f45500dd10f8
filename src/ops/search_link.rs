/// Web search the favourites view sends people to when they want to buy an idea
pub const SEARCH_BASE: &str = "https://www.google.com/search?q=";

/// Search URL for a gift name. The name is percent-encoded as a single
/// query component, so spaces become `%20` and `&`/`#` cannot break out.
pub fn search_url(name: &str) -> String {
    format!("{}{}", SEARCH_BASE, urlencoding::encode(name.trim()))
}
