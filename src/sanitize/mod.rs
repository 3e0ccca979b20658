//! HTML and noise removal for news snippets.
//!
//! Feeds arrive as a mix of markup, tracking links and publisher boilerplate.
//! [`clean`] turns that into a single line of plain text that is worth
//! sending to a translation provider, or an empty string when nothing useful
//! is left.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::{Result, TranslateError};
use crate::metrics;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node, Selector};
use tracing::debug;

/// Cleaned text shorter than this is not worth translating.
pub const MIN_CLEAN_CHARS: usize = 10;

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

static BODY: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("body").ok());

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script block pattern")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("url pattern"));
static SHORT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:bit\.ly|t\.co|goo\.gl|tinyurl\.com|ow\.ly|buff\.ly|is\.gd|dlvr\.it|lnkd\.in|rebrand\.ly)/\S*",
    )
    .expect("short link pattern")
});
static TRACKING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[?&](?:utm_[a-z]+|source|ref)=[^\s&]*").expect("tracking pattern")
});
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:read more|continue reading|click here|rsvp)\s*:")
        .expect("boilerplate pattern")
});
static ELLIPSIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*(?:…|\.{3})\s*\]|\[\+\d+ chars\]|…|\.{3,}").expect("ellipsis pattern")
});

/// Strip markup and noise from `raw`.
///
/// Returns an empty string when fewer than [`MIN_CLEAN_CHARS`] characters
/// survive. Never fails: a document the DOM pass can't make sense of is
/// handled by a plain tag-stripping regex instead.
pub fn clean(raw: &str) -> String {
    let text = normalize(raw);
    if text.chars().count() < MIN_CLEAN_CHARS {
        return String::new();
    }
    text
}

/// [`clean`] without the minimum length, for short fields such as headlines.
pub fn normalize(raw: &str) -> String {
    // Each pass decodes one level of entities, and decoded text may form new
    // markup or noise ("&amp;lt;b&amp;gt;", "Read Read more: more:"). Every
    // pass that changes anything shortens the text.
    let mut current = single_pass(raw);
    for _ in 0..MAX_EXTRA_PASSES {
        let next = single_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

const MAX_EXTRA_PASSES: usize = 8;

fn single_pass(raw: &str) -> String {
    let text = match extract_dom_text(raw) {
        Ok(text) => text,
        Err(e) => {
            debug!("{}, falling back to regex tag stripping", e);
            metrics::record_sanitizer_fallback();
            strip_tags(raw)
        }
    };

    let truncated = match text.find('|') {
        Some(pos) => &text[..pos],
        None => text.as_str(),
    };

    strip_noise(truncated)
}

/// Visible body text of an HTML document, block elements separated by spaces.
fn extract_dom_text(html: &str) -> Result<String> {
    let selector = BODY
        .as_ref()
        .ok_or_else(|| TranslateError::Sanitization("body selector unavailable".to_string()))?;

    let document = Html::parse_document(html);
    let body = document
        .select(selector)
        .next()
        .ok_or_else(|| TranslateError::Sanitization("document has no body".to_string()))?;

    let mut out = String::with_capacity(html.len());
    for node in body.descendants() {
        match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
                });
                if !hidden {
                    out.push_str(&**text);
                }
            }
            Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => out.push(' '),
            _ => {}
        }
    }

    if out.trim().is_empty() && !strip_tags(html).trim().is_empty() {
        return Err(TranslateError::Sanitization(
            "markup produced no visible text".to_string(),
        ));
    }

    Ok(out)
}

/// Naive markup removal used when the DOM pass fails. Entities are left
/// alone; the next DOM pass decodes them.
fn strip_tags(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(html, " ");
    TAG.replace_all(&without_scripts, " ").into_owned()
}

fn strip_noise(text: &str) -> String {
    let text = URL.replace_all(text, " ");
    let text = SHORT_LINK.replace_all(&text, " ");
    let text = TRACKING.replace_all(&text, " ");
    let text = BOILERPLATE.replace_all(&text, " ");
    let text = ELLIPSIS.replace_all(&text, " ");
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markup_and_scripts() {
        let html = r#"<html><head><style>p { color: red }</style></head>
            <body><p>Bitcoin climbs <b>above</b> resistance</p>
            <script>track("view")</script><p>Analysts expect more</p></body></html>"#;
        assert_eq!(
            clean(html),
            "Bitcoin climbs above resistance Analysts expect more"
        );
    }

    #[test]
    fn test_inline_elements_do_not_split_words() {
        assert_eq!(clean("<p>Ethe<i>reum</i> upgrade ships</p>"), "Ethereum upgrade ships");
    }

    #[test]
    fn test_truncates_at_pipe() {
        assert_eq!(
            clean("Markets rally on rate cut hopes | Example News"),
            "Markets rally on rate cut hopes"
        );
    }

    #[test]
    fn test_strips_urls_and_tracking() {
        let text = "Full story at https://example.com/a?b=1 and www.example.org/x \
                    or bit.ly/3abc today ?utm_source=feed&ref=home";
        assert_eq!(clean(text), "Full story at and or today");
    }

    #[test]
    fn test_strips_boilerplate_and_ellipsis() {
        let text = "The exchange paused withdrawals… Read more: [+1234 chars] RSVP: now [...]";
        assert_eq!(clean(text), "The exchange paused withdrawals now");
    }

    #[test]
    fn test_short_result_is_empty() {
        assert_eq!(clean("<p>Hi there</p>"), "");
        assert_eq!(clean("   "), "");
        assert_eq!(clean("https://example.com/only-a-link"), "");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(clean("<p>Profits &amp; losses reported</p>"), "Profits & losses reported");
    }

    #[test]
    fn test_script_only_document_is_empty() {
        // Script content never counts as visible text
        assert_eq!(clean("<script>var tracking = 'abcdefghijk';</script>"), "");
    }

    #[test]
    fn test_head_only_text_uses_regex_fallback() {
        // html5ever puts a bare <title> into <head>, leaving the body empty
        assert_eq!(
            clean("<title>Central bank raises rates</title>"),
            "Central bank raises rates"
        );
    }

    #[test]
    fn test_strip_tags_fallback() {
        let stripped = strip_tags("<div>Hello <script>x()</script><b>world</b></div>");
        assert_eq!(collapse_whitespace(&stripped), "Hello world");
    }

    #[test]
    fn test_fallback_text_has_entities_decoded() {
        assert_eq!(
            clean("<title>Profits &amp; losses soar</title>"),
            "Profits & losses soar"
        );
    }

    #[test]
    fn test_nested_entities_are_fully_decoded() {
        let once = clean("Rates &amp;lt; expected in the report");
        assert_eq!(once, "Rates < expected in the report");
        assert_eq!(clean(&once), once);

        // Escaped markup is removed once decoded
        assert_eq!(
            clean("&lt;b&gt;Bitcoin&lt;/b&gt; rallies past resistance"),
            "Bitcoin rallies past resistance"
        );
    }

    #[test]
    fn test_normalize_keeps_short_text() {
        assert_eq!(normalize("<b>Fed hikes</b> | Wire"), "Fed hikes");
        assert_eq!(clean("<b>Fed hikes</b> | Wire"), "");
    }

    #[test]
    fn test_exposed_pattern_is_removed() {
        assert_eq!(
            clean("Markets Read Read more: more: open higher today"),
            "Markets open higher today"
        );
    }
}
