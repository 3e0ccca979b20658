// Keyword-based sentiment tagging
// Author: kelexine (https://github.com/kelexine)

use crate::models::Sentiment;
use once_cell::sync::Lazy;
use regex::Regex;

const POSITIVE: &[&str] = &[
    "surge", "surges", "surged", "surging", "rally", "rallies", "rallied", "soar", "soars",
    "soared", "gain", "gains", "gained", "jump", "jumps", "jumped", "climb", "climbs", "climbed",
    "rise", "rises", "rising", "rose", "bullish", "boom", "booming", "rebound", "rebounds",
    "record high", "all-time high", "profit", "profits", "growth", "upgrade", "upgraded",
    "approval", "approved", "approves", "adoption", "partnership", "breakthrough", "beats",
    "outperform", "outperforms", "success", "successful", "win", "wins",
];

const NEGATIVE: &[&str] = &[
    "crash", "crashes", "crashed", "hack", "hacks", "hacked", "exploit", "exploited", "plunge",
    "plunges", "plunged", "drop", "drops", "dropped", "fall", "falls", "fell", "decline",
    "declines", "declined", "slump", "slumps", "bearish", "loss", "losses", "fraud", "scam",
    "lawsuit", "sued", "ban", "bans", "banned", "sell-off", "selloff", "bankrupt", "bankruptcy",
    "collapse", "collapses", "collapsed", "warning", "warns", "fear", "fears", "crisis",
    "downgrade", "downgraded", "theft", "stolen", "liquidation", "liquidated",
];

fn keyword_pattern(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).expect("keyword pattern")
}

static POSITIVE_RE: Lazy<Regex> = Lazy::new(|| keyword_pattern(POSITIVE));
static NEGATIVE_RE: Lazy<Regex> = Lazy::new(|| keyword_pattern(NEGATIVE));

/// Tag `text` as positive, negative or neutral.
///
/// A negative keyword wins over a positive one when both occur.
pub fn classify(text: &str) -> Sentiment {
    let folded = text.to_lowercase();
    let mut sentiment = Sentiment::Neutral;

    if POSITIVE_RE.is_match(&folded) {
        sentiment = Sentiment::Positive;
    }
    if NEGATIVE_RE.is_match(&folded) {
        sentiment = Sentiment::Negative;
    }

    sentiment
}

/// Classify a news item from its title and optional body.
pub fn classify_item(title: &str, body: Option<&str>) -> Sentiment {
    match body {
        Some(body) => classify(&format!("{} {}", title, body)),
        None => classify(title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert_eq!(classify("prices surge after rally"), Sentiment::Positive);
        assert_eq!(classify("Bitcoin hits RECORD HIGH"), Sentiment::Positive);
    }

    #[test]
    fn test_negative() {
        assert_eq!(classify("hack causes crash"), Sentiment::Negative);
        assert_eq!(classify("Exchange faces lawsuit"), Sentiment::Negative);
    }

    #[test]
    fn test_neutral() {
        assert_eq!(classify("quarterly report released"), Sentiment::Neutral);
        assert_eq!(classify(""), Sentiment::Neutral);
    }

    #[test]
    fn test_negative_overrides_positive() {
        assert_eq!(classify("stocks rally before the crash"), Sentiment::Negative);
    }

    #[test]
    fn test_word_boundaries() {
        // "regain" and "banner" only contain keywords, they are not keywords
        assert_eq!(classify("banner unveiled at the summit"), Sentiment::Neutral);
        assert_eq!(classify("team looks to regain"), Sentiment::Neutral);
    }

    #[test]
    fn test_classify_item_uses_body() {
        assert_eq!(classify_item("Weekly update", None), Sentiment::Neutral);
        assert_eq!(
            classify_item("Weekly update", Some("Funds were stolen overnight")),
            Sentiment::Negative
        );
    }
}
