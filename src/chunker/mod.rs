// Sentence-aligned text chunking
// Author: kelexine (https://github.com/kelexine)

use once_cell::sync::Lazy;
use regex::Regex;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_LIMIT: usize = 500;

/// Shortest run ending in terminal punctuation followed by whitespace, or
/// the tail of the text. Periods inside "U.S." or "3.5" don't end a sentence.
static SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s).+?(?:[.!?]+(?:\s|$)|$)").expect("sentence pattern"));

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split `text` into sentences. Nothing is dropped: the pieces cover the
/// whole input apart from surrounding whitespace.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split `text` into chunks of at most `limit` characters.
///
/// Text within the limit comes back as a single chunk. Longer text is cut on
/// sentence boundaries and sentences are packed greedily; a single sentence
/// over the limit is cut between words instead.
pub fn split(text: &str, limit: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        if char_len(sentence) > limit {
            flush(&mut chunks, &mut current);
            chunks.extend(split_words(sentence, limit));
            continue;
        }

        if !current.is_empty() && char_len(&current) + 1 + char_len(sentence) > limit {
            flush(&mut chunks, &mut current);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
    }

    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        chunks.push(std::mem::take(current));
    }
}

/// Pack words into pieces of at most `limit` characters. A single word longer
/// than `limit` is cut into fixed-size slices.
fn split_words(sentence: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        if char_len(word) > limit {
            flush(&mut pieces, &mut current);
            let chars: Vec<char> = word.chars().collect();
            pieces.extend(chars.chunks(limit).map(|c| c.iter().collect::<String>()));
            continue;
        }
        if !current.is_empty() && char_len(&current) + 1 + char_len(word) > limit {
            flush(&mut pieces, &mut current);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    flush(&mut pieces, &mut current);
    pieces
}
