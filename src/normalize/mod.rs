//! The text-normalization pipeline: an ordered chain of pure string
//! transforms that turns a raw tweet body into a stop-word-free, lemmatized
//! ASCII token stream, plus the emoji scan that runs before the ASCII filter
//! destroys its input.

pub mod lexicon;

pub use lexicon::Lexicon;

use regex::Regex;
use std::sync::LazyLock;

/// `@handle:` and bare `@handle` reference tokens.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+:|@\w+").unwrap());

/// Twitter short links; the API rewrites every URL through t.co.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https://t\.co/[A-Z0-9._%+-]+").unwrap());

/// A single leading character followed by whitespace, at position 0 only.
/// Deliberately narrow: it mops up the stray character the RT/mention
/// removals leave behind, and nothing else.
static LEADING_FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.\s+").unwrap());

/// Word runs or punctuation runs, whitespace discarded.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+|[^\w\s]+").unwrap());

/// Candidate contraction tokens: words with an interior apostrophe.
static CONTRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)+").unwrap());

/// Rows shorter than this (measured before cleaning) are noise.
const MIN_VIABLE_LEN: usize = 3;

/// Whether a row's raw text is long enough to keep.
pub fn is_viable(raw_text: &str) -> bool {
    raw_text.chars().count() >= MIN_VIABLE_LEN
}

/// Scan `text` left to right and report every character present in the
/// lexicon's emoji table as a `(character, canonical name)` pair. Duplicates
/// and order are preserved.
pub fn extract_emoji(text: &str, lexicon: &Lexicon) -> Vec<(char, &'static str)> {
    text.chars()
        .filter_map(|c| lexicon.emoji_name(c).map(|name| (c, name)))
        .collect()
}

/// Run the full cleaning pipeline. Never fails; degenerate input yields
/// degenerate (possibly empty) output.
pub fn clean(text: &str, lexicon: &Lexicon) -> String {
    let text = remove_retweet_marker(text);
    let text = remove_mentions(&text);
    let text = remove_urls(&text);
    let text = trim_leading_fragment(&text);
    let text = replace_newlines(&text);
    let text = strip_non_ascii(&text);
    let text = text.trim();
    let text = expand_contractions(text, lexicon);

    tokenize(&text)
        .into_iter()
        .filter(|token| !lexicon.is_stop_word(token))
        .map(|token| lexicon.lemmatize(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stage 1: drop every exact occurrence of the retweet marker.
pub(crate) fn remove_retweet_marker(text: &str) -> String {
    text.replace("RT", "")
}

/// Stage 2: drop `@handle:` / `@handle` references.
pub(crate) fn remove_mentions(text: &str) -> String {
    MENTION_RE.replace_all(text, "").into_owned()
}

/// Stage 3: drop t.co short links.
pub(crate) fn remove_urls(text: &str) -> String {
    URL_RE.replace_all(text, "").into_owned()
}

/// Stage 4: drop a one-character-plus-whitespace prefix, if present.
pub(crate) fn trim_leading_fragment(text: &str) -> String {
    LEADING_FRAGMENT_RE.replace(text, "").into_owned()
}

/// Stage 5: newlines become sentence breaks.
pub(crate) fn replace_newlines(text: &str) -> String {
    text.replace('\n', " . ")
}

/// Stage 6: keep only 7-bit ASCII.
pub(crate) fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Stage 8: expand contraction tokens in place.
pub(crate) fn expand_contractions(text: &str, lexicon: &Lexicon) -> String {
    CONTRACTION_RE
        .replace_all(text, |caps: &regex::Captures| {
            let token = &caps[0];
            lexicon
                .expand_contraction(token)
                .unwrap_or_else(|| token.to_string())
        })
        .into_owned()
}

/// Stage 9 (split): word and punctuation tokens, in order.
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}
