/*!
 * Segment text cleanup.
 *
 * Raw segment text coming out of a TXML file carries entity references,
 * placeholder tags, stray control characters and uneven whitespace. The
 * cleaner turns it into a single tidy line and then escapes backslashes and
 * single quotes, because the storage side embeds values in simple statement
 * templates.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[A-Za-z][^<>]*>").unwrap()
});

// {1}, [2], <3>, </3>
static PLACEHOLDER_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\d+\}|\[\d+\]|</?\d+>").unwrap()
});

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

static SPACE_BEFORE_PUNCT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" +([,.])").unwrap()
});

static DOT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.{3,}").unwrap()
});

/// Turns raw extracted text into a storable string
///
/// Returning `None` means there is nothing worth storing and the caller
/// must not emit a segment.
pub trait TextCleaner {
    fn clean(&self, raw: &str) -> Option<String>;
}

/// Default cleaner: tidy the text, then escape it for statement templates
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyCleaner;

impl PrettyCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Entity decoding, tag stripping and whitespace/punctuation tidying
    pub fn prettify(raw: &str) -> String {
        let decoded = html_escape::decode_html_entities(raw);
        let text = MARKUP_TAG_REGEX.replace_all(&decoded, "");
        let text = PLACEHOLDER_TAG_REGEX.replace_all(&text, "");

        let text: String = text
            .chars()
            .map(|c| if c.is_control() || c == '\u{2028}' { ' ' } else { c })
            .collect();

        let text = WHITESPACE_RUN_REGEX.replace_all(&text, " ");
        let text = SPACE_BEFORE_PUNCT_REGEX.replace_all(&text, "$1");
        let text = DOT_RUN_REGEX.replace_all(&text, "...");

        text.trim().to_string()
    }
}

impl TextCleaner for PrettyCleaner {
    fn clean(&self, raw: &str) -> Option<String> {
        let pretty = Self::prettify(raw);
        if pretty.is_empty() {
            return None;
        }
        Some(escape_for_statement(&pretty))
    }
}

/// Escape backslashes as `\\` and single quotes as `\'`
///
/// Pairs that are already escaped are copied through untouched, which makes
/// the escape idempotent: escaping an escaped string changes nothing.
pub fn escape_for_statement(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some(next @ ('\\' | '\'')) => {
                    escaped.push('\\');
                    escaped.push(next);
                    chars.next();
                }
                _ => escaped.push_str("\\\\"),
            },
            '\'' => escaped.push_str("\\'"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Number of words after collapsing whitespace runs
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
