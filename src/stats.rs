/*!
 * Quick statistics over a TXML file.
 *
 * A purely textual line scan: no XML parsing, no unit records. The counts it
 * produces are exact for well-formed files with one closing tag per element,
 * and a cheap approximation for everything else. It never fails.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{LanguagePair, StatsSummary};

static LOCALE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\blocale=(?:"([^"]+)"|'([^']+)')"#).unwrap()
});

static TARGET_LOCALE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\btargetlocale=(?:"([^"]+)"|'([^']+)')"#).unwrap()
});

const SEGMENT_CLOSE: &str = "</segment>";
const SOURCE_CLOSE: &str = "</source>";
const TARGET_CLOSE: &str = "</target>";
// A revision's closing target would otherwise be counted as a segment
const REVISION_TARGET_CLOSE: &str = "</target></revision>";

/// Line-by-line accumulator behind `TxmlImporter::stats`
#[derive(Debug, Default)]
pub struct QuickStatsScanner {
    source_language: String,
    target_language: String,
    tu_count: usize,
    seg_count: usize,
    language_pairs: Vec<LanguagePair>,
}

impl QuickStatsScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every line and return the summary
    pub fn scan<I, S>(lines: I) -> StatsSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scanner = Self::new();
        for line in lines {
            scanner.scan_line(line.as_ref());
        }
        scanner.finish()
    }

    pub fn scan_line(&mut self, line: &str) {
        if line.contains("locale=") {
            if let Some(locale) = first_attribute_value(&LOCALE_REGEX, line) {
                self.source_language = locale;
            }
            if let Some(locale) = first_attribute_value(&TARGET_LOCALE_REGEX, line) {
                self.target_language = locale;
            }
        }

        self.tu_count += line.matches(SEGMENT_CLOSE).count();

        let closed = line.matches(SOURCE_CLOSE).count() + line.matches(TARGET_CLOSE).count();
        self.seg_count += closed.saturating_sub(line.matches(REVISION_TARGET_CLOSE).count());

        if let Some(pair) = LanguagePair::known(&self.source_language, &self.target_language) {
            if self.language_pairs.last() != Some(&pair) {
                self.language_pairs.push(pair);
            }
        }
    }

    /// Summary with language pairs de-duplicated in first-seen order
    pub fn finish(self) -> StatsSummary {
        let mut language_pairs: Vec<LanguagePair> = Vec::new();
        for pair in self.language_pairs {
            if !language_pairs.contains(&pair) {
                language_pairs.push(pair);
            }
        }

        StatsSummary {
            tu_count: self.tu_count,
            seg_count: self.seg_count,
            language_pairs,
        }
    }
}

fn first_attribute_value(regex: &Regex, line: &str) -> Option<String> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
}
