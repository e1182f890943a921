/*!
 * Records produced by a TXML import.
 *
 * These are the in-memory results handed to whatever stores them; nothing
 * in this module knows about persistence.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a translation unit a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Source,
    Target,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Source => "source",
            Role::Target => "target",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" => Ok(Role::Source),
            "target" => Ok(Role::Target),
            _ => Err(anyhow::anyhow!("Invalid segment role: {}", s)),
        }
    }
}

/// (source language, target language)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguagePair(pub String, pub String);

impl LanguagePair {
    /// Pair of two known languages, `None` if either side is empty
    pub fn known(source: &str, target: &str) -> Option<Self> {
        if source.is_empty() || target.is_empty() {
            None
        } else {
            Some(Self(source.to_string(), target.to_string()))
        }
    }

    pub fn source(&self) -> &str {
        &self.0
    }

    pub fn target(&self) -> &str {
        &self.1
    }
}

/// A logical source/target pairing in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// `{random}-{unix seconds}-{counter}`
    pub id: String,
}

/// One side of a translation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Id of the unit this segment belongs to
    pub tu_id: String,
    pub role: Role,
    pub word_count: usize,
    pub language: String,
    /// Cleaned and escaped text
    pub text: String,
}

/// Approximate counts from a line scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub tu_count: usize,
    pub seg_count: usize,
    /// Distinct pairs in first-seen order
    pub language_pairs: Vec<LanguagePair>,
}

/// Everything a structural parse learned about one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub source_language: String,
    pub target_language: String,
    pub language_pairs: Vec<LanguagePair>,
    pub units: Vec<TranslationUnit>,
    pub segments: Vec<Segment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a language pair once
    pub fn add_language_pair(&mut self, pair: LanguagePair) {
        if !self.language_pairs.contains(&pair) {
            self.language_pairs.push(pair);
        }
    }
}

/// Result of `TxmlImporter::import`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub source_language: String,
    pub target_language: String,
    pub units: Vec<TranslationUnit>,
    pub segments: Vec<Segment>,
}

impl ImportResult {
    /// `(tu_id,)` rows in document order
    pub fn unit_rows(&self) -> Vec<(&str,)> {
        self.units.iter().map(|u| (u.id.as_str(),)).collect()
    }

    /// `(tu_id, role, word_count, language, text)` rows in document order
    pub fn segment_rows(&self) -> Vec<(&str, Role, usize, &str, &str)> {
        self.segments
            .iter()
            .map(|s| (s.tu_id.as_str(), s.role, s.word_count, s.language.as_str(), s.text.as_str()))
            .collect()
    }

    /// Segments belonging to one unit
    pub fn segments_for<'a>(&'a self, tu_id: &'a str) -> impl Iterator<Item = &'a Segment> + 'a {
        self.segments.iter().filter(move |s| s.tu_id == tu_id)
    }
}

impl From<Document> for ImportResult {
    fn from(document: Document) -> Self {
        Self {
            source_language: document.source_language,
            target_language: document.target_language,
            units: document.units,
            segments: document.segments,
        }
    }
}
