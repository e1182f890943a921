/*!
 * Encoding resolution and conversion to UTF-8.
 */

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::detector::{EncodingDetector, HeuristicDetector};
use crate::errors::EncodingError;

/// Number of leading bytes handed to the detector
pub const DEFAULT_DETECTION_WINDOW: usize = 100_000;

static ENCODING_DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"encoding=(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// How the resolved encoding was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Caller declared exactly `UTF-8`; nothing was inspected
    FastPath,
    /// Caller declared some other label
    Declared,
    /// The detector recognised the bytes
    Detected,
    /// The file's own `encoding="..."` attribute
    FileDeclaration,
}

/// Text of a TXML file after encoding resolution
#[derive(Debug, Clone)]
pub enum ResolvedContent {
    /// Bytes that were already UTF-8, kept exactly as supplied
    Passthrough(Vec<u8>),
    /// Text converted from UTF-16
    Converted(String),
}

/// Resolved encoding label together with the UTF-8 view of the file
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    encoding: String,
    source: ResolutionSource,
    content: ResolvedContent,
}

impl ResolvedInput {
    /// One of `UTF-8`, `UTF-16LE`, `UTF-16BE`
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn source(&self) -> ResolutionSource {
        self.source
    }

    pub fn content(&self) -> &ResolvedContent {
        &self.content
    }

    /// True when the original bytes are used without conversion
    pub fn is_passthrough(&self) -> bool {
        matches!(self.content, ResolvedContent::Passthrough(_))
    }

    /// Logical lines of the file
    ///
    /// Raw byte lines for pass-through input (decoded lossily one line at a
    /// time), lines of the converted text otherwise.
    pub fn lines(&self) -> Box<dyn Iterator<Item = Cow<'_, str>> + '_> {
        match &self.content {
            ResolvedContent::Passthrough(bytes) => Box::new(
                bytes
                    .split(|b| *b == b'\n')
                    .map(String::from_utf8_lossy),
            ),
            ResolvedContent::Converted(text) => Box::new(text.lines().map(Cow::Borrowed)),
        }
    }
}

/// Determines the encoding of a TXML file and yields UTF-8 text
pub struct EncodingResolver {
    detector: Box<dyn EncodingDetector + Send + Sync>,
    detection_window: usize,
}

impl Default for EncodingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingResolver {
    /// Resolver with the heuristic detector and the default window
    pub fn new() -> Self {
        Self::with_detector(Box::new(HeuristicDetector::new()), DEFAULT_DETECTION_WINDOW)
    }

    pub fn with_detector(
        detector: Box<dyn EncodingDetector + Send + Sync>,
        detection_window: usize,
    ) -> Self {
        Self {
            detector,
            detection_window: detection_window.max(1),
        }
    }

    /// Resolve `bytes` given an optional caller-declared encoding
    pub fn resolve(&self, bytes: Vec<u8>, declared: Option<&str>) -> Result<ResolvedInput, EncodingError> {
        if declared == Some("UTF-8") {
            debug!("Encoding declared as UTF-8, skipping detection");
            return Ok(ResolvedInput {
                encoding: "UTF-8".to_string(),
                source: ResolutionSource::FastPath,
                content: ResolvedContent::Passthrough(bytes),
            });
        }

        let (label, source) = match declared {
            Some(declared) => (Some(declared.trim().to_uppercase()), ResolutionSource::Declared),
            None => match self.detect(&bytes) {
                Some(label) => (Some(label), ResolutionSource::Detected),
                None => (scan_encoding_declaration(&bytes), ResolutionSource::FileDeclaration),
            },
        };

        let label = label.filter(|l| !l.is_empty()).ok_or(EncodingError::Unknown)?;
        EncodingError::check_supported(&label)?;

        debug!("Resolved encoding {} ({:?})", label, source);

        let content = match label.as_str() {
            "UTF-16LE" => ResolvedContent::Converted(convert_to_utf8(&bytes, UTF_16LE)),
            "UTF-16BE" => ResolvedContent::Converted(convert_to_utf8(&bytes, UTF_16BE)),
            _ => ResolvedContent::Passthrough(bytes),
        };

        Ok(ResolvedInput {
            encoding: label,
            source,
            content,
        })
    }

    fn detect(&self, bytes: &[u8]) -> Option<String> {
        let window = &bytes[..bytes.len().min(self.detection_window)];
        self.detector
            .detect(window)
            .map(|label| normalize_label(&label))
    }
}

/// Upper-case a label and map bare `UTF-16` to little endian
pub fn normalize_label(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    if upper == "UTF-16" {
        "UTF-16LE".to_string()
    } else {
        upper
    }
}

/// Find the `encoding="..."` declaration in the raw bytes
///
/// The bytes are force-decoded as UTF-8 with `*` for invalid sequences and
/// nulls removed, which makes an ASCII declaration inside UTF-16 readable.
pub fn scan_encoding_declaration(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes)
        .replace('\u{FFFD}', "*")
        .replace('\0', "");

    ENCODING_DECLARATION_REGEX
        .captures(&text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| normalize_label(m.as_str()))
}

fn convert_to_utf8(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        warn!("Malformed {} sequences replaced while converting to UTF-8", encoding.name());
    }
    decoded.into_owned()
}
