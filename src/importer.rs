/*!
 * The `TxmlImporter` facade.
 *
 * Construction resolves the encoding (the only step that can fail); after
 * that `stats()` and `import()` work independently over the same resolved
 * text and can be called any number of times.
 */

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::encoding::{
    DEFAULT_DETECTION_WINDOW, EncodingDetector, EncodingResolver, HeuristicDetector, ResolvedInput,
};
use crate::errors::{EncodingError, ImportError};
use crate::file_utils::FileManager;
use crate::model::{Document, ImportResult, StatsSummary};
use crate::parser::{self, Clock, SystemClock, UnitIdGenerator};
use crate::stats::QuickStatsScanner;
use crate::text_cleaner::{PrettyCleaner, TextCleaner};

/// Pluggable pieces of an importer
pub struct ImporterOptions {
    /// Guesses the encoding when none is declared
    pub detector: Box<dyn EncodingDetector + Send + Sync>,

    /// Leading bytes handed to the detector
    pub detection_window: usize,

    /// Cleans segment text
    pub cleaner: Box<dyn TextCleaner + Send + Sync>,

    /// Timestamp part of unit ids
    pub clock: Arc<dyn Clock>,

    /// Seed for the random part of unit ids; OS randomness when `None`
    pub id_seed: Option<u64>,
}

impl Default for ImporterOptions {
    fn default() -> Self {
        Self {
            detector: Box::new(HeuristicDetector::new()),
            detection_window: DEFAULT_DETECTION_WINDOW,
            cleaner: Box::new(PrettyCleaner::new()),
            clock: Arc::new(SystemClock),
            id_seed: None,
        }
    }
}

/// Importer for one TXML file
pub struct TxmlImporter {
    input: ResolvedInput,
    cleaner: Box<dyn TextCleaner + Send + Sync>,
    clock: Arc<dyn Clock>,
    id_seed: Option<u64>,
}

impl TxmlImporter {
    /// Importer over `bytes` with an optional encoding hint
    ///
    /// Fails with `EncodingError::Unknown` or `EncodingError::Unsupported`
    /// before any parsing happens.
    pub fn new(bytes: Vec<u8>, encoding: Option<&str>) -> Result<Self, EncodingError> {
        Self::with_options(bytes, encoding, ImporterOptions::default())
    }

    pub fn with_options(
        bytes: Vec<u8>,
        encoding: Option<&str>,
        options: ImporterOptions,
    ) -> Result<Self, EncodingError> {
        let resolver = EncodingResolver::with_detector(options.detector, options.detection_window);
        let input = resolver.resolve(bytes, encoding)?;

        Ok(Self {
            input,
            cleaner: options.cleaner,
            clock: options.clock,
            id_seed: options.id_seed,
        })
    }

    /// Importer over a local file
    pub fn from_path<P: AsRef<Path>>(path: P, encoding: Option<&str>) -> Result<Self, ImportError> {
        let bytes = FileManager::read_bytes(path)?;
        Ok(Self::new(bytes, encoding)?)
    }

    /// Importer over a local path or an `http(s)`/`file` URI
    pub async fn from_location(location: &str, encoding: Option<&str>) -> Result<Self, ImportError> {
        Self::from_location_with_options(location, encoding, ImporterOptions::default()).await
    }

    pub async fn from_location_with_options(
        location: &str,
        encoding: Option<&str>,
        options: ImporterOptions,
    ) -> Result<Self, ImportError> {
        let bytes = FileManager::load_bytes(location).await?;
        Ok(Self::with_options(bytes, encoding, options)?)
    }

    /// Resolved encoding label
    pub fn encoding(&self) -> &str {
        self.input.encoding()
    }

    pub fn resolved_input(&self) -> &ResolvedInput {
        &self.input
    }

    /// Quick counts from a line scan
    pub fn stats(&self) -> StatsSummary {
        let summary = QuickStatsScanner::scan(self.input.lines());
        debug!(
            "Stats: {} units, {} segments, {} language pairs",
            summary.tu_count,
            summary.seg_count,
            summary.language_pairs.len()
        );
        summary
    }

    /// Full structural parse
    pub fn parse(&self) -> Document {
        let ids = match self.id_seed {
            Some(seed) => UnitIdGenerator::seeded(seed, self.clock.clone()),
            None => UnitIdGenerator::with_clock(self.clock.clone()),
        };
        parser::parse_document(&self.input, self.cleaner.as_ref(), ids)
    }

    /// Units and segments, in document order
    pub fn import(&self) -> ImportResult {
        self.parse().into()
    }
}
