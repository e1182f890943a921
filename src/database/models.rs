/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted imports.
 */

use serde::{Deserialize, Serialize};

use crate::model::Role;

/// One imported TXML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Database ID (0 until inserted)
    pub id: i64,
    /// Path or URI the bytes came from
    pub source_path: String,
    /// SHA256 hash of the raw file bytes
    pub file_hash: String,
    /// Resolved encoding label
    pub encoding: String,
    /// Root `locale` attribute
    pub source_language: String,
    /// Root `targetlocale` attribute
    pub target_language: String,
    /// Number of translation units stored
    pub unit_count: i64,
    /// Number of segments stored
    pub segment_count: i64,
    /// Import timestamp (RFC 3339)
    pub imported_at: String,
}

impl DocumentRecord {
    /// Create a new document record (without database ID)
    pub fn new(source_path: String, file_hash: String, encoding: String) -> Self {
        Self {
            id: 0,
            source_path,
            file_hash,
            encoding,
            source_language: String::new(),
            target_language: String::new(),
            unit_count: 0,
            segment_count: 0,
            imported_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A stored segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Database ID
    pub id: i64,
    /// Document this segment belongs to
    pub document_id: i64,
    /// Translation unit id
    pub tu_id: String,
    /// Position of the segment in the document
    pub position: i64,
    pub role: Role,
    pub word_count: i64,
    pub language: String,
    pub text: String,
}
