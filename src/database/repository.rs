/*!
 * Repository layer for stored imports.
 *
 * Writes an `ImportResult` as one document with its translation units and
 * segments, and reads them back by document and unit.
 */

use anyhow::Result;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use super::connection::DatabaseConnection;
use super::models::{DocumentRecord, SegmentRecord};
use crate::model::{ImportResult, Role};

const DOCUMENT_COLUMNS: &str = "id, source_path, file_hash, encoding, source_language, target_language, \
                                unit_count, segment_count, imported_at";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Compute SHA256 hash of raw file bytes
    pub fn hash_bytes(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Store one import in a single transaction; returns the document id
    ///
    /// Language and count columns of `document` are taken from `result`.
    pub async fn store_import(&self, document: DocumentRecord, result: &ImportResult) -> Result<i64> {
        let result = result.clone();

        let document_id = self
            .db
            .transaction_async(move |tx| {
                tx.execute(
                    r#"
                    INSERT INTO documents (
                        source_path, file_hash, encoding, source_language, target_language,
                        unit_count, segment_count, imported_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        document.source_path,
                        document.file_hash,
                        document.encoding,
                        result.source_language,
                        result.target_language,
                        result.units.len() as i64,
                        result.segments.len() as i64,
                        document.imported_at,
                    ],
                )?;
                let document_id = tx.last_insert_rowid();

                {
                    let mut insert_unit = tx.prepare(
                        "INSERT INTO translation_units (document_id, tu_id, position) VALUES (?1, ?2, ?3)",
                    )?;
                    for (position, (tu_id,)) in result.unit_rows().into_iter().enumerate() {
                        insert_unit.execute(params![document_id, tu_id, position as i64])?;
                    }

                    let mut insert_segment = tx.prepare(
                        r#"
                        INSERT INTO segments (document_id, tu_id, position, role, word_count, language, text)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                        "#,
                    )?;
                    for (position, (tu_id, role, word_count, language, text)) in
                        result.segment_rows().into_iter().enumerate()
                    {
                        insert_segment.execute(params![
                            document_id,
                            tu_id,
                            position as i64,
                            role.as_str(),
                            word_count as i64,
                            language,
                            text,
                        ])?;
                    }
                }

                Ok(document_id)
            })
            .await?;

        info!("Stored document {} in the database", document_id);
        Ok(document_id)
    }

    /// Delete a document with its units and segments
    pub async fn delete_document(&self, document_id: i64) -> Result<()> {
        self.db
            .execute_async(move |conn| {
                conn.execute("DELETE FROM documents WHERE id = ?1", [document_id])?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a document by ID
    pub async fn get_document(&self, document_id: i64) -> Result<Option<DocumentRecord>> {
        self.db
            .execute_async(move |conn| {
                let sql = format!("SELECT {} FROM documents WHERE id = ?1", DOCUMENT_COLUMNS);
                Ok(conn.query_row(&sql, [document_id], parse_document_row).optional()?)
            })
            .await
    }

    /// Most recent document imported from bytes with this hash
    pub async fn find_document_by_hash(&self, file_hash: &str) -> Result<Option<DocumentRecord>> {
        let file_hash = file_hash.to_string();

        self.db
            .execute_async(move |conn| Self::find_document_by_hash_sync(conn, &file_hash))
            .await
    }

    fn find_document_by_hash_sync(conn: &Connection, file_hash: &str) -> Result<Option<DocumentRecord>> {
        let sql = format!(
            "SELECT {} FROM documents WHERE file_hash = ?1 ORDER BY id DESC LIMIT 1",
            DOCUMENT_COLUMNS
        );
        let document = conn.query_row(&sql, [file_hash], parse_document_row).optional()?;
        if document.is_some() {
            debug!("Found stored document for hash {}", file_hash);
        }
        Ok(document)
    }

    /// All documents, oldest first
    pub async fn list_documents(&self) -> Result<Vec<DocumentRecord>> {
        self.db
            .execute_async(|conn| {
                let sql = format!("SELECT {} FROM documents ORDER BY id", DOCUMENT_COLUMNS);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], parse_document_row)?;
                Ok(rows.filter_map(|r| r.ok()).collect())
            })
            .await
    }

    /// Unit ids of a document in document order
    pub async fn get_unit_ids(&self, document_id: i64) -> Result<Vec<String>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT tu_id FROM translation_units WHERE document_id = ?1 ORDER BY position",
                )?;
                let rows = stmt.query_map([document_id], |row| row.get(0))?;
                Ok(rows.filter_map(|r| r.ok()).collect())
            })
            .await
    }

    /// Segments of one translation unit in document order
    pub async fn get_segments_for_unit(&self, document_id: i64, tu_id: &str) -> Result<Vec<SegmentRecord>> {
        let tu_id = tu_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, document_id, tu_id, position, role, word_count, language, text
                    FROM segments
                    WHERE document_id = ?1 AND tu_id = ?2
                    ORDER BY position
                    "#,
                )?;

                let rows = stmt.query_map(params![document_id, tu_id], |row| {
                    let role: String = row.get(4)?;
                    Ok(SegmentRecord {
                        id: row.get(0)?,
                        document_id: row.get(1)?,
                        tu_id: row.get(2)?,
                        position: row.get(3)?,
                        role: role.parse().unwrap_or(Role::Source),
                        word_count: row.get(5)?,
                        language: row.get(6)?,
                        text: row.get(7)?,
                    })
                })?;

                Ok(rows.filter_map(|r| r.ok()).collect())
            })
            .await
    }

    /// Total words of a document per role
    pub async fn word_totals(&self, document_id: i64) -> Result<(i64, i64)> {
        self.db
            .execute_async(move |conn| {
                let total = |role: Role| -> rusqlite::Result<i64> {
                    conn.query_row(
                        "SELECT COALESCE(SUM(word_count), 0) FROM segments WHERE document_id = ?1 AND role = ?2",
                        params![document_id, role.as_str()],
                        |row| row.get(0),
                    )
                };
                Ok((total(Role::Source)?, total(Role::Target)?))
            })
            .await
    }
}

fn parse_document_row(row: &rusqlite::Row) -> rusqlite::Result<DocumentRecord> {
    Ok(DocumentRecord {
        id: row.get(0)?,
        source_path: row.get(1)?,
        file_hash: row.get(2)?,
        encoding: row.get(3)?,
        source_language: row.get(4)?,
        target_language: row.get(5)?,
        unit_count: row.get(6)?,
        segment_count: row.get(7)?,
        imported_at: row.get(8)?,
    })
}
