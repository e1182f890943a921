/*!
 * SQLite persistence for import results.
 *
 * - `schema`: tables for documents, translation units and segments
 * - `connection`: connection handling and blocking-task helpers
 * - `repository`: store and query imports
 * - `models`: row types
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{DocumentRecord, SegmentRecord};
pub use repository::Repository;
