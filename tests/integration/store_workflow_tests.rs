/*!
 * Integration tests for storing imports in SQLite
 */

use anyhow::Result;
use txml_importer::database::{DatabaseConnection, DocumentRecord, Repository};
use txml_importer::importer::TxmlImporter;
use txml_importer::model::Role;

use crate::common;

#[tokio::test]
async fn test_store_roundTrip_shouldMatchImportCounts() -> Result<()> {
    common::init_test_logging();
    let bytes = common::txml_with_segments(5).into_bytes();
    let importer = TxmlImporter::with_options(bytes.clone(), None, common::deterministic_options(8))?;
    let result = importer.import();

    let repo = Repository::new_in_memory()?;
    let document = DocumentRecord::new(
        "memory.txml".to_string(),
        Repository::hash_bytes(&bytes),
        importer.encoding().to_string(),
    );
    let id = repo.store_import(document, &result).await?;

    let stored = repo.get_document(id).await?.expect("Stored document");
    assert_eq!(stored.unit_count as usize, result.units.len());
    assert_eq!(stored.segment_count as usize, result.segments.len());
    assert_eq!(stored.source_language, "DE");
    assert_eq!(stored.target_language, "IT");

    let unit_ids = repo.get_unit_ids(id).await?;
    assert_eq!(unit_ids.len(), 3);

    for tu_id in &unit_ids {
        let stored_segments = repo.get_segments_for_unit(id, tu_id).await?;
        let expected: Vec<_> = result.segments_for(tu_id).collect();
        assert_eq!(stored_segments.len(), expected.len());
        for (stored, expected) in stored_segments.iter().zip(expected) {
            assert_eq!(stored.text, expected.text);
            assert_eq!(stored.role, expected.role);
            assert_eq!(stored.word_count as usize, expected.word_count);
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_store_withFileDatabase_shouldSurviveReopen() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let db_path = temp_dir.path().join("data").join("imports.db");
    let bytes = common::sample_txml("UTF-8").into_bytes();
    let hash = Repository::hash_bytes(&bytes);

    {
        let repo = Repository::new(DatabaseConnection::new(&db_path)?);
        let importer = TxmlImporter::new(bytes.clone(), None)?;
        let document = DocumentRecord::new("sample.txml".to_string(), hash.clone(), importer.encoding().to_string());
        repo.store_import(document, &importer.import()).await?;
    }

    let repo = Repository::new(DatabaseConnection::new(&db_path)?);
    let found = repo.find_document_by_hash(&hash).await?.expect("Document after reopen");

    assert_eq!(found.source_path, "sample.txml");
    assert_eq!(found.encoding, "UTF-8");

    let unit_ids = repo.get_unit_ids(found.id).await?;
    let segments = repo.get_segments_for_unit(found.id, &unit_ids[0]).await?;
    assert_eq!(segments[0].role, Role::Source);
    assert_eq!(segments[2].text, r"Don\'t close the window");
    Ok(())
}
