/*!
 * End-to-end tests from file bytes to import results
 */

use anyhow::Result;
use txml_importer::errors::{EncodingError, ImportError};
use txml_importer::file_utils::FileManager;
use txml_importer::importer::TxmlImporter;
use txml_importer::model::{LanguagePair, Role};

use crate::common;

#[test]
fn test_stats_withMinimalTwoUnitDocument_shouldReportPairAndUnits() -> Result<()> {
    common::init_test_logging();
    let xml = r#"<txml locale="EN-US" targetlocale="FR-FR">
<segment><source>One</source><target>Un</target></segment>
<segment><source>Two</source><target>Deux</target></segment>
</txml>"#;
    let importer = TxmlImporter::new(xml.as_bytes().to_vec(), None)?;

    let stats = importer.stats();

    assert_eq!(
        stats.language_pairs,
        vec![LanguagePair("EN-US".to_string(), "FR-FR".to_string())]
    );
    assert_eq!(stats.tu_count, 2);
    Ok(())
}

#[test]
fn test_workflow_withUtf16File_shouldMatchUtf8File() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let utf8_path = common::create_test_file(
        temp_dir.path(),
        "memory-utf8.txml",
        common::sample_txml("UTF-8").as_bytes(),
    )?;
    let utf16_path = common::create_test_file(
        temp_dir.path(),
        "memory-utf16.txml",
        &common::utf16le_bytes(&common::sample_txml("UTF-16"), true),
    )?;

    let utf8 = TxmlImporter::with_options(
        FileManager::read_bytes(&utf8_path)?,
        None,
        common::deterministic_options(21),
    )?;
    let utf16 = TxmlImporter::with_options(
        FileManager::read_bytes(&utf16_path)?,
        None,
        common::deterministic_options(21),
    )?;

    assert_eq!(utf8.encoding(), "UTF-8");
    assert_eq!(utf16.encoding(), "UTF-16LE");
    assert_eq!(utf8.stats(), utf16.stats());
    assert_eq!(utf8.import(), utf16.import());
    Ok(())
}

#[test]
fn test_workflow_withDirectory_shouldImportEveryFile() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "one.txml", common::txml_with_segments(2).as_bytes())?;
    common::create_test_file(temp_dir.path(), "deep/two.txml", common::txml_with_segments(3).as_bytes())?;

    let mut totals = (0, 0);
    for path in FileManager::find_txml_files(temp_dir.path())? {
        let result = TxmlImporter::from_path(&path, Some("UTF-8"))?.import();
        totals.0 += result.units.len();
        totals.1 += result.segments.len();
    }

    // ceil(3/2) + ceil(2/2) units, two segments per element
    assert_eq!(totals, (3, 10));
    Ok(())
}

#[test]
fn test_workflow_withUnsupportedHint_shouldFailOnConstruction() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "memory.txml", common::sample_txml("UTF-8").as_bytes())?;

    let result = TxmlImporter::from_path(&path, Some("UTF-32"));

    match result {
        Err(ImportError::Encoding(EncodingError::Unsupported(label))) => assert_eq!(label, "UTF-32"),
        Err(other) => panic!("Unexpected error: {}", other),
        Ok(_) => panic!("Construction should fail"),
    }
    Ok(())
}

#[test]
fn test_workflow_withBrokenMarkup_shouldReturnPartialResult() -> Result<()> {
    common::init_test_logging();
    let xml = r#"<txml locale="EN" targetlocale="ES">
<segment><source>Open</source><target>Abrir</target></segment>
<segment><source>Close</source><target>Cer"#;
    let importer = TxmlImporter::new(xml.as_bytes().to_vec(), Some("UTF-8"))?;

    let result = importer.import();

    assert_eq!(result.units.len(), 1);
    assert_eq!(result.segments.len(), 3);
    assert_eq!(result.segments[2].role, Role::Source);
    assert_eq!(result.segments[2].text, "Close");
    Ok(())
}

#[test]
fn test_workflow_importResult_shouldSerializeToJson() -> Result<()> {
    common::init_test_logging();
    let importer = TxmlImporter::with_options(
        common::sample_txml("UTF-8").into_bytes(),
        None,
        common::deterministic_options(1),
    )?;

    let json = serde_json::to_value(importer.import())?;

    assert_eq!(json["source_language"], "EN-US");
    assert_eq!(json["segments"][0]["role"], "source");
    assert_eq!(json["segments"][1]["role"], "target");
    assert_eq!(json["segments"].as_array().map(|a| a.len()), Some(4));
    Ok(())
}
