/*!
 * Tests for application configuration
 */

use anyhow::Result;
use log::LevelFilter;
use txml_importer::app_config::{Config, LogLevel};

use crate::common;

#[test]
fn test_default_shouldUseExpectedValues() {
    let config = Config::default();

    assert_eq!(config.encoding, None);
    assert_eq!(config.detection_window_bytes, 100_000);
    assert_eq!(config.database_path, None);
    assert!(config.pretty_json);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config {
        encoding: Some("UTF-16LE".to_string()),
        detection_window_bytes: 4096,
        database_path: Some("imports.db".to_string()),
        pretty_json: false,
        log_level: LogLevel::Debug,
    };
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        br#"{ "encoding": "UTF-8", "log_level": "warn" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.encoding.as_deref(), Some("UTF-8"));
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.detection_window_bytes, 100_000);
    assert!(config.pretty_json);
    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", b"{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withUtf32_shouldFail() {
    let config = Config {
        encoding: Some("UTF-32".to_string()),
        ..Config::default()
    };
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("UTF-32"));
}

#[test]
fn test_validate_withBlankDatabasePath_shouldFail() {
    let config = Config {
        database_path: Some("  ".to_string()),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), LevelFilter::Info);
}
