/*!
 * Common test utilities for the txml-importer test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;
use txml_importer::importer::ImporterOptions;
use txml_importer::parser::FixedClock;

/// Unix time used by every deterministic importer
pub const FIXED_UNIX_SECONDS: i64 = 1_718_000_000;

/// Route library logs to the test output; `RUST_LOG=debug` shows parser progress
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given bytes in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Two segment elements, EN-US to FR-FR, the second carrying a revision
pub fn sample_txml(declared_encoding: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="{}"?>
<txml locale="EN-US" targetlocale="FR-FR" version="1.0" datatype="regexp">
  <translatable blockId="1">
    <segment segmentId="1">
      <source>Save the file.</source>
      <target>Enregistrer le fichier.</target>
    </segment>
  </translatable>
  <translatable blockId="2">
    <segment segmentId="2">
      <source>Don't close the   window</source>
      <target>Ne fermez pas la fenêtre</target>
      <revisions>
        <revision creationid="reviewer"><target>Ne fermez pas</target></revision>
      </revisions>
    </segment>
  </translatable>
</txml>
"#,
        declared_encoding
    )
}

/// A document with `pairs` segment elements, each with source and target
pub fn txml_with_segments(pairs: usize) -> String {
    let mut xml = String::from(r#"<txml locale="DE" targetlocale="IT"><translatable>"#);
    for i in 1..=pairs {
        xml.push_str(&format!(
            "\n<segment><source>Quelle {}</source><target>Fonte {}</target></segment>",
            i, i
        ));
    }
    xml.push_str("\n</translatable></txml>\n");
    xml
}

/// UTF-16LE bytes, optionally prefixed with a byte order mark
pub fn utf16le_bytes(text: &str, with_bom: bool) -> Vec<u8> {
    let mut bytes = if with_bom { vec![0xFF, 0xFE] } else { Vec::new() };
    bytes.extend(text.encode_utf16().flat_map(|u| u.to_le_bytes()));
    bytes
}

/// UTF-32LE bytes, optionally prefixed with a byte order mark
pub fn utf32le_bytes(text: &str, with_bom: bool) -> Vec<u8> {
    let mut bytes = if with_bom { vec![0xFF, 0xFE, 0x00, 0x00] } else { Vec::new() };
    bytes.extend(text.chars().flat_map(|c| (c as u32).to_le_bytes()));
    bytes
}

/// UTF-16BE bytes, optionally prefixed with a byte order mark
pub fn utf16be_bytes(text: &str, with_bom: bool) -> Vec<u8> {
    let mut bytes = if with_bom { vec![0xFE, 0xFF] } else { Vec::new() };
    bytes.extend(text.encode_utf16().flat_map(|u| u.to_be_bytes()));
    bytes
}

/// Importer options with a fixed clock and seeded ids
pub fn deterministic_options(seed: u64) -> ImporterOptions {
    ImporterOptions {
        clock: Arc::new(FixedClock(FIXED_UNIX_SECONDS)),
        id_seed: Some(seed),
        ..ImporterOptions::default()
    }
}
