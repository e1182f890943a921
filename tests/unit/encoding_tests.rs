/*!
 * Tests for encoding detection and resolution
 */

use txml_importer::encoding::{
    EncodingDetector, EncodingResolver, HeuristicDetector, ResolutionSource, ResolvedContent,
};
use txml_importer::errors::EncodingError;

use crate::common;

/// Detector that never recognises anything
struct BlindDetector;

impl EncodingDetector for BlindDetector {
    fn detect(&self, _sample: &[u8]) -> Option<String> {
        None
    }
}

fn blind_resolver() -> EncodingResolver {
    EncodingResolver::with_detector(Box::new(BlindDetector), 100_000)
}

#[test]
fn test_resolve_withDeclaredUtf8_shouldPassBytesThroughUntouched() {
    // Not even valid UTF-8: the fast path must not look at it
    let bytes = vec![0xFF, 0x00, b'<', 0xC3];
    let resolved = EncodingResolver::new().resolve(bytes.clone(), Some("UTF-8")).unwrap();

    assert_eq!(resolved.encoding(), "UTF-8");
    assert_eq!(resolved.source(), ResolutionSource::FastPath);
    match resolved.content() {
        ResolvedContent::Passthrough(kept) => assert_eq!(kept, &bytes),
        other => panic!("Expected pass-through, got {:?}", other),
    }
}

#[test]
fn test_resolve_withUndeclaredUtf16AndBareDeclaration_shouldResolveLittleEndian() {
    let bytes = common::utf16le_bytes(&common::sample_txml("UTF-16"), false);
    let resolved = blind_resolver().resolve(bytes, None).unwrap();

    assert_eq!(resolved.encoding(), "UTF-16LE");
    assert_eq!(resolved.source(), ResolutionSource::FileDeclaration);
    assert!(!resolved.is_passthrough());
}

#[test]
fn test_resolve_withBomlessUtf16Le_shouldDetectAndConvert() {
    let xml = common::sample_txml("UTF-16");
    let resolved = EncodingResolver::new()
        .resolve(common::utf16le_bytes(&xml, false), None)
        .unwrap();

    assert_eq!(resolved.encoding(), "UTF-16LE");
    assert_eq!(resolved.source(), ResolutionSource::Detected);
    match resolved.content() {
        ResolvedContent::Converted(text) => assert_eq!(text, &xml),
        other => panic!("Expected converted text, got {:?}", other),
    }
}

#[test]
fn test_resolve_withUtf16BeBom_shouldStripBomWhenConverting() {
    let xml = common::sample_txml("UTF-16");
    let resolved = EncodingResolver::new()
        .resolve(common::utf16be_bytes(&xml, true), None)
        .unwrap();

    assert_eq!(resolved.encoding(), "UTF-16BE");
    match resolved.content() {
        ResolvedContent::Converted(text) => assert!(text.starts_with("<?xml")),
        other => panic!("Expected converted text, got {:?}", other),
    }
}

#[test]
fn test_resolve_withLowercaseHint_shouldNormalize() {
    let bytes = common::utf16le_bytes("<txml/>", false);
    let resolved = EncodingResolver::new().resolve(bytes, Some(" utf-16le ")).unwrap();

    assert_eq!(resolved.encoding(), "UTF-16LE");
    assert_eq!(resolved.source(), ResolutionSource::Declared);
}

#[test]
fn test_resolve_withUtf32Hint_shouldFailUnsupported() {
    let result = EncodingResolver::new().resolve(b"<txml/>".to_vec(), Some("UTF-32"));
    assert_eq!(result.unwrap_err(), EncodingError::Unsupported("UTF-32".to_string()));
}

#[test]
fn test_resolve_withNothingToGoOn_shouldFailUnknown() {
    let result = blind_resolver().resolve(b"<txml></txml>".to_vec(), None);
    assert_eq!(result.unwrap_err(), EncodingError::Unknown);
}

#[test]
fn test_resolve_withOtherFileDeclaration_shouldFailUnsupported() {
    let bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?><txml/>"#.to_vec();
    let result = blind_resolver().resolve(bytes, None);
    assert_eq!(result.unwrap_err(), EncodingError::Unsupported("ISO-8859-1".to_string()));
}

#[test]
fn test_detect_withPlainUtf8_shouldReturnUtf8() {
    let detector = HeuristicDetector::new();
    let sample = common::sample_txml("UTF-8");
    assert_eq!(detector.detect(sample.as_bytes()).as_deref(), Some("UTF-8"));
}

#[test]
fn test_detect_withLatin1Bytes_shouldReturnNone() {
    let detector = HeuristicDetector::new();
    // "fenêtre" in ISO-8859-1
    let sample = b"<target>fen\xeatre</target>";
    assert_eq!(detector.detect(sample), None);
}

#[test]
fn test_lines_shouldMatchForPassthroughAndConverted() {
    let xml = common::sample_txml("UTF-16");
    let converted = EncodingResolver::new()
        .resolve(common::utf16le_bytes(&xml, true), None)
        .unwrap();
    let passthrough = EncodingResolver::new()
        .resolve(xml.clone().into_bytes(), Some("UTF-8"))
        .unwrap();

    let a: Vec<String> = converted.lines().map(|l| l.into_owned()).collect();
    let b: Vec<String> = passthrough.lines().map(|l| l.into_owned()).collect();

    assert_eq!(a.len(), xml.lines().count());
    assert_eq!(a[..], b[..a.len()]);
}
