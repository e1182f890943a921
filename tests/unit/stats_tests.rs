/*!
 * Tests for the quick statistics scan
 */

use txml_importer::model::LanguagePair;
use txml_importer::stats::QuickStatsScanner;

use crate::common;

#[test]
fn test_scan_withSampleDocument_shouldCountUnitsAndSegments() {
    let xml = common::sample_txml("UTF-8");
    let summary = QuickStatsScanner::scan(xml.lines());

    assert_eq!(summary.tu_count, 2);
    // The revision's target is not counted
    assert_eq!(summary.seg_count, 4);
    assert_eq!(
        summary.language_pairs,
        vec![LanguagePair("EN-US".to_string(), "FR-FR".to_string())]
    );
}

#[test]
fn test_scan_withMissingTargetLocale_shouldReportNoPair() {
    let lines = [
        r#"<txml locale="EN-US">"#,
        "<segment><source>a</source></segment>",
        "</txml>",
    ];
    let summary = QuickStatsScanner::scan(lines);

    assert_eq!(summary.tu_count, 1);
    assert_eq!(summary.seg_count, 1);
    assert!(summary.language_pairs.is_empty());
}

#[test]
fn test_scan_withChangingLocales_shouldKeepDistinctPairsInOrder() {
    let lines = [
        r#"<txml locale="EN" targetlocale="FR">"#,
        r#"<txml locale="EN" targetlocale="DE">"#,
        r#"<txml locale="EN" targetlocale="FR">"#,
    ];
    let summary = QuickStatsScanner::scan(lines);

    assert_eq!(
        summary.language_pairs,
        vec![
            LanguagePair("EN".to_string(), "FR".to_string()),
            LanguagePair("EN".to_string(), "DE".to_string()),
        ]
    );
}

#[test]
fn test_scanLine_withSeveralClosingTagsOnOneLine_shouldCountEach() {
    let mut scanner = QuickStatsScanner::new();
    scanner.scan_line("<segment><source>a</source><target>b</target></segment><segment><source>c</source></segment>");
    let summary = scanner.finish();

    assert_eq!(summary.tu_count, 2);
    assert_eq!(summary.seg_count, 3);
}

#[test]
fn test_scan_withEmptyInput_shouldReturnZeroes() {
    let summary = QuickStatsScanner::scan(Vec::<String>::new());
    assert_eq!(summary.tu_count, 0);
    assert_eq!(summary.seg_count, 0);
    assert!(summary.language_pairs.is_empty());
}
