/*!
 * Cleanup applied to converted (formerly UTF-16) text before XML parsing.
 *
 * After conversion the bytes are UTF-8, so the declaration has to say so,
 * and characters that are legal text but illegal XML have to go.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static ENCODING_DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"encoding=("[^"]*"|'[^']*')"#).unwrap()
});

// &#x0; .. &#x1F; and &#0; .. &#31;
static C0_CHARACTER_REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#[xX][01]?[0-9a-fA-F];|&#(?:[12]?[0-9]|3[01]);").unwrap()
});

static CONTROL_CHARACTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x1f\x7f\u{2028}]").unwrap()
});

/// Prepare converted text for the XML reader
pub fn prepare_converted_text(text: &str) -> String {
    let text = ENCODING_DECLARATION_REGEX.replace(text, r#"encoding="utf-8""#);
    let text = C0_CHARACTER_REFERENCE_REGEX.replace_all(&text, " ");
    CONTROL_CHARACTER_REGEX.replace_all(&text, " ").into_owned()
}
