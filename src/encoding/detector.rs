/*!
 * Encoding detection over a leading sample of a file.
 */

use log::trace;

/// Guesses the encoding label of a byte sample
///
/// Implementations return `None` when they cannot tell; the resolver then
/// falls back to the file's own `encoding="..."` declaration.
pub trait EncodingDetector {
    fn detect(&self, sample: &[u8]) -> Option<String>;
}

/// Byte-statistics detector for the encodings TXML files come in
///
/// Looks at byte order marks first, then at where null bytes fall. Markup
/// is mostly ASCII, so UTF-16 text has a null in every other byte: at odd
/// offsets for little endian, at even offsets for big endian. UTF-32 is
/// recognised too so that it gets rejected instead of read as UTF-16.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDetector;

impl HeuristicDetector {
    pub fn new() -> Self {
        Self
    }

    fn detect_bom(sample: &[u8]) -> Option<&'static str> {
        match sample {
            [0xEF, 0xBB, 0xBF, ..] => Some("UTF-8"),
            // UTF-32 marks start with the UTF-16 ones, so they go first
            [0xFF, 0xFE, 0x00, 0x00, ..] => Some("UTF-32LE"),
            [0x00, 0x00, 0xFE, 0xFF, ..] => Some("UTF-32BE"),
            [b'<', 0x00, 0x00, 0x00, ..] => Some("UTF-32LE"),
            [0x00, 0x00, 0x00, b'<', ..] => Some("UTF-32BE"),
            [0xFF, 0xFE, ..] => Some("UTF-16LE"),
            [0xFE, 0xFF, ..] => Some("UTF-16BE"),
            [b'<', 0x00, ..] => Some("UTF-16LE"),
            [0x00, b'<', ..] => Some("UTF-16BE"),
            _ => None,
        }
    }

    fn detect_by_null_distribution(sample: &[u8]) -> Option<&'static str> {
        // Null counts by offset modulo four
        let mut nulls = [0usize; 4];
        for (offset, byte) in sample.iter().enumerate() {
            if *byte == 0 {
                nulls[offset % 4] += 1;
            }
        }

        // Fewer than one null per eight bytes is not UTF-16 or UTF-32 markup
        if nulls.iter().sum::<usize>() * 8 < sample.len() {
            return None;
        }

        trace!("Null bytes by offset modulo four: {:?}", nulls);

        // BMP text in UTF-32 always has two zero high bytes per character
        let quarter = sample.len() / 4;
        let mostly_null = |count: usize| count * 4 > quarter * 3;
        if mostly_null(nulls[2]) && mostly_null(nulls[3]) && nulls[0] * 2 < quarter {
            return Some("UTF-32LE");
        }
        if mostly_null(nulls[0]) && mostly_null(nulls[1]) && nulls[3] * 2 < quarter {
            return Some("UTF-32BE");
        }

        let even_nulls = nulls[0] + nulls[2];
        let odd_nulls = nulls[1] + nulls[3];

        if odd_nulls > even_nulls * 4 {
            Some("UTF-16LE")
        } else if even_nulls > odd_nulls * 4 {
            Some("UTF-16BE")
        } else {
            None
        }
    }

    fn looks_like_utf8(sample: &[u8]) -> bool {
        if sample.contains(&0) {
            return false;
        }
        match std::str::from_utf8(sample) {
            Ok(_) => true,
            // A sample cut in the middle of a multi-byte character is still UTF-8
            Err(e) => e.error_len().is_none(),
        }
    }
}

impl EncodingDetector for HeuristicDetector {
    fn detect(&self, sample: &[u8]) -> Option<String> {
        if sample.is_empty() {
            return None;
        }

        let label = Self::detect_bom(sample)
            .or_else(|| Self::detect_by_null_distribution(sample))
            .or_else(|| Self::looks_like_utf8(sample).then_some("UTF-8"));

        label.map(str::to_string)
    }
}
