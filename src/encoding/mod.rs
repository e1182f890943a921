/*!
 * Encoding handling for TXML files.
 *
 * TXML exports come as UTF-8 or UTF-16 in either byte order, often without a
 * byte order mark. This module works out which one a file uses and hands the
 * rest of the crate a UTF-8 view of it.
 */

pub mod detector;
pub mod resolver;

pub use detector::{EncodingDetector, HeuristicDetector};
pub use resolver::{
    normalize_label, scan_encoding_declaration, EncodingResolver, ResolutionSource,
    ResolvedContent, ResolvedInput, DEFAULT_DETECTION_WINDOW,
};
