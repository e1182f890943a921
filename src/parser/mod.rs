/*!
 * Streaming structural parser for TXML documents.
 *
 * - `ids`: translation unit id generation
 * - `preprocess`: cleanup of converted text before parsing
 * - `session`: the single-use parse itself
 */

pub mod ids;
pub mod preprocess;
pub mod session;

pub use ids::{Clock, FixedClock, SystemClock, UnitIdGenerator};
pub use session::{ParserSession, UnitState};

use crate::encoding::ResolvedInput;
use crate::model::Document;
use crate::text_cleaner::TextCleaner;

/// Parse one resolved document with a fresh session
pub fn parse_document(input: &ResolvedInput, cleaner: &dyn TextCleaner, ids: UnitIdGenerator) -> Document {
    ParserSession::new(cleaner, ids).parse(input)
}
