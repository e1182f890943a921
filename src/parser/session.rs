/*!
 * Single-use structural parse of one TXML document.
 *
 * The walk visits every reader event as a node and keeps three pieces of
 * state between nodes: the name of the previous node, whether the next
 * `segment` start opens a new unit, and the id of the active unit.
 */

use std::borrow::Cow;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ids::UnitIdGenerator;
use super::preprocess::prepare_converted_text;
use crate::encoding::{ResolvedContent, ResolvedInput};
use crate::model::{Document, LanguagePair, Role, Segment, TranslationUnit};
use crate::text_cleaner::{count_words, TextCleaner};

const REVISION: &str = "revision";
const SEGMENT: &str = "segment";
const SOURCE: &str = "source";
const TARGET: &str = "target";
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parity of `segment` starts
///
/// A unit is expected to hold two `segment` elements at the same level (the
/// current pairing and its revision pairing), so only every other start
/// opens a new unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    AwaitingUnitStart,
    WithinUnit,
}

/// Text being gathered for an open `source` or `target` element
#[derive(Debug)]
struct TextCapture {
    role: Role,
    /// Unit that was active when the element opened
    tu_id: Option<String>,
    text: String,
}

/// Parser state for one document; consumed by `parse`
pub struct ParserSession<'c> {
    cleaner: &'c dyn TextCleaner,
    ids: UnitIdGenerator,
    document: Document,
    last_node_name: String,
    unit_state: UnitState,
    active_tu_id: Option<String>,
    capture: Option<TextCapture>,
    root_seen: bool,
}

impl<'c> ParserSession<'c> {
    pub fn new(cleaner: &'c dyn TextCleaner, ids: UnitIdGenerator) -> Self {
        Self {
            cleaner,
            ids,
            document: Document::new(),
            last_node_name: String::new(),
            unit_state: UnitState::AwaitingUnitStart,
            active_tu_id: None,
            capture: None,
            root_seen: false,
        }
    }

    /// Parse resolved input, preparing converted text first
    pub fn parse(self, input: &ResolvedInput) -> Document {
        match input.content() {
            ResolvedContent::Passthrough(bytes) => self.parse_bytes(bytes),
            ResolvedContent::Converted(text) => {
                let prepared = prepare_converted_text(text);
                self.parse_bytes(prepared.as_bytes())
            }
        }
    }

    /// Parse UTF-8 XML bytes as they are
    pub fn parse_bytes(mut self, bytes: &[u8]) -> Document {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(false);
        reader.check_end_names(false);
        reader.expand_empty_elements(false);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = element_name(e);
                    if name == SEGMENT {
                        self.flush_capture();
                    }
                    if !self.follows_revision() {
                        self.visit_element(e, &name);
                        if name == SOURCE || name == TARGET {
                            self.open_capture(&name);
                        }
                    }
                    self.last_node_name = name;
                }
                Ok(Event::Empty(ref e)) => {
                    let name = element_name(e);
                    if name == SEGMENT {
                        self.flush_capture();
                    }
                    if !self.follows_revision() {
                        self.visit_element(e, &name);
                    }
                    self.last_node_name = name;
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if name == SOURCE || name == TARGET {
                        self.close_capture(&name);
                    } else if name == SEGMENT {
                        self.flush_capture();
                    }
                    self.last_node_name = name;
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(capture) = self.capture.as_mut() {
                        let text = e
                            .unescape()
                            .unwrap_or_else(|_| Cow::Owned(String::from_utf8_lossy(e).into_owned()));
                        capture.text.push_str(&text);
                    }
                    self.last_node_name = "#text".to_string();
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(capture) = self.capture.as_mut() {
                        capture.text.push_str(&String::from_utf8_lossy(e));
                    }
                    self.last_node_name = "#cdata-section".to_string();
                }
                Ok(Event::Comment(_)) => {
                    self.last_node_name = "#comment".to_string();
                }
                Ok(Event::PI(ref e)) => {
                    let content = String::from_utf8_lossy(e);
                    self.last_node_name = content.split_whitespace().next().unwrap_or_default().to_string();
                }
                Ok(Event::DocType(_)) => {
                    self.last_node_name = "#doctype".to_string();
                }
                Ok(Event::Decl(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    warn!(
                        "Stopping TXML parse at byte {}: {}",
                        reader.buffer_position(),
                        e
                    );
                    break;
                }
            }
            buf.clear();
        }

        if let Some(capture) = self.capture.take() {
            debug!("Dropping unterminated {} element", capture.role);
        }

        debug!(
            "Parsed {} translation units and {} segments",
            self.document.units.len(),
            self.document.segments.len()
        );

        self.document
    }

    /// Nodes right after a `revision` node are not processed
    fn follows_revision(&self) -> bool {
        self.last_node_name == REVISION
    }

    fn visit_element(&mut self, e: &BytesStart, name: &str) {
        if !self.root_seen {
            self.root_seen = true;
            self.read_root_languages(e);
        }

        if name == SEGMENT {
            self.on_segment_start();
        }
    }

    fn read_root_languages(&mut self, e: &BytesStart) {
        if let Some(locale) = attribute(e, b"locale") {
            self.document.source_language = locale;
        }
        if let Some(locale) = attribute(e, b"targetlocale") {
            self.document.target_language = locale;
        }

        if let Some(pair) =
            LanguagePair::known(&self.document.source_language, &self.document.target_language)
        {
            self.document.add_language_pair(pair);
        }
    }

    fn on_segment_start(&mut self) {
        self.unit_state = match self.unit_state {
            UnitState::AwaitingUnitStart => {
                let id = self.ids.next_id();
                self.document.units.push(TranslationUnit { id: id.clone() });
                self.active_tu_id = Some(id);
                UnitState::WithinUnit
            }
            UnitState::WithinUnit => UnitState::AwaitingUnitStart,
        };
    }

    /// Start collecting text; an element left open by stray markup ends here
    fn open_capture(&mut self, name: &str) {
        self.flush_capture();
        let role = if name == SOURCE { Role::Source } else { Role::Target };
        self.capture = Some(TextCapture {
            role,
            tu_id: self.active_tu_id.clone(),
            text: String::new(),
        });
    }

    fn close_capture(&mut self, name: &str) {
        let matches = self
            .capture
            .as_ref()
            .is_some_and(|c| c.role.as_str() == name);
        if matches {
            self.flush_capture();
        }
    }

    /// Emit the open capture as a segment of the unit it was opened in
    ///
    /// Called at the matching end tag and at every `segment` boundary, so
    /// text never spills into the next unit.
    fn flush_capture(&mut self) {
        let Some(capture) = self.capture.take() else {
            return;
        };

        let Some(tu_id) = capture.tu_id else {
            debug!("Ignoring {} text outside of any translation unit", capture.role);
            return;
        };

        let Some(text) = self.cleaner.clean(&capture.text) else {
            return;
        };

        let language = match capture.role {
            Role::Source => self.document.source_language.clone(),
            Role::Target => self.document.target_language.clone(),
        };

        self.document.segments.push(Segment {
            tu_id,
            role: capture.role,
            word_count: count_words(&text),
            language,
            text,
        });
    }
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .with_checks(false)
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .map(|a| match a.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}
