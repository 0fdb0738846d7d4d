//! DocBook table of contents parser.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::OutlineError;
use crate::tree::{Instruction, TocNode};

/// Parse a table of contents document into a [`TocNode`] tree.
///
/// Only elements and processing instructions are kept. Text, comments,
/// CDATA and the document prolog are skipped. Element names are reduced to
/// their local part so `db:tocentry` and `tocentry` are treated alike.
pub struct TocParser;

impl TocParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an XML string and return its document element.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed or has no element.
    pub fn parse(&self, xml: &str) -> Result<TocNode, OutlineError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        self.parse_document(&mut reader)
    }

    /// Parse XML from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed or has no element.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<TocNode, OutlineError> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        self.parse_document(&mut reader)
    }

    fn parse_document<R: BufRead>(&self, reader: &mut Reader<R>) -> Result<TocNode, OutlineError> {
        let mut buf = Vec::new();

        loop {
            match read_event(reader, &mut buf)? {
                Event::Start(e) => {
                    let mut root = TocNode::new(self.decode_tag(reader, &e)?);
                    self.parse_children(reader, &mut root)?;
                    self.parse_epilog(reader)?;
                    return Ok(root);
                }
                Event::Empty(e) => {
                    let root = TocNode::new(self.decode_tag(reader, &e)?);
                    self.parse_epilog(reader)?;
                    return Ok(root);
                }
                Event::Eof => return Err(OutlineError::EmptyDocument),
                Event::End(_)
                | Event::Text(_)
                | Event::GeneralRef(_)
                | Event::CData(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {
                    // Prolog: nothing to keep before the document element
                }
            }
            buf.clear();
        }
    }

    /// Consume everything after the document element.
    ///
    /// Only comments, processing instructions and whitespace may follow it.
    fn parse_epilog<R: BufRead>(&self, reader: &mut Reader<R>) -> Result<(), OutlineError> {
        let mut buf = Vec::new();

        loop {
            match read_event(reader, &mut buf)? {
                Event::Eof => return Ok(()),
                Event::Comment(_) | Event::PI(_) => {}
                Event::Start(_)
                | Event::Empty(_)
                | Event::End(_)
                | Event::Text(_)
                | Event::GeneralRef(_)
                | Event::CData(_)
                | Event::Decl(_)
                | Event::DocType(_) => {
                    return Err(OutlineError::TrailingContent {
                        position: reader.buffer_position(),
                    });
                }
            }
            buf.clear();
        }
    }

    fn parse_children<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        node: &mut TocNode,
    ) -> Result<(), OutlineError> {
        let mut buf = Vec::new();

        loop {
            match read_event(reader, &mut buf)? {
                Event::Start(e) => {
                    let mut child = TocNode::new(self.decode_tag(reader, &e)?);
                    self.parse_children(reader, &mut child)?;
                    node.children.push(child);
                }
                Event::Empty(e) => {
                    node.children
                        .push(TocNode::new(self.decode_tag(reader, &e)?));
                }
                Event::PI(e) => {
                    let target = reader.decoder().decode(e.target())?;
                    let content = reader.decoder().decode(e.content())?;
                    node.instructions
                        .push(Instruction::new(target, content.trim()));
                }
                // The reader verifies that end names match
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(OutlineError::UnclosedElement {
                        tag: node.tag.clone(),
                    });
                }
                Event::Text(_)
                | Event::GeneralRef(_)
                | Event::CData(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn decode_tag<R: BufRead>(
        &self,
        reader: &Reader<R>,
        e: &BytesStart,
    ) -> Result<String, OutlineError> {
        let name = e.local_name();
        Ok(reader.decoder().decode(name.as_ref())?.into_owned())
    }
}

impl Default for TocParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the next event, attaching the error position on failure.
fn read_event<'b, R: BufRead>(
    reader: &mut Reader<R>,
    buf: &'b mut Vec<u8>,
) -> Result<Event<'b>, OutlineError> {
    match reader.read_event_into(buf) {
        Ok(event) => Ok(event),
        Err(source) => Err(OutlineError::XmlParse {
            position: reader.error_position(),
            source,
        }),
    }
}
