/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::QName;

pub use error::ReaderError;

use crate::event::Attributes;
use crate::event::XmlEvent;

/// Tokenizes XML input into a stream of [XmlEvent]s.
///
/// This is an [Iterator] so it can be handed straight to
/// [TreeBuilder::build()](crate::TreeBuilder::build). Empty element tags are
/// reported as a start and an end event. Declarations, processing
/// instructions, comments and doctypes are skipped.
///
/// Content after the root element, or text outside of it, is malformed.
/// When the input is malformed a single [ParseError](XmlEvent::ParseError)
/// is produced and the iteration stops.
///
/// # Examples
///
/// ```
/// use xmlmap::{EventReader, XmlEvent};
///
/// let events: Vec<XmlEvent> = EventReader::from_str("<a x='1'/>").collect();
/// assert_eq!(events, vec![XmlEvent::start("a", &[("x", "1")]), XmlEvent::end("a")]);
/// ```
pub struct EventReader<R> {
    reader: Reader<R>,
    buffer: Vec<u8>,
    pending_end: Option<String>,
    depth: usize,
    seen_root: bool,
    finished: bool,
}

enum Step {
    Event(XmlEvent),
    Skip,
    Eof,
}

impl<'a> EventReader<&'a [u8]> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'a str) -> Self {
        Self::from_reader(xml.as_bytes())
    }

    pub fn from_bytes(xml: &'a [u8]) -> Self {
        Self::from_reader(xml)
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn from_reader(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(false);
        reader.expand_empty_elements(false);
        reader.check_end_names(true);
        EventReader {
            reader,
            buffer: Vec::new(),
            pending_end: None,
            depth: 0,
            seen_root: false,
            finished: false,
        }
    }

    /// Byte offset of the input consumed so far.
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    fn read_step(&mut self) -> Result<Step, ReaderError> {
        self.buffer.clear();
        let step = match self.reader.read_event_into(&mut self.buffer)? {
            Event::Start(start) => {
                open_element(self.depth, &mut self.seen_root)?;
                self.depth += 1;
                Step::Event(start_element(&start)?)
            }
            Event::Empty(start) => {
                open_element(self.depth, &mut self.seen_root)?;
                let event = start_element(&start)?;
                self.pending_end = Some(decode_name(start.name())?);
                Step::Event(event)
            }
            Event::End(end) => {
                self.depth = self.depth.saturating_sub(1);
                Step::Event(XmlEvent::EndElement {
                    name: decode_name(end.name())?,
                })
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if self.depth > 0 {
                    Step::Event(XmlEvent::CharacterData {
                        text: text.into_owned(),
                    })
                } else if text.trim().is_empty() {
                    Step::Skip
                } else {
                    return Err(ReaderError::TextOutsideRoot);
                }
            }
            Event::CData(cdata) => {
                if self.depth == 0 {
                    return Err(ReaderError::TextOutsideRoot);
                }
                Step::Event(XmlEvent::Cdata {
                    bytes: cdata.into_inner().into_owned(),
                })
            }
            Event::Eof => Step::Eof,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => Step::Skip,
        };
        Ok(step)
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = XmlEvent;

    fn next(&mut self) -> Option<XmlEvent> {
        if let Some(name) = self.pending_end.take() {
            return Some(XmlEvent::EndElement { name });
        }
        while !self.finished {
            match self.read_step() {
                Ok(Step::Event(event)) => return Some(event),
                Ok(Step::Skip) => continue,
                Ok(Step::Eof) => self.finished = true,
                Err(err) => {
                    self.finished = true;
                    let position = self.reader.buffer_position();
                    return Some(XmlEvent::ParseError {
                        detail: format!("{} (at byte {})", err, position),
                    });
                }
            }
        }
        None
    }
}

// Only one element may start at the top level.
fn open_element(depth: usize, seen_root: &mut bool) -> Result<(), ReaderError> {
    if depth == 0 {
        if *seen_root {
            return Err(ReaderError::ExtraRoot);
        }
        *seen_root = true;
    }
    Ok(())
}

fn decode_name(name: QName) -> Result<String, ReaderError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

fn start_element(start: &BytesStart) -> Result<XmlEvent, ReaderError> {
    let mut attributes = Attributes::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let value = attribute.unescape_value()?.into_owned();
        attributes.insert(decode_name(attribute.key)?, value);
    }
    Ok(XmlEvent::StartElement {
        name: decode_name(start.name())?,
        attributes,
    })
}
