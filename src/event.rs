/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;

/// Attribute names and unescaped values of a start tag.
pub type Attributes = BTreeMap<String, String>;

/// A low level XML parse event delivered to the [TreeBuilder](crate::TreeBuilder).
///
/// Events must arrive in document order. The [EventReader](crate::EventReader)
/// produces them from raw XML, but any tokenizer honoring the same ordering can
/// feed a builder directly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum XmlEvent {
    /// A start tag, or the first half of an empty element tag.
    ///
    /// The name is the qualified name as written in the document, prefix included.
    StartElement { name: String, attributes: Attributes },

    /// An end tag. Must close the most recently opened element.
    EndElement { name: String },

    /// Character data with references already replaced.
    ///
    /// A single run of text may be split into several of these events.
    CharacterData { text: String },

    /// Raw content of a `<![CDATA[...]]>` section.
    Cdata { bytes: Vec<u8> },

    /// The tokenizer rejected the document. No further events follow.
    ParseError { detail: String },
}

impl XmlEvent {
    pub fn start(name: &str, attributes: &[(&str, &str)]) -> XmlEvent {
        XmlEvent::StartElement {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> XmlEvent {
        XmlEvent::EndElement {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> XmlEvent {
        XmlEvent::CharacterData {
            text: text.to_string(),
        }
    }

    pub fn cdata(bytes: &[u8]) -> XmlEvent {
        XmlEvent::Cdata {
            bytes: bytes.to_vec(),
        }
    }
}
