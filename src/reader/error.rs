/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::str::Utf8Error;

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Problems found while turning raw XML into events.
///
/// The [EventReader](crate::EventReader) reports these as a
/// [ParseError](crate::XmlEvent::ParseError) event carrying the message.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("name is not valid UTF-8: {0}")]
    Name(#[from] Utf8Error),

    #[error("extra content at the end of the document")]
    ExtraRoot,

    #[error("character data outside of the root element")]
    TextOutsideRoot,
}
