/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Schema-less mapping of XML documents into dynamically typed trees.
//!
//! Elements become [Value::Map]s keyed by child element name, text-only
//! elements become [Value::Text], and repeated names are collected into
//! [Value::Sequence]s. Attributes are kept next to their element under a
//! `name$attrs` key.
//!
//! ```
//! let tree = xmlmap::parse_str("<a><b x='1'>hi</b><b>there</b></a>").unwrap();
//! assert_eq!(
//!     tree.to_string(),
//!     r#"{
//!   "a": {
//!     "b": [
//!       "hi",
//!       "there"
//!     ],
//!     "b$attrs": {
//!       "x": "1"
//!     }
//!   }
//! }"#
//! );
//! ```

mod builder;
#[cfg(feature = "cli")]
pub mod cli;
mod event;
pub mod feed;
mod reader;
mod value;

use std::io::BufRead;

pub use builder::BuildError;
pub use builder::DEFAULT_ATTRIBUTE_SUFFIX;
pub use builder::TreeBuilder;

pub use event::Attributes;
pub use event::XmlEvent;

pub use feed::FeedEntry;

pub use reader::EventReader;
pub use reader::ReaderError;

pub use value::Map;
pub use value::Value;
pub use value::insert_repeated;

/// Parses an XML document from a string into a tree.
pub fn parse_str(xml: &str) -> Result<Value, BuildError> {
    TreeBuilder::new().build(EventReader::from_str(xml))
}

/// Parses an XML document from UTF-8 bytes into a tree.
pub fn parse_bytes(xml: &[u8]) -> Result<Value, BuildError> {
    TreeBuilder::new().build(EventReader::from_bytes(xml))
}

/// Parses an XML document read from `input` into a tree.
///
/// I/O errors are reported as [BuildError::Tokenizer].
pub fn parse_reader<R: BufRead>(input: R) -> Result<Value, BuildError> {
    TreeBuilder::new().build(EventReader::from_reader(input))
}
