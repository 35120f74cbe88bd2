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

use tracing::Level;
use tracing::debug;
use tracing::trace;

pub use error::BuildError;

use crate::event::Attributes;
use crate::event::XmlEvent;
use crate::value::Map;
use crate::value::Value;
use crate::value::insert_repeated;

/// Appended to an element name to form the key of its attribute maps.
pub const DEFAULT_ATTRIBUTE_SUFFIX: &str = "$attrs";

/// Builds a [Value] tree from the parse events of a single document.
///
/// Every start tag opens a scope with an empty map for the children of the
/// element. When the scope is closed, the element contributes to the map of
/// its parent:
///
/// - its concatenated text under its own name if it had any character data,
/// - otherwise its child map under its own name, if that map is not empty,
/// - its attributes under the name with a `$attrs` suffix, if it had any.
///
/// Repeated names are collected into sequences, see
/// [insert_repeated](crate::insert_repeated).
///
/// # Examples
///
/// ```
/// use xmlmap::{TreeBuilder, XmlEvent};
///
/// let events = vec![
///     XmlEvent::start("a", &[]),
///     XmlEvent::start("b", &[("x", "1")]),
///     XmlEvent::text("hi"),
///     XmlEvent::end("b"),
///     XmlEvent::end("a"),
/// ];
/// let tree = TreeBuilder::new().build(events).unwrap();
/// assert_eq!(tree.lookup(&["a", "b"]).and_then(|v| v.as_str()), Some("hi"));
/// assert!(tree.lookup(&["a", "b$attrs", "x"]).is_some());
/// ```
///
/// A builder can also be driven one event at a time with
/// [handle_event()](TreeBuilder::handle_event) and closed with
/// [finish()](TreeBuilder::finish).
#[derive(Debug)]
pub struct TreeBuilder {
    scope_stack: Vec<Map>,
    name_stack: Vec<String>,
    attribute_stack: Vec<Attributes>,
    pending_text: Option<String>,
    has_text: bool,
    seen_element: bool,
    attribute_suffix: String,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            scope_stack: vec![Map::new()],
            name_stack: Vec::new(),
            attribute_stack: Vec::new(),
            pending_text: None,
            has_text: false,
            seen_element: false,
            attribute_suffix: DEFAULT_ATTRIBUTE_SUFFIX.to_string(),
        }
    }

    /// Uses a different suffix for the attribute map keys.
    pub fn with_attribute_suffix(mut self, suffix: &str) -> Self {
        self.attribute_suffix = suffix.to_string();
        self
    }

    /// Consumes all events of a document and returns its tree.
    ///
    /// The result is a map with a single entry, the root element name and
    /// its value. A document whose root element has no content, children or
    /// attributes yields an empty map.
    pub fn build<I>(mut self, events: I) -> Result<Value, BuildError>
    where
        I: IntoIterator<Item = XmlEvent>,
    {
        for event in events {
            self.handle_event(event)?;
        }
        self.finish()
    }

    pub fn handle_event(&mut self, event: XmlEvent) -> Result<(), BuildError> {
        match event {
            XmlEvent::StartElement { name, attributes } => self.start_element(name, attributes),
            XmlEvent::EndElement { name } => self.end_element(&name)?,
            XmlEvent::CharacterData { text } => self.character_data(&text),
            XmlEvent::Cdata { bytes } => self.cdata(&bytes),
            XmlEvent::ParseError { detail } => return Err(BuildError::Tokenizer { detail }),
        }
        Ok(())
    }

    /// Checks that the document is complete and returns its tree.
    pub fn finish(mut self) -> Result<Value, BuildError> {
        if let Some(innermost) = self.name_stack.pop() {
            return Err(BuildError::UnclosedElements {
                depth: self.name_stack.len() + 1,
                innermost,
            });
        }
        if !self.seen_element {
            return Err(BuildError::NoRootElement);
        }
        let tree = Value::Map(self.scope_stack.pop().unwrap_or_default());
        if tracing::enabled!(Level::DEBUG) {
            debug!("document tree:\n{}", tree);
        }
        Ok(tree)
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.name_stack.len()
    }

    fn start_element(&mut self, name: String, attributes: Attributes) {
        trace!("{}start {}", indent(self.depth()), name);
        self.seen_element = true;
        self.pending_text = None;
        self.has_text = false;
        self.name_stack.push(name);
        self.attribute_stack.push(attributes);
        self.scope_stack.push(Map::new());
    }

    fn end_element(&mut self, end_name: &str) -> Result<(), BuildError> {
        let Some(name) = self.name_stack.pop() else {
            return Err(BuildError::UnexpectedEnd {
                name: end_name.to_string(),
            });
        };
        let attributes = self.attribute_stack.pop().unwrap_or_default();
        let children = self.scope_stack.pop().unwrap_or_default();
        let text = self.pending_text.take();
        let has_text = std::mem::take(&mut self.has_text);
        trace!(
            "{}end {}{}",
            indent(self.name_stack.len()),
            name,
            if has_text { " (TEXT)" } else { "" }
        );

        let Some(parent) = self.scope_stack.last_mut() else {
            return Err(BuildError::UnexpectedEnd { name });
        };
        // Child elements of a text-bearing element are dropped.
        if has_text {
            if let Some(text) = text {
                insert_repeated(parent, name.clone(), Value::Text(text));
            }
        } else if !children.is_empty() {
            insert_repeated(parent, name.clone(), Value::Map(children));
        }
        if !attributes.is_empty() {
            let attributes = attributes
                .into_iter()
                .map(|(key, value)| (key, Value::Text(value)))
                .collect();
            insert_repeated(
                parent,
                format!("{}{}", name, self.attribute_suffix),
                Value::Map(attributes),
            );
        }
        Ok(())
    }

    fn character_data(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        trace!("{}text = {}", indent(self.depth()), text);
        self.append_text(text);
    }

    fn cdata(&mut self, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                trace!("{}cdata = {}", indent(self.depth()), text);
                self.append_text(text);
            }
            Err(err) => {
                trace!("{}cdata dropped: {}", indent(self.depth()), err);
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        self.pending_text
            .get_or_insert_with(String::new)
            .push_str(text);
        self.has_text = true;
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(depth: usize) -> String {
    ". ".repeat(depth)
}
