/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

/// Reasons a [TreeBuilder](crate::TreeBuilder) gives up on a document.
///
/// No partial tree is ever returned together with these.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuildError {
    /// The tokenizer reported a malformed document.
    #[error("invalid XML: {detail}")]
    Tokenizer { detail: String },

    /// The event stream ended while elements were still open.
    #[error("document ended with {depth} unclosed element(s), innermost '{innermost}'")]
    UnclosedElements { depth: usize, innermost: String },

    /// An end tag arrived while no element was open.
    #[error("end tag '{name}' without a matching start tag")]
    UnexpectedEnd { name: String },

    /// The event stream did not contain any element.
    #[error("document has no root element")]
    NoRootElement,
}
