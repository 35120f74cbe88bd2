/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use chrono::DateTime;
use chrono::FixedOffset;

use crate::value::Value;

/// An entry of an Atom feed with the fields needed for listing it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub published: DateTime<FixedOffset>,
    /// Target of the `related` link, or of the `alternate` link if there is
    /// no related one. The last link of a kind wins.
    pub link: Option<String>,
}

impl FeedEntry {
    pub fn link_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.link.as_deref().unwrap_or(default)
    }

    /// Reads an entry from the value of an `entry` element.
    ///
    /// Returns `None` if the title or the publication date is missing or
    /// the date is not a valid RFC 3339 timestamp.
    pub fn from_value(entry: &Value) -> Option<FeedEntry> {
        let title = entry.get("title")?.as_str()?;
        let published = entry.get("published")?.as_str()?;
        let published = DateTime::parse_from_rfc3339(published.trim()).ok()?;
        let link = entry.get("link$attrs").and_then(preferred_link);
        Some(FeedEntry {
            title: title.to_string(),
            published,
            link: link.map(str::to_string),
        })
    }
}

/// Extracts the entries of an Atom feed tree in document order.
///
/// Entries with missing or malformed fields are skipped. A tree which is not
/// an Atom feed gives no entries.
pub fn entries(tree: &Value) -> Vec<FeedEntry> {
    let Some(entries) = tree.lookup(&["feed", "entry"]) else {
        return Vec::new();
    };
    entries
        .one_or_many()
        .iter()
        .filter_map(FeedEntry::from_value)
        .collect()
}

fn preferred_link(links: &Value) -> Option<&str> {
    let mut related = None;
    let mut alternate = None;
    for link in links.one_or_many() {
        let Some(href) = link.get("href").and_then(Value::as_str) else {
            continue;
        };
        match link.get("rel").and_then(Value::as_str) {
            Some("related") => related = Some(href),
            Some("alternate") => alternate = Some(href),
            _ => {}
        }
    }
    related.or(alternate)
}
