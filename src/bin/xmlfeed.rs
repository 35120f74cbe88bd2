/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fs::File;
use std::io::BufReader;
use std::io::stdin;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use thiserror::Error;

use xmlmap::BuildError;
use xmlmap::FeedEntry;
use xmlmap::Value;

/// Lists the entries of an Atom feed.
#[derive(Parser, Debug)]
#[command(name = "xmlfeed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug output to stderr, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,

    /// Link printed for entries without a related or alternate link
    #[arg(short, long, env = "XMLFEED_FALLBACK_LINK", default_value = "-")]
    fallback_link: String,

    /// Atom feed file (default: stdin)
    file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum FeedError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse feed: {0}")]
    Build(#[from] BuildError),
}

fn load_feed(file: Option<&PathBuf>) -> Result<Value, FeedError> {
    let tree = match file {
        None => xmlmap::parse_reader(stdin().lock())?,
        Some(path) => {
            let f = File::open(path).map_err(|source| FeedError::Io {
                path: path.display().to_string(),
                source,
            })?;
            xmlmap::parse_reader(BufReader::new(f))?
        }
    };
    Ok(tree)
}

fn format_entry(entry: &FeedEntry, fallback_link: &str) -> String {
    format!(
        "{}  {}  {}",
        entry.published.format("%Y-%m-%d"),
        entry.title,
        entry.link_or(fallback_link)
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    xmlmap::cli::setup_logging(cli.debug);

    let tree = match load_feed(cli.file.as_ref()) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let entries = xmlmap::feed::entries(&tree);
    tracing::info!("{} entries", entries.len());
    for entry in &entries {
        println!("{}", format_entry(entry, &cli.fallback_link));
    }

    ExitCode::SUCCESS
}
