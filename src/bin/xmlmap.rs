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
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use thiserror::Error;

use xmlmap::BuildError;
use xmlmap::TreeBuilder;
use xmlmap::Value;

/// Prints XML documents as JSON trees.
///
/// Child elements become object keys, repeated elements become arrays and
/// attributes are listed under a "<name>$attrs" key next to their element.
#[derive(Parser, Debug)]
#[command(name = "xmlmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug output to stderr, repeat for more detail (-ddd traces every event)
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,

    /// Print each tree on a single line
    #[arg(short, long)]
    compact: bool,

    /// Suffix of the attribute map keys
    #[arg(long, env = "XMLMAP_ATTRIBUTE_SUFFIX", default_value = xmlmap::DEFAULT_ATTRIBUTE_SUFFIX)]
    attribute_suffix: String,

    /// XML files to convert (default: stdin)
    files: Vec<PathBuf>,
}

#[derive(Debug, Error)]
enum MapperError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot convert '{path}': {source}")]
    Build { path: String, source: BuildError },

    #[error("cannot format tree: {0}")]
    Json(#[from] serde_json::Error),
}

fn load_tree(path: Option<&Path>, suffix: &str) -> Result<Value, MapperError> {
    let name = path.map_or("stdin".to_string(), |p| p.display().to_string());
    let builder = TreeBuilder::new().with_attribute_suffix(suffix);
    let result = match path {
        None => builder.build(xmlmap::EventReader::from_reader(stdin().lock())),
        Some(path) => {
            let file = File::open(path).map_err(|source| MapperError::Io {
                path: name.clone(),
                source,
            })?;
            builder.build(xmlmap::EventReader::from_reader(BufReader::new(file)))
        }
    };
    result.map_err(|source| MapperError::Build { path: name, source })
}

fn print_tree(tree: &Value, compact: bool) -> Result<(), MapperError> {
    let json = if compact {
        serde_json::to_string(tree)?
    } else {
        serde_json::to_string_pretty(tree)?
    };
    println!("{}", json);
    Ok(())
}

fn run(cli: &Cli) -> Result<(), MapperError> {
    if cli.files.is_empty() {
        let tree = load_tree(None, &cli.attribute_suffix)?;
        return print_tree(&tree, cli.compact);
    }
    for file in &cli.files {
        tracing::info!("converting {}", file.display());
        let tree = load_tree(Some(file), &cli.attribute_suffix)?;
        print_tree(&tree, cli.compact)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    xmlmap::cli::setup_logging(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
