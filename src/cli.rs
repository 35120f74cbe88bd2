/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Support code shared by the command line tools.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maps the count of `-d` flags to a log level.
pub fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a stderr subscriber. `RUST_LOG` directives override the level.
pub fn setup_logging(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbosity).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}
