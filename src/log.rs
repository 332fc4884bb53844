// src/log.rs
//
// Logging setup for frontends. The library only emits `tracing` events;
// whoever owns `main` calls `init` once.
//
// Everything that passes the filter is appended to `.store/debug.log` with
// time-since-start stamps. The terminal only sees warnings and errors unless
// `verbose` is set, so table output on stdout stays readable.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::consts::{DEFAULT_LOG_FILTER, LOG_FILE, STORE_DIR};

pub fn log_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_FILE)
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "wine_rank=debug" } else { DEFAULT_LOG_FILTER })
    });

    fs::create_dir_all(STORE_DIR)?;
    let file = OpenOptions::new().create(true).append(true).open(log_path())?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(Uptime::default());

    let term_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let term_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(term_level);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(term_layer)
        .try_init();
    Ok(())
}
