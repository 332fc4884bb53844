// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod error;
pub mod log;
pub mod record;

pub mod csv;
pub mod data;
pub mod dedup;
pub mod file;
pub mod pipeline;
pub mod runner;
pub mod scoring;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use pipeline::filter_and_sort;
pub use record::{Price, ScoredWineRecord, WineRecord};
pub use scoring::{score, score_with};
