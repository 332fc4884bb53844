// src/runner.rs
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::options::AppOptions;
use crate::data::Catalog;
use crate::dedup;
use crate::error::Result;
use crate::file;
use crate::record::{ScoredWineRecord, WineRecord};
use crate::store;

/// Summary of what was produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Records read from the input
    pub loaded: usize,
    /// Records left after the optional dedup pass
    pub considered: usize,
    /// Records that passed the eligibility gate
    pub scored: usize,
    /// Final filtered, ordered list
    pub ranked: Vec<ScoredWineRecord>,
    /// Export target, if one was written
    pub written: Option<PathBuf>,
}

/// Top-level runner: load `opts.input`, then [`run_records`].
pub fn run(opts: &AppOptions) -> Result<RunSummary> {
    opts.validate()?;
    let records = store::load_records(&opts.input)?;
    run_records(records, opts)
}

/// Dedup (if enabled) → score → filter/sort → export (if configured).
pub fn run_records(records: Vec<WineRecord>, opts: &AppOptions) -> Result<RunSummary> {
    let loaded = records.len();

    let records = if opts.dedup.enabled {
        dedup::dedup(&records, &opts.dedup).records
    } else {
        records
    };
    let considered = records.len();

    let catalog = Catalog::new(records, opts.scoring);
    let scored = catalog.scored().len();
    if considered > 0 && scored == 0 {
        warn!("None of the {considered} records has enough rating data to be ranked");
    }

    let ranked = catalog.view(&opts.filter).to_owned_records();
    info!("Ranked {} of {} scored records", ranked.len(), scored);

    let written = file::write_export(&opts.export, &ranked)?;

    Ok(RunSummary { loaded, considered, scored, ranked, written })
}
