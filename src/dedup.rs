// src/dedup.rs
//
// Post-scrape cleanup. The shop lists the same wine under several product
// pages; they all resolve to one Wine-Searcher URL. Collapse those, then
// drop listings we never want to rank (wrong bottle size, spirits that slip
// into the wine category).

use std::collections::HashMap;

use tracing::info;

use crate::config::options::DedupOptions;
use crate::record::WineRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DedupReport {
    pub records: Vec<WineRecord>,
    /// Input size
    pub original: usize,
    /// Size after collapsing duplicates
    pub after_dedup: usize,
    /// Size after unit-size and excluded-term filtering
    pub after_filter: usize,
}

/// Collapse by `wineSearcherUrl` (first occurrence wins, first-seen order),
/// recording later product URLs in `alternative_urls`, then filter.
pub fn dedup(records: &[WineRecord], opts: &DedupOptions) -> DedupReport {
    let mut slot_of: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut merged: Vec<WineRecord> = Vec::new();

    for r in records {
        match slot_of.get(r.wine_searcher_url.as_str()) {
            Some(&slot) => {
                let keep = &mut merged[slot];
                keep.alternative_urls.push(r.product_url.clone());
                keep.alternative_urls.extend(r.alternative_urls.iter().cloned());
            }
            None => {
                slot_of.insert(r.wine_searcher_url.as_str(), merged.len());
                merged.push(r.clone());
            }
        }
    }
    let after_dedup = merged.len();

    let excluded: Vec<String> = opts
        .excluded_terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    merged.retain(|r| keep_listing(r, opts.unit_size.as_deref(), &excluded));

    let report = DedupReport {
        original: records.len(),
        after_dedup,
        after_filter: merged.len(),
        records: merged,
    };

    info!("Original entries: {}", report.original);
    info!("After deduplication: {}", report.after_dedup);
    info!("After filtering: {}", report.after_filter);
    report
}

fn keep_listing(r: &WineRecord, unit_size: Option<&str>, excluded_lower: &[String]) -> bool {
    if let Some(size) = unit_size {
        if r.unit_size != size { return false; }
    }
    let url = r.product_url.to_lowercase();
    !excluded_lower.iter().any(|t| url.contains(t.as_str()))
}
