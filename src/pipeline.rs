// src/pipeline.rs
//
// Filter/sort pipeline over scored records.
//
// All predicates are AND-combined and every one is optional. Text matching
// is case-insensitive substring matching; missing text fields behave like
// empty strings and simply fail to match.

use std::collections::HashSet;

use tracing::debug;

use crate::config::options::FilterOptions;
use crate::data::RankedView;
use crate::record::ScoredWineRecord;

/// Filter and order `records` into a new list. The input is not modified.
pub fn filter_and_sort(records: &[ScoredWineRecord], opts: &FilterOptions) -> Vec<ScoredWineRecord> {
    let view = RankedView::build(records, opts);
    debug!("Filter: kept {} of {} scored records", view.len(), records.len());
    view.to_owned_records()
}

/// Does `r` pass every active filter? `query` must already be lowercased
/// (see [`FilterOptions::query_lower`]).
pub fn matches(r: &ScoredWineRecord, opts: &FilterOptions, query: Option<&str>) -> bool {
    within_price(r, opts.max_price)
        && matches_type(r, opts)
        && query.is_none_or(|q| matches_query(r, q))
}

/// Strict `<` against the bound. A record without a usable price never
/// passes an active bound.
pub fn within_price(r: &ScoredWineRecord, max_price: Option<f64>) -> bool {
    match max_price {
        None => true,
        Some(max) => r.record.price_eur().is_some_and(|p| p < max),
    }
}

pub fn matches_type(r: &ScoredWineRecord, opts: &FilterOptions) -> bool {
    match opts.wine_type.needle() {
        None => true,
        Some(needle) => contains_ci(r.record.style_text(), needle),
    }
}

/// Match on any of style, grape variety, food pairing, or the product slug.
pub fn matches_query(r: &ScoredWineRecord, query_lower: &str) -> bool {
    let rec = &r.record;
    [rec.style_text(), rec.grape_text(), rec.food_text(), rec.slug()]
        .iter()
        .any(|field| contains_ci(field, query_lower))
}

/// Distinct grape varieties containing `query` (case-insensitive), in
/// first-seen order. A blank query suggests nothing.
pub fn grape_suggestions<'a>(records: &'a [ScoredWineRecord], query: &str) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() { return Vec::new(); }

    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.record.grape_text().trim())
        .filter(|g| !g.is_empty() && seen.insert(*g))
        .filter(|g| contains_ci(g, &query))
        .collect()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
