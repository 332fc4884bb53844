// src/data.rs
//
// Light wrappers around the canonical record list and view-layer data.
//
// - Catalog:    owns the loaded records and their scores. Scores are derived
//               from the records and recomputed only through `rescore`.
// - RankedView: derived (view) data produced from a scored list by applying
//               filter options and the requested ordering. Holds indices
//               only; rows are borrowed until a frontend asks for owned data.
//
// The predicates and ordering rules themselves live in `pipeline`.

use std::cmp::Ordering;

use crate::config::options::{FilterOptions, ScoringOptions, SortBy};
use crate::pipeline;
use crate::record::{ScoredWineRecord, WineRecord};
use crate::scoring;

/// Authoritative record list for one session, with scores computed once.
/// Re-filtering (e.g. every time a frontend toggle changes) reuses the scores.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<WineRecord>,
    scoring: ScoringOptions,
    scored: Vec<ScoredWineRecord>,
}

impl Catalog {
    pub fn new(records: Vec<WineRecord>, scoring: ScoringOptions) -> Self {
        let scored = scoring::score_with(&records, &scoring);
        Self { records, scoring, scored }
    }

    /// Input records, untouched.
    pub fn records(&self) -> &[WineRecord] { &self.records }

    /// Records that passed the eligibility gate, in input order.
    pub fn scored(&self) -> &[ScoredWineRecord] { &self.scored }

    pub fn scoring(&self) -> ScoringOptions { self.scoring }

    /// Recompute scores under different scoring options.
    /// This is the *only* mutator.
    pub fn rescore(&mut self, scoring: ScoringOptions) {
        if scoring == self.scoring { return; }
        self.scoring = scoring;
        self.scored = scoring::score_with(&self.records, &self.scoring);
    }

    pub fn view(&self, opts: &FilterOptions) -> RankedView<'_> {
        RankedView::build(&self.scored, opts)
    }
}

/// Zero-copy filtered and ordered view for display.
#[derive(Clone, Debug)]
pub struct RankedView<'a> {
    /// Positions of kept rows in `raw`, in display order
    pub row_ix: Vec<usize>,
    /// Borrowed scored list
    raw: &'a [ScoredWineRecord],
}

impl<'a> RankedView<'a> {
    /// Filter, then stable-sort descending by the chosen score, then apply
    /// the limit. Ties keep their relative input order.
    pub fn build(raw: &'a [ScoredWineRecord], opts: &FilterOptions) -> Self {
        let query = opts.query_lower();

        let mut row_ix: Vec<usize> = raw
            .iter()
            .enumerate()
            .filter(|(_, r)| pipeline::matches(r, opts, query.as_deref()))
            .map(|(i, _)| i)
            .collect();

        // `sort_by` is a stable merge sort
        row_ix.sort_by(|&a, &b| rank_order(&raw[a], &raw[b], opts.sort_by));

        if let Some(n) = opts.limit {
            row_ix.truncate(n);
        }

        Self { row_ix, raw }
    }

    /// Number of rows in the projection.
    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a single row by display position (no cloning).
    pub fn row(&self, i: usize) -> Option<&'a ScoredWineRecord> {
        self.row_ix.get(i).and_then(|&ix| self.raw.get(ix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ScoredWineRecord> + '_ {
        let raw = self.raw;
        self.row_ix.iter().map(move |&ix| &raw[ix])
    }

    /// Materialize owned rows (for export/frontend boundaries).
    pub fn to_owned_records(&self) -> Vec<ScoredWineRecord> {
        self.iter().cloned().collect()
    }
}

/// Descending by the sort key. Under `Value`, rows without a value score go
/// after every row that has one.
fn rank_order(a: &ScoredWineRecord, b: &ScoredWineRecord, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Score => b.total_score.total_cmp(&a.total_score),
        SortBy::Value => match (a.value_score, b.value_score) {
            (Some(va), Some(vb)) => vb.total_cmp(&va),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(url: &str, total: f64, value: Option<f64>) -> ScoredWineRecord {
        ScoredWineRecord {
            record: WineRecord { product_url: url.into(), ..Default::default() },
            total_score: total,
            value_score: value,
        }
    }

    fn urls(view: &RankedView<'_>) -> Vec<String> {
        view.iter().map(|r| r.record.product_url.clone()).collect()
    }

    #[test]
    fn value_sort_puts_unavailable_last_in_input_order() {
        let rows = vec![
            scored("a", 70.0, None),
            scored("b", 60.0, Some(80.0)),
            scored("c", 65.0, None),
            scored("d", 50.0, Some(90.0)),
        ];
        let opts = FilterOptions { sort_by: SortBy::Value, ..Default::default() };
        let view = RankedView::build(&rows, &opts);
        assert_eq!(urls(&view), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn limit_applies_after_sort() {
        let rows = vec![scored("a", 10.0, None), scored("b", 30.0, None), scored("c", 20.0, None)];
        let opts = FilterOptions { limit: Some(2), ..Default::default() };
        let view = RankedView::build(&rows, &opts);
        assert_eq!(urls(&view), vec!["b", "c"]);
        assert_eq!(view.row(0).map(|r| r.total_score), Some(30.0));
        assert!(view.row(2).is_none());
    }

    #[test]
    fn rescore_switches_scheme() {
        let rec = WineRecord {
            product_url: "p".into(),
            user_rating: Some(4.0),
            amount_of_user_ratings: Some(50),
            critic_score: Some(90.0),
            amount_of_critic_reviews: Some(5),
            ..Default::default()
        };
        let mut cat = Catalog::new(vec![rec, WineRecord::default()], ScoringOptions::default());
        assert_eq!(cat.records().len(), 2);
        assert_eq!(cat.scored().len(), 1);
        assert_eq!(cat.scored()[0].total_score, 71.1);

        cat.rescore(ScoringOptions { scheme: crate::config::options::ScoringScheme::Linear });
        assert_eq!(cat.scored()[0].total_score, 73.0);
    }
}
