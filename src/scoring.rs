// src/scoring.rs
//
// Scoring engine: eligible records in, scored records out.
//
// Four sub-scores, each normalized to `[0, 1]`, are weighted into a total
// on a 0–100 scale:
//
// | term          | logarithmic (default)            | linear (legacy)       |
// |---------------|----------------------------------|-----------------------|
// | user rating   | `rating / 5` × 0.30              | same × 0.30           |
// | user count    | `ln(n+1) / ln(1000)` capped × 0.25 | `min(n,100)/100` × 0.20 |
// | critic score  | `score / 100` × 0.30             | same × 0.35           |
// | critic count  | `ln(n+1) / ln(100)` capped × 0.15  | `min(n,10)/10` × 0.15 |
//
// The value score is `10 × total / price`. Both are rounded to one decimal,
// half away from zero. Nothing here performs I/O or touches shared state.

use tracing::debug;

use crate::config::options::{ScoringOptions, ScoringScheme};
use crate::record::{ScoredWineRecord, WineRecord};

/// Weights and count-saturation constants for one scheme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub user_rating: f64,
    pub user_count: f64,
    pub critic_score: f64,
    pub critic_count: f64,
    /// Count at which the user-count term saturates.
    pub user_count_scale: f64,
    /// Count at which the critic-count term saturates.
    pub critic_count_scale: f64,
}

impl Weights {
    pub const LOGARITHMIC: Weights = Weights {
        user_rating: 0.30,
        user_count: 0.25,
        critic_score: 0.30,
        critic_count: 0.15,
        user_count_scale: 1000.0,
        critic_count_scale: 100.0,
    };

    pub const LINEAR: Weights = Weights {
        user_rating: 0.30,
        user_count: 0.20,
        critic_score: 0.35,
        critic_count: 0.15,
        user_count_scale: 100.0,
        critic_count_scale: 10.0,
    };

    pub fn for_scheme(scheme: ScoringScheme) -> Self {
        match scheme {
            ScoringScheme::Logarithmic => Self::LOGARITHMIC,
            ScoringScheme::Linear => Self::LINEAR,
        }
    }
}

/// Normalized sub-scores of one record, before weighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubScores {
    pub user_rating: f64,
    pub user_count: f64,
    pub critic_score: f64,
    pub critic_count: f64,
}

/// Eligibility gate: a usable user rating, at least one user rating, and a
/// usable critic score. Zero counts as missing for both scores.
pub fn is_eligible(r: &WineRecord) -> bool {
    let present = |v: Option<f64>| v.is_some_and(|x| x != 0.0);
    present(r.user_rating)
        && r.amount_of_user_ratings.is_some_and(|n| n > 0)
        && present(r.critic_score)
}

/// Score every eligible record with the default (logarithmic) scheme.
pub fn score(records: &[WineRecord]) -> Vec<ScoredWineRecord> {
    score_with(records, &ScoringOptions::default())
}

pub fn score_with(records: &[WineRecord], opts: &ScoringOptions) -> Vec<ScoredWineRecord> {
    let weights = Weights::for_scheme(opts.scheme);

    let scored: Vec<ScoredWineRecord> = records
        .iter()
        .filter(|r| is_eligible(r))
        .map(|r| score_record(r, opts.scheme, &weights))
        .collect();

    debug!(
        "Scoring: {} of {} records eligible ({:?})",
        scored.len(),
        records.len(),
        opts.scheme
    );
    scored
}

/// Score a single record. Callers must have checked [`is_eligible`];
/// absent inputs count as zero here.
fn score_record(r: &WineRecord, scheme: ScoringScheme, w: &Weights) -> ScoredWineRecord {
    let subs = sub_scores(r, scheme, w);
    let total = total_score(&subs, w);
    ScoredWineRecord {
        record: r.clone(),
        total_score: total,
        value_score: value_score(total, r.price_eur()),
    }
}

pub fn sub_scores(r: &WineRecord, scheme: ScoringScheme, w: &Weights) -> SubScores {
    let user_n = r.amount_of_user_ratings.unwrap_or(0) as f64;
    let critic_n = r.amount_of_critic_reviews.unwrap_or(0) as f64;

    let (user_count, critic_count) = match scheme {
        ScoringScheme::Logarithmic => (
            log_damped(user_n, w.user_count_scale),
            log_damped(critic_n, w.critic_count_scale),
        ),
        ScoringScheme::Linear => (
            unit(user_n / w.user_count_scale),
            unit(critic_n / w.critic_count_scale),
        ),
    };

    SubScores {
        user_rating: unit(r.user_rating.unwrap_or(0.0) / 5.0),
        user_count,
        critic_score: unit(r.critic_score.unwrap_or(0.0) / 100.0),
        critic_count,
    }
}

/// Weighted total on the 0–100 scale, rounded to one decimal.
pub fn total_score(s: &SubScores, w: &Weights) -> f64 {
    let raw = w.user_rating * s.user_rating
        + w.user_count * s.user_count
        + w.critic_score * s.critic_score
        + w.critic_count * s.critic_count;
    round1((100.0 * raw).clamp(0.0, 100.0))
}

/// Points per ten euros. `None` when the price is missing or not positive.
pub fn value_score(total: f64, price: Option<f64>) -> Option<f64> {
    let price = price.filter(|p| p.is_finite() && *p > 0.0)?;
    let v = round1(10.0 * total / price);
    v.is_finite().then_some(v)
}

/// `ln(n + 1) / ln(scale)`, capped at 1.
pub fn log_damped(count: f64, scale: f64) -> f64 {
    unit((count.max(0.0) + 1.0).ln() / scale.ln())
}

/// Round to one decimal place, half away from zero.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
