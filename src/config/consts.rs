// src/config/consts.rs

// Input
pub const DEFAULT_INPUT: &str = "results.json";

// Local store (logs)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const DEFAULT_LOG_FILTER: &str = "wine_rank=info";

// Post-scrape cleanup
pub const DEFAULT_UNIT_SIZE: &str = "0,75 l";
pub const DEFAULT_EXCLUDED_TERMS: &[&str] = &["bacardi"];

// Wizard budgets (EUR, strict upper bound)
pub const BUDGET_UNDER_10: f64 = 10.0;
pub const BUDGET_UNDER_5: f64 = 5.0;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_STEM: &str = "ranked";
