// src/config/options.rs
//
// Everything a run depends on, passed in explicitly. Frontends own an
// `AppOptions` and hand the relevant piece to each pipeline stage; nothing
// in the library reads ambient state.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::consts::*;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub input: PathBuf,
    pub scoring: ScoringOptions,
    pub filter: FilterOptions,
    pub dedup: DedupOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            scoring: ScoringOptions::default(),
            filter: FilterOptions::default(),
            dedup: DedupOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

impl AppOptions {
    /// Load options from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let opts: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.filter.max_price {
            if !max.is_finite() {
                return Err(Error::Config(format!("max_price must be a finite number, got {max}")));
            }
        }
        if self.filter.limit == Some(0) {
            return Err(Error::Config("limit must be at least 1".into()));
        }
        Ok(())
    }
}

/* ---------------- Scoring ---------------- */

/// Weighting scheme for the total score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringScheme {
    /// Log-damped counts, weights 0.30/0.25/0.30/0.15.
    #[default]
    Logarithmic,
    /// Older linear caps (100 ratings, 10 reviews), weights 0.30/0.20/0.35/0.15.
    Linear,
}

impl FromStr for ScoringScheme {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" | "logarithmic" => Ok(Self::Logarithmic),
            "linear" | "legacy" => Ok(Self::Linear),
            other => Err(format!("Unknown scoring scheme: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    pub scheme: ScoringScheme,
}

/* ---------------- Filter / sort ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    #[default]
    All,
    Red,
    White,
}

impl WineType {
    /// Lowercase needle matched against `style`; `None` for `All`.
    pub fn needle(self) -> Option<&'static str> {
        match self {
            WineType::All => None,
            WineType::Red => Some("red"),
            WineType::White => Some("white"),
        }
    }
}

impl FromStr for WineType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "red" => Ok(Self::Red),
            "white" => Ok(Self::White),
            other => Err(format!("Unknown wine type: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Score,
    Value,
}

impl FromStr for SortBy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "value" => Ok(Self::Value),
            other => Err(format!("Unknown sort key: {other}")),
        }
    }
}

/// Budget choices offered by the recommendation wizard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    #[default]
    Any,
    Under10,
    Under5,
}

impl Budget {
    pub fn max_price(self) -> Option<f64> {
        match self {
            Budget::Any => None,
            Budget::Under10 => Some(BUDGET_UNDER_10),
            Budget::Under5 => Some(BUDGET_UNDER_5),
        }
    }
}

impl FromStr for Budget {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "under10" => Ok(Self::Under10),
            "under5" => Ok(Self::Under5),
            other => Err(format!("Unknown budget: {other}")),
        }
    }
}

/// Filter predicates are AND-combined; every one of them is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Strict upper bound on the parsed price.
    pub max_price: Option<f64>,
    pub wine_type: WineType,
    /// Case-insensitive substring over style, grape, food pairing and slug.
    pub search_query: Option<String>,
    pub sort_by: SortBy,
    /// Keep only the first N after sorting.
    pub limit: Option<usize>,
}

impl FilterOptions {
    /// Options equivalent to a completed wizard run.
    pub fn from_wizard(wine_type: WineType, budget: Budget) -> Self {
        Self {
            max_price: budget.max_price(),
            wine_type,
            ..Self::default()
        }
    }

    /// Lowercased, trimmed query; `None` when blank.
    pub fn query_lower(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/* ---------------- Dedup ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    pub enabled: bool,
    /// Keep only this exact unit size; `None` keeps every size.
    /// TOML has no null, so `unit_size = ""` in a config file means `None`.
    #[serde(deserialize_with = "blank_as_none")]
    pub unit_size: Option<String>,
    /// Product URLs containing any of these (case-insensitive) are dropped.
    pub excluded_terms: Vec<String>,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            unit_size: Some(s!(DEFAULT_UNIT_SIZE)),
            excluded_terms: DEFAULT_EXCLUDED_TERMS.iter().map(|t| s!(*t)).collect(),
        }
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<String>, D::Error> {
    let v = Option::<String>::deserialize(de)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Cell separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Export target. `None` means no export. A directory (existing, or a
    /// path ending in a separator) gets the default file name appended.
    pub out: Option<PathBuf>,
    pub include_headers: bool,
}

impl ExportOptions {
    /// Final file path for this export, or `None` when exporting is off.
    pub fn out_path(&self) -> Option<PathBuf> {
        let out = self.out.as_ref()?;
        if crate::file::looks_like_dir_hint(out) || out.is_dir() {
            Some(out.join(self.default_file_name()))
        } else {
            Some(out.clone())
        }
    }

    pub fn default_file_name(&self) -> String {
        join!(DEFAULT_FILE_STEM, ".", self.format.ext())
    }

    pub fn default_path(&self) -> PathBuf {
        PathBuf::from(DEFAULT_OUT_DIR).join(self.default_file_name())
    }
}
