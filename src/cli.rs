// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::options::{AppOptions, Budget, ExportFormat, ScoringScheme, SortBy, WineType};
use crate::record::ScoredWineRecord;
use crate::runner::{self, RunSummary};

/// Rank scraped wine listings by rating quality and value for money.
#[derive(Parser, Debug)]
#[command(name = "wine_rank", version)]
pub struct Args {
    /// JSON array of scraped wine records [default: results.json]
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// TOML file with default options; flags override it
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep wines strictly cheaper than this (EUR)
    #[arg(long, value_name = "EUR")]
    pub max_price: Option<f64>,

    /// all | red | white
    #[arg(long = "type", value_name = "TYPE")]
    pub wine_type: Option<WineType>,

    /// any | under10 | under5 (ignored when --max-price is given)
    #[arg(long)]
    pub budget: Option<Budget>,

    /// Case-insensitive text over style, grape, food pairing and name
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// score | value
    #[arg(long)]
    pub sort: Option<SortBy>,

    /// Show only the top N
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// logarithmic | linear
    #[arg(long)]
    pub scheme: Option<ScoringScheme>,

    /// Collapse duplicate listings and drop non-0,75 l / excluded products first
    #[arg(long)]
    pub dedup: bool,

    /// With --dedup, keep every bottle size instead of only 0,75 l
    #[arg(long)]
    pub any_unit_size: bool,

    /// csv | tsv | json; without --out, writes out/ranked.<ext>
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Export ranked rows to this file (or directory)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Write a header row in CSV/TSV exports
    #[arg(long)]
    pub include_headers: bool,

    /// Don't print the ranking table
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Config file (if any) first, then command-line overrides.
pub fn build_options(args: &Args) -> crate::Result<AppOptions> {
    let mut opts = match &args.config {
        Some(path) => AppOptions::from_toml_file(path)?,
        None => AppOptions::default(),
    };

    if let Some(input) = &args.input { opts.input = input.clone(); }

    let f = &mut opts.filter;
    if let Some(max) = args.max_price {
        f.max_price = Some(max);
    } else if let Some(budget) = args.budget {
        f.max_price = budget.max_price();
    }
    if let Some(t) = args.wine_type { f.wine_type = t; }
    if let Some(q) = &args.search { f.search_query = Some(q.clone()); }
    if let Some(s) = args.sort { f.sort_by = s; }
    if let Some(n) = args.limit { f.limit = Some(n); }

    if let Some(scheme) = args.scheme { opts.scoring.scheme = scheme; }
    if args.dedup { opts.dedup.enabled = true; }
    if args.any_unit_size { opts.dedup.unit_size = None; }

    let e = &mut opts.export;
    if let Some(fmt) = args.format { e.format = fmt; }
    if let Some(out) = &args.out { e.out = Some(out.clone()); }
    // A format without a target exports to out/ranked.<ext>
    if args.format.is_some() && e.out.is_none() { e.out = Some(e.default_path()); }
    if args.include_headers { e.include_headers = true; }

    opts.validate()?;
    Ok(opts)
}

pub fn run(args: Args) -> Result<()> {
    crate::log::init(args.verbose).wrap_err("Failed to set up logging")?;

    let opts = build_options(&args).wrap_err("Invalid options")?;
    let summary = runner::run(&opts)
        .wrap_err_with(|| format!("Ranking {} failed", opts.input.display()))?;

    if !args.quiet {
        let stdout = io::stdout();
        print_table(stdout.lock(), &summary.ranked)?;
        print_footer(io::stderr().lock(), &summary)?;
    }
    Ok(())
}

/// Plain ranking table for the terminal.
pub fn print_table<W: Write>(mut w: W, rows: &[ScoredWineRecord]) -> io::Result<()> {
    writeln!(w, "{:>4}  {:>5}  {:>6}  {:>7}  {}", "#", "Score", "Value", "Price", "Wine")?;
    for (i, r) in rows.iter().enumerate() {
        let value = r.value_score.map(|v| format!("{v:.1}")).unwrap_or_else(|| s!("-"));
        let price = r.record.price_eur().map(|p| format!("€{p:.2}")).unwrap_or_else(|| s!("-"));
        writeln!(
            w,
            "{:>4}  {:>5.1}  {:>6}  {:>7}  {}",
            i + 1, r.total_score, value, price, r.record.display_name()
        )?;
    }
    w.flush()
}

fn print_footer<W: Write>(mut w: W, s: &RunSummary) -> io::Result<()> {
    writeln!(
        w,
        "{} shown · {} scored · {} considered · {} loaded",
        s.ranked.len(), s.scored, s.considered, s.loaded
    )?;
    if let Some(path) = &s.written {
        writeln!(w, "Wrote {}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "wine_rank", "--type", "RED", "--budget", "under10", "-s", "merlot",
            "--sort", "value", "-n", "5", "--scheme", "linear", "--dedup",
            "--format", "tsv", "-o", "out/", "--include-headers",
        ]);
        let opts = build_options(&args).unwrap();
        assert_eq!(opts.filter.wine_type, WineType::Red);
        assert_eq!(opts.filter.max_price, Some(10.0));
        assert_eq!(opts.filter.search_query.as_deref(), Some("merlot"));
        assert_eq!(opts.filter.sort_by, SortBy::Value);
        assert_eq!(opts.filter.limit, Some(5));
        assert_eq!(opts.scoring.scheme, ScoringScheme::Linear);
        assert!(opts.dedup.enabled);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert!(opts.export.include_headers);
        assert!(opts.export.out_path().unwrap().ends_with("ranked.tsv"));
    }

    #[test]
    fn max_price_wins_over_budget() {
        let args = Args::parse_from(["wine_rank", "--budget", "under5", "--max-price", "12.5"]);
        assert_eq!(build_options(&args).unwrap().filter.max_price, Some(12.5));
    }

    #[test]
    fn format_alone_exports_to_default_path() {
        let args = Args::parse_from(["wine_rank", "--format", "json"]);
        let opts = build_options(&args).unwrap();
        assert_eq!(opts.export.out, Some(PathBuf::from("out").join("ranked.json")));

        let none = build_options(&Args::parse_from(["wine_rank"])).unwrap();
        assert_eq!(none.export.out, None);
    }

    #[test]
    fn any_unit_size_clears_the_size_check() {
        let opts = build_options(&Args::parse_from(["wine_rank", "--dedup", "--any-unit-size"])).unwrap();
        assert!(opts.dedup.enabled);
        assert_eq!(opts.dedup.unit_size, None);

        let default = build_options(&Args::parse_from(["wine_rank", "--dedup"])).unwrap();
        assert_eq!(default.dedup.unit_size.as_deref(), Some("0,75 l"));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let args = Args::parse_from(["wine_rank", "-n", "0"]);
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn table_marks_missing_value() {
        let rows = vec![ScoredWineRecord {
            record: crate::record::WineRecord {
                product_url: "https://x/product/wi1/rioja-reserva".into(),
                ..Default::default()
            },
            total_score: 64.0,
            value_score: None,
        }];
        let mut buf = Vec::new();
        print_table(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("RIOJA RESERVA"));
        assert!(text.lines().nth(1).unwrap().contains(" 64.0 "));
        assert!(text.lines().nth(1).unwrap().contains(" - "));
    }
}
