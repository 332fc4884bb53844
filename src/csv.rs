// src/csv.rs
use std::io::{self, Write};

use crate::record::ScoredWineRecord;

/// Column order of delimited exports.
pub const HEADERS: [&str; 15] = [
    "Rank", "Name", "Score", "Value", "Price", "Unit", "User rating", "User ratings",
    "Critic score", "Critic reviews", "Style", "Grape", "Food pairing", "Product URL",
    "Wine-Searcher URL",
];

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Record → cells ---------------- */

fn opt_num<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Price as shown to users: two decimals when parseable, raw text otherwise.
fn price_cell(r: &ScoredWineRecord) -> String {
    match r.record.price_eur() {
        Some(p) => format!("{p:.2}"),
        None => match &r.record.price {
            crate::record::Price::Text(t) => t.clone(),
            _ => s!(),
        },
    }
}

/// One export row; `rank` is 1-based.
pub fn build_export_row(rank: usize, r: &ScoredWineRecord) -> Vec<String> {
    let rec = &r.record;
    vec![
        rank.to_string(),
        rec.display_name(),
        format!("{:.1}", r.total_score),
        r.value_score.map(|v| format!("{v:.1}")).unwrap_or_default(),
        price_cell(r),
        rec.unit_size.clone(),
        opt_num(rec.user_rating),
        opt_num(rec.amount_of_user_ratings),
        opt_num(rec.critic_score),
        opt_num(rec.amount_of_critic_reviews),
        s!(rec.style_text()),
        s!(rec.grape_text()),
        s!(rec.food_text()),
        rec.product_url.clone(),
        rec.wine_searcher_url.clone(),
    ]
}

/// Create a full export string from ranked rows.
/// - `include_headers`: whether to emit a header line
/// - `sep`: character to be used as field/cell separator
pub fn to_export_string(rows: &[ScoredWineRecord], include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    if include_headers {
        let _ = write_row(&mut buf, &HEADERS, sep);
    }
    for (i, r) in rows.iter().enumerate() {
        let _ = write_row(&mut buf, &build_export_row(i + 1, r), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
