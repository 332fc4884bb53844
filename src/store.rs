// src/store.rs
//
// Record list I/O. The scraper writes a flat JSON array; this is the only
// place that knows about files. Structural problems (not an array, an
// element that isn't an object) fail fast. Everything finer-grained is left
// to the lenient field decoding in `record` and the eligibility gate.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{json_kind, Error, Result};
use crate::file::ensure_parent;
use crate::record::WineRecord;

/// Validate shape and decode an already-parsed JSON value.
pub fn parse_records(value: Value) -> Result<Vec<WineRecord>> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(Error::NotAnArray { found: json_kind(&other) }),
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(Error::RecordNotObject { index, found: json_kind(&item) });
        }
        let rec: WineRecord = serde_json::from_value(item)
            .map_err(|source| Error::InvalidRecord { index, source })?;
        out.push(rec);
    }
    Ok(out)
}

pub fn parse_records_str(text: &str) -> Result<Vec<WineRecord>> {
    parse_records(serde_json::from_str(text)?)
}

pub fn load_records(path: &Path) -> Result<Vec<WineRecord>> {
    let file = fs::File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let records = parse_records(value)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Pretty-printed JSON, parent directories created as needed.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    ensure_parent(path)?;
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, data)?;
    writeln!(out)?;
    out.flush()?;
    debug!("Wrote JSON to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_array_top_level() {
        let err = parse_records(json!({"productUrl": "p"})).unwrap_err();
        assert!(matches!(err, Error::NotAnArray { found: "an object" }));
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn rejects_non_object_element_with_index() {
        let err = parse_records(json!([{"productUrl": "a"}, 42])).unwrap_err();
        assert!(matches!(err, Error::RecordNotObject { index: 1, found: "a number" }));
    }

    #[test]
    fn rejects_wrong_text_type() {
        let err = parse_records(json!([{"productUrl": 7}])).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn null_alternative_urls_do_not_fail_the_load() {
        let recs = parse_records(json!([{"productUrl": "a", "alternativeUrls": null}])).unwrap();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].alternative_urls.is_empty());
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(parse_records(json!([])).unwrap().is_empty());
    }
}
