// src/record.rs
//
// Wine records as they come out of the scraper, plus the scored form the
// ranking pipeline hands to frontends.
//
// Scraped JSON is messy: numbers arrive as numbers, as strings, or as null,
// depending on which scraper pass wrote them. Numeric fields are therefore
// decoded leniently (anything unreadable becomes "absent"), while text
// fields still insist on string-or-null so genuinely broken records surface
// as errors instead of silently vanishing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One product listing with its Wine-Searcher ratings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineRecord {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub product_url: String,

    /// Other listings of the same wine, filled in by `dedup`.
    #[serde(default, deserialize_with = "list_or_empty", skip_serializing_if = "Vec::is_empty")]
    pub alternative_urls: Vec<String>,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub img_src: String,

    #[serde(default)]
    pub price: Price,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub unit_size: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub wine_searcher_url: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub critic_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub user_rating: Option<f64>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub amount_of_user_ratings: Option<u64>,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(default)]
    pub grape_variety: Option<String>,

    #[serde(default)]
    pub food_pairing: Option<String>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub amount_of_critic_reviews: Option<u64>,
}

impl WineRecord {
    /// Last path segment of the product URL ("" if there is none).
    pub fn slug(&self) -> &str {
        self.product_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("")
    }

    /// Human-readable name derived from the product slug:
    /// "la-palma-merlot" → "LA PALMA MERLOT".
    pub fn display_name(&self) -> String {
        self.slug().replace('-', " ").to_uppercase()
    }

    /// Parsed price in euros, if the listing has a usable one.
    pub fn price_eur(&self) -> Option<f64> {
        self.price.value()
    }

    pub fn style_text(&self) -> &str { self.style.as_deref().unwrap_or("") }
    pub fn grape_text(&self) -> &str { self.grape_variety.as_deref().unwrap_or("") }
    pub fn food_text(&self) -> &str { self.food_pairing.as_deref().unwrap_or("") }
}

/// A record that passed the eligibility gate, with its derived scores.
///
/// Serializes flat: the original record fields plus `totalScore` and
/// `valueScore` (`null` when the price is unusable).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredWineRecord {
    #[serde(flatten)]
    pub record: WineRecord,
    pub total_score: f64,
    pub value_score: Option<f64>,
}

/* ---------------- Price ---------------- */

/// Price exactly as scraped. Kept raw so output round-trips the input;
/// use [`Price::value`] for arithmetic.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Price {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Price {
    /// Parsed numeric value. `None` for missing, non-numeric or non-finite
    /// prices. Zero and negative values are returned as-is; callers decide.
    pub fn value(&self) -> Option<f64> {
        match self {
            Price::Number(n) if n.is_finite() => Some(*n),
            Price::Number(_) => None,
            Price::Text(s) => parse_price_text(s),
            Price::Missing => None,
        }
    }
}

impl From<f64> for Price {
    fn from(n: f64) -> Self { Price::Number(n) }
}

impl From<&str> for Price {
    fn from(s: &str) -> Self { Price::Text(s.to_string()) }
}

impl From<String> for Price {
    fn from(s: String) -> Self { Price::Text(s) }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Number(n) => ser.serialize_f64(*n),
            Price::Text(s) => ser.serialize_str(s),
            Price::Missing => ser.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        // Anything that isn't a number or a string is "no price", not an error.
        Ok(match Value::deserialize(de)? {
            Value::Number(n) => n.as_f64().map(Price::Number).unwrap_or(Price::Missing),
            Value::String(s) => Price::Text(s),
            _ => Price::Missing,
        })
    }
}

/// "7.50", "7,50", "€ 7,50", "EUR 7.50" → 7.5
pub fn parse_price_text(text: &str) -> Option<f64> {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix('€') {
        s = rest.trim_start();
    } else if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("eur")) {
        s = s[3..].trim_start();
    }
    if s.is_empty() { return None; }

    let normalized;
    if !s.contains('.') && s.matches(',').count() == 1 {
        normalized = s.replace(',', ".");
        s = &normalized;
    }

    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/* ---------------- Lenient field decoding ---------------- */

fn number_from_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let v = Value::deserialize(de)?;
    Ok(number_from_value(&v))
}

/// Counts must be non-negative whole numbers; "12" and 12.0 are accepted.
/// A fractional count such as 2.5 is not a count and decodes as absent,
/// which keeps the record out of the eligibility gate.
fn lenient_count<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    let v = Value::deserialize(de)?;
    if let Some(n) = v.as_u64() {
        return Ok(Some(n));
    }
    Ok(number_from_value(&v)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as u64))
}

fn text_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

fn list_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_text_variants() {
        assert_eq!(parse_price_text("7.50"), Some(7.5));
        assert_eq!(parse_price_text(" 7,50 "), Some(7.5));
        assert_eq!(parse_price_text("€ 12,99"), Some(12.99));
        assert_eq!(parse_price_text("EUR 4.25"), Some(4.25));
        assert_eq!(parse_price_text("abc"), None);
        assert_eq!(parse_price_text(""), None);
        assert_eq!(parse_price_text("1,234.50"), None);
        assert_eq!(parse_price_text("inf"), None);
    }

    #[test]
    fn slug_and_display_name() {
        let r = WineRecord {
            product_url: "https://www.ah.nl/producten/product/wi123/la-palma-merlot".into(),
            ..Default::default()
        };
        assert_eq!(r.slug(), "la-palma-merlot");
        assert_eq!(r.display_name(), "LA PALMA MERLOT");

        let trailing = WineRecord { product_url: "https://x/y/casillero-rood/".into(), ..Default::default() };
        assert_eq!(trailing.slug(), "casillero-rood");

        let empty = WineRecord::default();
        assert_eq!(empty.slug(), "");
    }

    #[test]
    fn lenient_numbers_from_scraper_output() {
        let r: WineRecord = serde_json::from_str(r#"{
            "productUrl": "p",
            "userRating": "4.1",
            "amountOfUserRatings": 12.0,
            "criticScore": null,
            "amountOfCriticReviews": "-3",
            "price": 6.49
        }"#).unwrap();
        assert_eq!(r.user_rating, Some(4.1));
        assert_eq!(r.amount_of_user_ratings, Some(12));
        assert_eq!(r.critic_score, None);
        assert_eq!(r.amount_of_critic_reviews, None);
        assert_eq!(r.price_eur(), Some(6.49));
    }

    #[test]
    fn null_text_fields_become_empty() {
        let r: WineRecord = serde_json::from_str(
            r#"{ "productUrl": null, "unitSize": null, "style": null }"#
        ).unwrap();
        assert_eq!(r.product_url, "");
        assert_eq!(r.unit_size, "");
        assert_eq!(r.style_text(), "");
    }

    #[test]
    fn null_alternative_urls_become_empty() {
        let r: WineRecord = serde_json::from_str(
            r#"{ "productUrl": "a", "alternativeUrls": null }"#
        ).unwrap();
        assert!(r.alternative_urls.is_empty());

        let listed: WineRecord = serde_json::from_str(
            r#"{ "alternativeUrls": ["https://shop/product/wi2/b"] }"#
        ).unwrap();
        assert_eq!(listed.alternative_urls, vec!["https://shop/product/wi2/b"]);
    }

    #[test]
    fn fractional_counts_are_absent() {
        let r: WineRecord = serde_json::from_str(
            r#"{ "userRating": 4, "amountOfUserRatings": 2.5, "criticScore": 90, "amountOfCriticReviews": "1.5" }"#
        ).unwrap();
        assert_eq!(r.amount_of_user_ratings, None);
        assert_eq!(r.amount_of_critic_reviews, None);
        assert!(!crate::scoring::is_eligible(&r));
    }

    #[test]
    fn odd_price_types_are_missing_not_errors() {
        let r: WineRecord = serde_json::from_str(r#"{ "price": true }"#).unwrap();
        assert_eq!(r.price, Price::Missing);
        assert_eq!(r.price_eur(), None);
    }

    #[test]
    fn scored_record_serializes_flat() {
        let scored = ScoredWineRecord {
            record: WineRecord { product_url: "p".into(), price: "7.50".into(), ..Default::default() },
            total_score: 71.1,
            value_score: None,
        };
        let v = serde_json::to_value(&scored).unwrap();
        assert_eq!(v["productUrl"], "p");
        assert_eq!(v["price"], "7.50");
        assert_eq!(v["totalScore"], 71.1);
        assert!(v["valueScore"].is_null());
        assert!(v.get("alternativeUrls").is_none());
    }
}
