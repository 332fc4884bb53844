// tests/dedup.rs
//
// Post-scrape cleanup: duplicate listings and unwanted products.
//
use wine_rank::config::options::DedupOptions;
use wine_rank::dedup::dedup;
use wine_rank::WineRecord;

fn listing(product: &str, searcher: &str, unit: &str) -> WineRecord {
    WineRecord {
        product_url: product.into(),
        wine_searcher_url: searcher.into(),
        unit_size: unit.into(),
        ..Default::default()
    }
}

fn on() -> DedupOptions {
    DedupOptions { enabled: true, ..Default::default() }
}

#[test]
fn collapses_by_wine_searcher_url_first_wins() {
    let input = vec![
        listing("https://ah/product/wi1/rioja", "https://ws/find/rioja", "0,75 l"),
        listing("https://ah/product/wi2/malbec", "https://ws/find/malbec", "0,75 l"),
        listing("https://ah/product/wi3/rioja-crianza", "https://ws/find/rioja", "0,75 l"),
        listing("https://ah/product/wi4/rioja-actie", "https://ws/find/rioja", "0,75 l"),
    ];
    let report = dedup(&input, &on());

    assert_eq!(report.original, 4);
    assert_eq!(report.after_dedup, 2);
    assert_eq!(report.after_filter, 2);

    let first = &report.records[0];
    assert_eq!(first.product_url, "https://ah/product/wi1/rioja");
    assert_eq!(
        first.alternative_urls,
        vec!["https://ah/product/wi3/rioja-crianza", "https://ah/product/wi4/rioja-actie"]
    );
    assert_eq!(report.records[1].product_url, "https://ah/product/wi2/malbec");
    assert!(report.records[1].alternative_urls.is_empty());

    // input untouched
    assert!(input.iter().all(|r| r.alternative_urls.is_empty()));
}

#[test]
fn drops_wrong_unit_size_and_excluded_terms() {
    let input = vec![
        listing("https://ah/product/wi1/rioja", "ws/rioja", "0,75 l"),
        listing("https://ah/product/wi2/rioja-magnum", "ws/rioja-magnum", "1,5 l"),
        listing("https://ah/product/wi3/BACARDI-razz", "ws/bacardi-razz", "0,75 l"),
        listing("https://ah/product/wi4/bag-in-box", "ws/bib", "3 l"),
    ];
    let report = dedup(&input, &on());
    assert_eq!(report.after_dedup, 4);
    assert_eq!(report.after_filter, 1);
    assert_eq!(report.records[0].product_url, "https://ah/product/wi1/rioja");
}

#[test]
fn unit_size_check_can_be_disabled() {
    let input = vec![
        listing("a", "ws/a", "1,5 l"),
        listing("b", "ws/b", ""),
    ];
    let opts = DedupOptions { enabled: true, unit_size: None, excluded_terms: Vec::new() };
    assert_eq!(dedup(&input, &opts).after_filter, 2);
}

#[test]
fn filter_runs_after_merge() {
    // The kept (first) listing decides; a 0,75 l duplicate can't rescue a
    // first listing with the wrong size.
    let input = vec![
        listing("a-magnum", "ws/a", "1,5 l"),
        listing("a-bottle", "ws/a", "0,75 l"),
    ];
    let report = dedup(&input, &on());
    assert_eq!(report.after_dedup, 1);
    assert_eq!(report.after_filter, 0);
}

#[test]
fn rerun_carries_earlier_alternatives_along() {
    let first = dedup(
        &[
            listing("https://ah/product/wi1/rioja", "ws/rioja", "0,75 l"),
            listing("https://ah/product/wi2/rioja-actie", "ws/rioja", "0,75 l"),
        ],
        &on(),
    );

    // A later scrape lists the wine again ahead of the merged record
    let mut input = vec![listing("https://ah/product/wi7/rioja-nieuw", "ws/rioja", "0,75 l")];
    input.extend(first.records);
    let second = dedup(&input, &on());

    assert_eq!(second.after_dedup, 1);
    let kept = &second.records[0];
    assert_eq!(kept.product_url, "https://ah/product/wi7/rioja-nieuw");
    assert_eq!(
        kept.alternative_urls,
        vec!["https://ah/product/wi1/rioja", "https://ah/product/wi2/rioja-actie"]
    );

    // Deduplicating an already clean list changes nothing
    let again = dedup(&second.records, &on());
    assert_eq!(again.records, second.records);
}
