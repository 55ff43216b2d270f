use storefront_parser::extractors::{
    normalize_text, parse_price_value, CatalogSource, FallbackCatalog, PriceRules,
    GENERIC_TEMPLATES, LAPTOP_TITLES,
};
use storefront_parser::{
    extract_products, ExtractionRequest, ExtractionSource, ProductExtractor, ScraperConfig,
};

fn listing(n: usize) -> String {
    let mut html = String::from("<html><body><ol>");
    for i in 1..=n {
        html.push_str(&format!(
            r#"<li class="ui-search-layout__item">
                <h2 class="ui-search-item__title">Laptop modelo de prueba {i:02} 16GB</h2>
                <span class="price-tag-fraction">{i}.500.000</span>
            </li>"#
        ));
    }
    html.push_str("</ol></body></html>");
    html
}

fn ids_are_sequential(records: &[storefront_parser::ProductRecord]) -> bool {
    records.iter().zip(1u32..).all(|(r, expected)| r.id == expected)
}

#[test]
fn test_output_never_exceeds_limit() {
    let docs = [String::new(), listing(1), listing(4), listing(12)];
    for doc in &docs {
        for limit in 0..8 {
            let records = extract_products(doc, &ExtractionRequest::new("laptop", limit));
            assert!(records.len() <= limit, "limit {limit}: got {}", records.len());
            assert!(ids_are_sequential(&records));
            if limit > 0 {
                assert!(!records.is_empty());
            }
        }
    }
}

#[test]
fn test_empty_document_serves_catalog() {
    for limit in [1, 3, 5, 9] {
        let records = extract_products("", &ExtractionRequest::new("laptop", limit));
        assert_eq!(records.len(), limit.min(5));
        assert_eq!(records[0].title, LAPTOP_TITLES[0]);
    }
}

#[test]
fn test_first_pattern_titles_in_document_order() {
    let html = listing(10);
    let records = extract_products(&html, &ExtractionRequest::new("laptop", 4));
    assert_eq!(records.len(), 4);
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        assert_eq!(record.title, format!("Laptop modelo de prueba {n:02} 16GB"));
        assert_eq!(record.price, format!("${n}.500.000 COP"));
    }
}

#[test]
fn test_normalizers() {
    assert_eq!(parse_price_value("1.234,56"), Some(1234.56));
    let rules = PriceRules::default();
    assert!(storefront_parser::extractors::normalize_price("1.234,56", &rules).is_some());
    assert!(storefront_parser::extractors::normalize_price("12,34", &rules).is_none());
    assert_eq!(
        normalize_text("Caf&eacute; &amp; T&eacute;<b>literal</b>"),
        "Café & Té literal"
    );
}

#[test]
fn test_catalog_selection() {
    let catalog = FallbackCatalog::default();
    assert_eq!(catalog.select("laptop"), CatalogSource::Fixed(LAPTOP_TITLES));
    assert_eq!(catalog.select("bicicleta"), CatalogSource::Templated(GENERIC_TEMPLATES));

    let records = extract_products("<html></html>", &ExtractionRequest::new("bicicleta", 5));
    assert!(records.iter().all(|r| r.title.starts_with("Bicicleta ")));
}

#[test]
fn test_idempotent() {
    let extractor = ProductExtractor::new(&ScraperConfig::default()).unwrap();
    let html = listing(7);
    let request = ExtractionRequest::new("laptop", 5);
    let first = extractor.extract(Some(&html), &request);
    let second = extractor.extract(Some(&html), &request);
    assert_eq!(first, second);
    assert_eq!(first.source, ExtractionSource::Patterns);
}

#[test]
fn test_config_file_drives_extractor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.json");
    std::fs::write(
        &path,
        r#"{"currency": "USD", "price_placeholder": "Price unavailable"}"#,
    )
    .unwrap();

    let config = ScraperConfig::from_path(&path).unwrap();
    let extractor = ProductExtractor::new(&config).unwrap();

    let html = r#"<h2 class="ui-search-item__title">Monitor curvo 27 pulgadas QHD</h2>"#;
    let records = extractor.extract_products(Some(html), &ExtractionRequest::new("monitor", 3));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, "Price unavailable");

    let fallback = extractor.extract_products(None, &ExtractionRequest::new("monitor", 1));
    assert_eq!(fallback[0].price, "$1.899.000 USD");
}

#[test]
fn test_missing_config_file() {
    let err = ScraperConfig::from_path("/nonexistent/storefront.json").unwrap_err();
    assert!(matches!(err, storefront_parser::ConfigError::Io { .. }));
}
