//! Human and machine renderings of extraction results

use std::fmt::Write;

use crate::extractors::{ExtractionReport, ProductRecord};

const RULE_WIDTH: usize = 70;
const ITEM_RULE_WIDTH: usize = 50;

/// Console listing: a banner, one block per product and a total line.
pub fn render_text(records: &[ProductRecord]) -> String {
    if records.is_empty() {
        return "No products to show\n".to_string();
    }

    let rule = "=".repeat(RULE_WIDTH);
    let item_rule = "-".repeat(ITEM_RULE_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "SEARCH RESULTS");
    let _ = writeln!(out, "{rule}");
    for record in records {
        let _ = writeln!(out);
        let _ = writeln!(out, "PRODUCT #{}", record.id);
        let _ = writeln!(out, "Title: {}", record.title);
        let _ = writeln!(out, "Price: {}", record.price);
        let _ = writeln!(out, "{item_rule}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {} products", records.len());
    let _ = writeln!(out, "{rule}");
    out
}

/// Pretty-printed JSON of the whole report.
pub fn render_json(report: &ExtractionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
