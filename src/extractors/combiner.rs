//! Positional pairing of extracted titles and prices

use super::{number_records, ProductRecord};

/// Pair `titles[i]` with `prices[i]` and number the results from 1.
///
/// Leftover titles are appended with `placeholder` as their price while
/// there is room under `limit`. Pairing is by position only; an unrelated
/// price can land next to a title when the patterns fire unevenly.
pub fn combine(
    titles: Vec<String>,
    prices: Vec<String>,
    limit: usize,
    placeholder: &str,
) -> Vec<ProductRecord> {
    let paired = titles.len().min(prices.len()).min(limit);
    let total = if paired < limit {
        titles.len().min(limit)
    } else {
        paired
    };

    let mut prices = prices.into_iter().take(paired);
    let pairs = titles.into_iter().take(total).map(|title| {
        let price = prices.next().unwrap_or_else(|| placeholder.to_string());
        (title, price)
    });

    number_records(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairs_by_position() {
        let records = combine(
            strings(&["Laptop uno largo", "Laptop dos largo", "Laptop tres largo"]),
            strings(&["$1.000 COP", "$2.000 COP", "$3.000 COP", "$4.000 COP"]),
            2,
            "Consultar precio",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Laptop uno largo");
        assert_eq!(records[0].price, "$1.000 COP");
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].price, "$2.000 COP");
    }

    #[test]
    fn test_leftover_titles_get_placeholder() {
        let records = combine(
            strings(&[
                "Titulo uno largo",
                "Titulo dos largo",
                "Titulo tres largo",
                "Titulo cuatro",
            ]),
            strings(&["$5.000 COP"]),
            3,
            "Consultar precio",
        );
        let prices: Vec<_> = records.iter().map(|r| r.price.as_str()).collect();
        assert_eq!(prices, ["$5.000 COP", "Consultar precio", "Consultar precio"]);
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_prices_without_titles_yield_nothing() {
        assert!(combine(vec![], strings(&["$5.000 COP"]), 5, "x").is_empty());
        assert!(combine(strings(&["Titulo uno largo"]), vec![], 0, "x").is_empty());
    }
}
