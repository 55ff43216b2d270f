//! Sample catalogs served when nothing usable is extracted
//!
//! Selection is a priority-ordered list of keyword rules; the first rule
//! whose keyword occurs in the lowercased query wins, otherwise the query is
//! interpolated into generic templates.

use super::price::format_price;
use super::{number_records, ProductRecord};

pub const LAPTOP_TITLES: &[&str] = &[
    "Laptop HP 15.6\" Intel Core i5 8GB RAM 256GB SSD Windows 11",
    "Lenovo IdeaPad 3 15\" AMD Ryzen 5 8GB 512GB SSD",
    "ASUS VivoBook 14\" Intel i3 4GB 128GB Gris",
    "Acer Aspire 5 15.6\" Intel i7 16GB 1TB SSD",
    "Dell Inspiron 15 3000 Intel Celeron 4GB 500GB",
];

pub const PHONE_TITLES: &[&str] = &[
    "Samsung Galaxy A54 5G 128GB 8GB RAM Violeta",
    "iPhone 14 128GB Azul Medianoche Liberado",
    "Xiaomi Redmi Note 12 Pro 256GB 8GB RAM",
    "Motorola Edge 30 Neo 128GB 8GB RAM Azul",
    "OPPO A78 5G 128GB 8GB RAM Negro",
];

pub const TV_TITLES: &[&str] = &[
    "Smart TV Samsung 55\" 4K UHD Crystal UN55AU7000",
    "LG NanoCell 50\" 4K AI ThinQ 50NANO75SPA",
    "Sony Bravia 65\" 4K HDR Smart TV KD-65X80K",
    "TCL 43\" FHD Smart TV Android 43S5400A",
    "Kalley 32\" HD Smart TV K-LED32FHDT2",
];

/// Suffixes appended to the title-cased query for unknown categories.
pub const GENERIC_TEMPLATES: &[&str] = &[
    "Premium Modelo 2024 Alta Calidad",
    "Económico Excelente Relación Precio",
    "Profesional Especificaciones Top",
    "Estándar Uso Diario Confiable",
    "Compacto Diseño Moderno",
];

/// Prices paired positionally with catalog titles, wrapping around.
pub const SAMPLE_PRICES: &[&str] = &[
    "1.899.000", "2.199.000", "1.299.000", "3.499.000", "999.000",
    "1.599.000", "2.799.000", "1.149.000", "2.299.000", "849.000",
];

/// Where a rule's titles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fixed product titles.
    Fixed(&'static [&'static str]),
    /// Suffixes appended to the title-cased query.
    Templated(&'static [&'static str]),
}

impl CatalogSource {
    fn titles(&self, query: &str) -> Vec<String> {
        match self {
            CatalogSource::Fixed(titles) => titles.iter().map(|t| t.to_string()).collect(),
            CatalogSource::Templated(suffixes) => {
                let subject = title_case(query.trim());
                suffixes
                    .iter()
                    .map(|suffix| format!("{subject} {suffix}").trim().to_string())
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRule {
    /// Lowercase substrings; any one matching selects the rule.
    pub keywords: &'static [&'static str],
    pub source: CatalogSource,
}

impl CatalogRule {
    fn matches(&self, query_lower: &str) -> bool {
        self.keywords.iter().any(|k| query_lower.contains(k))
    }
}

/// Fallback catalog selection and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackCatalog {
    pub rules: Vec<CatalogRule>,
    pub default: CatalogSource,
    pub prices: &'static [&'static str],
    /// Upper bound on fallback records regardless of the requested limit.
    pub max_items: usize,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self {
            rules: vec![
                CatalogRule {
                    keywords: &["laptop", "computador"],
                    source: CatalogSource::Fixed(LAPTOP_TITLES),
                },
                CatalogRule {
                    keywords: &["celular", "telefono"],
                    source: CatalogSource::Fixed(PHONE_TITLES),
                },
                CatalogRule {
                    keywords: &["tv", "televisor"],
                    source: CatalogSource::Fixed(TV_TITLES),
                },
            ],
            default: CatalogSource::Templated(GENERIC_TEMPLATES),
            prices: SAMPLE_PRICES,
            max_items: 5,
        }
    }
}

impl FallbackCatalog {
    /// The source chosen for `query`.
    pub fn select(&self, query: &str) -> CatalogSource {
        let query_lower = query.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&query_lower))
            .map(|rule| rule.source)
            .unwrap_or(self.default)
    }

    /// Sample records for `query`, at most `min(limit, max_items)`.
    pub fn records(&self, query: &str, limit: usize, currency: &str) -> Vec<ProductRecord> {
        let take = limit.min(self.max_items);
        let titles = self.select(query).titles(query);

        let pairs = titles.into_iter().take(take).enumerate().map(|(i, title)| {
            let price = if self.prices.is_empty() {
                String::new()
            } else {
                format_price(self.prices[i % self.prices.len()], currency)
            };
            (title, price)
        });

        number_records(pairs)
    }
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_keyword() {
        let catalog = FallbackCatalog::default();
        assert_eq!(catalog.select("laptop"), CatalogSource::Fixed(LAPTOP_TITLES));
        assert_eq!(catalog.select("Computador gamer"), CatalogSource::Fixed(LAPTOP_TITLES));
        assert_eq!(catalog.select("CELULAR barato"), CatalogSource::Fixed(PHONE_TITLES));
        assert_eq!(catalog.select("Smart TV"), CatalogSource::Fixed(TV_TITLES));
        assert_eq!(catalog.select("bicicleta"), CatalogSource::Templated(GENERIC_TEMPLATES));
    }

    #[test]
    fn test_laptop_records() {
        let records = FallbackCatalog::default().records("laptop", 5, "COP");
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].title, LAPTOP_TITLES[0]);
        assert_eq!(records[0].price, "$1.899.000 COP");
        assert_eq!(records[4].price, "$999.000 COP");
    }

    #[test]
    fn test_generic_records_use_query() {
        let records = FallbackCatalog::default().records("bicicleta de ruta", 2, "COP");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Bicicleta De Ruta Premium Modelo 2024 Alta Calidad");
        assert_eq!(records[1].title, "Bicicleta De Ruta Económico Excelente Relación Precio");
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn test_capped_at_five() {
        let records = FallbackCatalog::default().records("celular", 50, "COP");
        assert_eq!(records.len(), 5);
        assert!(FallbackCatalog::default().records("celular", 0, "COP").is_empty());
    }

    #[test]
    fn test_prices_wrap_around() {
        let catalog = FallbackCatalog {
            prices: &["100.000", "200.000"],
            ..FallbackCatalog::default()
        };
        let prices: Vec<String> = catalog
            .records("televisor", 5, "USD")
            .into_iter()
            .map(|r| r.price)
            .collect();
        assert_eq!(
            prices,
            [
                "$100.000 USD",
                "$200.000 USD",
                "$100.000 USD",
                "$200.000 USD",
                "$100.000 USD"
            ]
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("bicicleta"), "Bicicleta");
        assert_eq!(title_case("sILLA gamer-pro"), "Silla Gamer-Pro");
        assert_eq!(title_case(""), "");
    }
}
