//! The fixed list of supported currencies and search over it.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
}

impl Currency {
    /// Case-insensitive substring match on code or name.
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.code.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

pub const CATALOG: &[Currency] = &[
    Currency { code: "EUR", name: "Euro (European Union)" },
    Currency { code: "USD", name: "Dollar (United States)" },
    Currency { code: "GBP", name: "Pound (United Kingdom)" },
    Currency { code: "JPY", name: "Yen (Japan)" },
    Currency { code: "CHF", name: "Franc (Switzerland)" },
    Currency { code: "AUD", name: "Dollar (Australia)" },
    Currency { code: "CAD", name: "Dollar (Canada)" },
    Currency { code: "CNY", name: "Yuan (China)" },
    Currency { code: "MAD", name: "Dirham (Morocco)" },
    Currency { code: "DZD", name: "Dinar (Algeria)" },
    Currency { code: "TND", name: "Dinar (Tunisia)" },
    Currency { code: "EGP", name: "Pound (Egypt)" },
    Currency { code: "NGN", name: "Naira (Nigeria)" },
    Currency { code: "ZAR", name: "Rand (South Africa)" },
    Currency { code: "INR", name: "Rupee (India)" },
    Currency { code: "BRL", name: "Real (Brazil)" },
    Currency { code: "MXN", name: "Peso (Mexico)" },
    Currency { code: "AED", name: "Dirham (United Arab Emirates)" },
    Currency { code: "SAR", name: "Riyal (Saudi Arabia)" },
    Currency { code: "RUB", name: "Ruble (Russia)" },
    Currency { code: "SGD", name: "Dollar (Singapore)" },
    Currency { code: "NZD", name: "Dollar (New Zealand)" },
    Currency { code: "TRY", name: "Lira (Turkey)" },
    Currency { code: "SEK", name: "Krona (Sweden)" },
    Currency { code: "NOK", name: "Krone (Norway)" },
    Currency { code: "DKK", name: "Krone (Denmark)" },
];

/// Returns the catalog entries matching `search`, in catalog order.
///
/// An empty search matches every entry.
pub fn filter(search: &str) -> Vec<&'static Currency> {
    CATALOG.iter().filter(|c| c.matches(search)).collect()
}

/// Looks up a currency by its exact code, ignoring case.
pub fn find(code: &str) -> Option<&'static Currency> {
    CATALOG.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search_returns_full_catalog() {
        let all = filter("");
        assert_eq!(all.len(), CATALOG.len());
        assert_eq!(all[0].code, "EUR");
        assert_eq!(all[all.len() - 1].code, "DKK");
    }

    #[test]
    fn test_filter_matches_code_case_insensitively() {
        let upper = filter("GBP");
        let lower = filter("gbp");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].code, "GBP");
    }

    #[test]
    fn test_filter_matches_name_substring_in_order() {
        let dollars = filter("dollar");
        let codes: Vec<&str> = dollars.iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["USD", "AUD", "CAD", "SGD", "NZD"]);

        let dinars = filter("DINAR");
        let codes: Vec<&str> = dinars.iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["DZD", "TND"]);
    }

    #[test]
    fn test_filter_every_result_matches() {
        for search in ["a", "Kr", "(", "zz", "ud"] {
            let needle = search.to_lowercase();
            for currency in filter(search) {
                assert!(
                    currency.code.to_lowercase().contains(&needle)
                        || currency.name.to_lowercase().contains(&needle),
                    "{currency} should match {search}"
                );
            }
        }
    }

    #[test]
    fn test_filter_by_english_unit_names() {
        let codes = |search: &str| filter(search).iter().map(|c| c.code).collect::<Vec<_>>();
        assert_eq!(codes("pound"), vec!["GBP", "EGP"]);
        assert_eq!(codes("rupee"), vec!["INR"]);
        assert_eq!(codes("krona"), vec!["SEK"]);
        assert_eq!(codes("lira"), vec!["TRY"]);
        assert!(codes("livre").is_empty());
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter("bitcoin").is_empty());
    }

    #[test]
    fn test_find_by_code() {
        assert_eq!(find("jpy").map(|c| c.code), Some("JPY"));
        assert!(find("XYZ").is_none());
        assert!(find("Yen").is_none());
    }
}
