//! Price text normalization.

use super::error::ExtractionError;
use super::node::CardNode;
use crate::amazon::selectors::search;

/// A price as shown on the page plus its integer amount.
///
/// Only constructible through [`PriceNormalizer`] or [`NormalizedPrice::missing`],
/// so `amount` always derives from `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPrice {
    raw: String,
    amount: u64,
}

impl NormalizedPrice {
    /// Raw text recorded when a card shows no price.
    pub const MISSING_RAW: &'static str = "0";

    /// The sentinel for a card without a price element.
    pub fn missing() -> Self {
        Self { raw: Self::MISSING_RAW.to_string(), amount: 0 }
    }

    /// The text as rendered, separators included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The separator-stripped integer amount.
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Converts locale-formatted whole prices ("1,234") into integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceNormalizer {
    separator: char,
}

impl PriceNormalizer {
    /// Creates a normalizer stripping the given thousands separator.
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Returns the thousands separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Normalizes an optional price token.
    ///
    /// `None` (no price element) yields the "0" sentinel. Text that is not a
    /// whole number once separators are removed is an error, never a zero.
    pub fn normalize(&self, raw: Option<&str>) -> Result<NormalizedPrice, ExtractionError> {
        let Some(raw) = raw else {
            return Ok(NormalizedPrice::missing());
        };

        let digits: String = raw.chars().filter(|c| !self.is_separator(*c)).collect();
        let invalid = || ExtractionError::InvalidPrice { raw: raw.to_string(), separator: self.separator };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let amount = digits.parse().map_err(|_| invalid())?;
        Ok(NormalizedPrice { raw: raw.to_string(), amount })
    }

    /// Space-grouping locales render the gap as a no-break, narrow no-break
    /// or plain space; any of them counts as the separator.
    fn is_separator(&self, c: char) -> bool {
        c == self.separator || (self.separator.is_whitespace() && c.is_whitespace())
    }
}

impl Default for PriceNormalizer {
    fn default() -> Self {
        Self::new(',')
    }
}

/// Reads the whole-price text of a card, if it shows one.
///
/// Only the element's own text is used: storefronts with fractional prices
/// nest the decimal mark (`.a-price-decimal`) inside the whole part.
pub fn read_price<N: CardNode>(card: &N) -> Option<String> {
    card.select_first(&search::PRICE_WHOLE).map(|e| e.own_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_normalize_with_separators() {
        let normalizer = PriceNormalizer::default();
        let price = normalizer.normalize(Some("1,234")).unwrap();
        assert_eq!(price.raw(), "1,234");
        assert_eq!(price.amount(), 1234);

        assert_eq!(normalizer.normalize(Some("2,500")).unwrap().amount(), 2500);
        assert_eq!(normalizer.normalize(Some("1,234,567")).unwrap().amount(), 1_234_567);
        assert_eq!(normalizer.normalize(Some("980")).unwrap().amount(), 980);
    }

    #[test]
    fn test_normalize_missing() {
        let price = PriceNormalizer::default().normalize(None).unwrap();
        assert_eq!(price, NormalizedPrice::missing());
        assert_eq!(price.raw(), "0");
        assert_eq!(price.amount(), 0);
    }

    #[test]
    fn test_normalize_rejects_residue() {
        let normalizer = PriceNormalizer::default();
        for bad in ["", "¥1,234", "12.99", "1 234", "N/A", "+5", "-5", ","] {
            let err = normalizer.normalize(Some(bad)).unwrap_err();
            assert_eq!(
                err,
                ExtractionError::InvalidPrice { raw: bad.to_string(), separator: ',' },
                "expected rejection for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_normalize_rejects_overflow() {
        let result = PriceNormalizer::default().normalize(Some("99,999,999,999,999,999,999"));
        assert!(result.is_err());
    }

    #[test]
    fn test_period_separator() {
        let normalizer = PriceNormalizer::new('.');
        assert_eq!(normalizer.separator(), '.');
        let price = normalizer.normalize(Some("1.234")).unwrap();
        assert_eq!(price.raw(), "1.234");
        assert_eq!(price.amount(), 1234);
        assert!(normalizer.normalize(Some("1,234")).is_err());
    }

    #[test]
    fn test_space_separator() {
        let normalizer = PriceNormalizer::new('\u{a0}');
        let price = normalizer.normalize(Some("1\u{a0}234")).unwrap();
        assert_eq!(price.raw(), "1\u{a0}234");
        assert_eq!(price.amount(), 1234);

        assert_eq!(normalizer.normalize(Some("12\u{202f}345")).unwrap().amount(), 12345);
        assert!(normalizer.normalize(Some("1.234")).is_err());
    }

    #[test]
    fn test_read_price_ignores_decimal_mark() {
        let document = Html::parse_fragment(
            r#"<span class="a-price"><span aria-hidden="true">
                 <span class="a-price-symbol">$</span><span class="a-price-whole">1,234<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span>
               </span></span>"#,
        );
        let raw = read_price(&document.root_element());
        assert_eq!(raw.as_deref(), Some("1,234"));
        assert_eq!(PriceNormalizer::new(',').normalize(raw.as_deref()).unwrap().amount(), 1234);

        let document = Html::parse_fragment(
            r#"<span class="a-price-whole">1.234<span class="a-price-decimal">,</span></span><span class="a-price-fraction">56</span>"#,
        );
        let raw = read_price(&document.root_element());
        assert_eq!(raw.as_deref(), Some("1.234"));
        assert_eq!(PriceNormalizer::new('.').normalize(raw.as_deref()).unwrap().amount(), 1234);
    }

    #[test]
    fn test_read_price() {
        let document = Html::parse_fragment(
            r#"<span class="a-price"><span class="a-price-whole"> 3,980 </span></span>"#,
        );
        assert_eq!(read_price(&document.root_element()), Some("3,980".to_string()));

        let document = Html::parse_fragment("<span>Currently unavailable.</span>");
        assert_eq!(read_price(&document.root_element()), None);
    }
}
