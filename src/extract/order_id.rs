// src/extract/order_id.rs
// Order ID extraction from natural-language queries

use regex::Regex;
use std::sync::LazyLock;

/// Tried in order; the first pattern that matches wins.
/// - `order 12345`, `order #12345`
/// - `#12345`
/// - any standalone run of 4+ digits
static ORDER_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?i)order\s*#?(\d+)", r"#(\d+)", r"\b(\d{4,})\b"]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Extract an order ID from a query.
///
/// `None` means the caller should ask for the customer's latest order.
pub fn extract_order_id(query: &str) -> Option<String> {
    ORDER_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(query))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(ORDER_ID_PATTERNS.len(), 3);
    }

    #[test]
    fn test_order_keyword() {
        assert_eq!(extract_order_id("What's the status of order 12345?"), Some("12345".into()));
        assert_eq!(extract_order_id("Check order 67890"), Some("67890".into()));
    }

    #[test]
    fn test_order_keyword_is_case_insensitive() {
        assert_eq!(extract_order_id("ORDER 42"), Some("42".into()));
        assert_eq!(extract_order_id("Order#981"), Some("981".into()));
    }

    #[test]
    fn test_order_with_hash() {
        assert_eq!(extract_order_id("where is order #555"), Some("555".into()));
    }

    #[test]
    fn test_bare_hash() {
        assert_eq!(extract_order_id("tracking for #77"), Some("77".into()));
    }

    #[test]
    fn test_standalone_number_needs_four_digits() {
        assert_eq!(extract_order_id("did 4821 ship yet?"), Some("4821".into()));
        assert_eq!(extract_order_id("did 482 ship yet?"), None);
    }

    #[test]
    fn test_order_keyword_beats_later_numbers() {
        // "order 12" matches the first pattern before the 4-digit fallback is tried
        assert_eq!(extract_order_id("order 12 or maybe 99999"), Some("12".into()));
    }

    #[test]
    fn test_hash_beats_standalone_number() {
        assert_eq!(extract_order_id("12345 or #678"), Some("678".into()));
    }

    #[test]
    fn test_no_id() {
        assert_eq!(extract_order_id("Where is my order?"), None);
        assert_eq!(extract_order_id(""), None);
    }
}
