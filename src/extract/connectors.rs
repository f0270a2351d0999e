// src/extract/connectors.rs
// Connector type detection in web search results

use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of connectors reported per search
pub const MAX_CONNECTORS: usize = 10;

/// Connector patterns in priority order. Matching is case-insensitive.
const CONNECTOR_PATTERNS: &[&str] = &[
    // USB
    r"\bUSB[\s-]?C\b",
    r"\bUSB-C\b",
    r"\bUSB Type-C\b",
    r"\bUSB[\s-]?A\b",
    r"\bUSB-A\b",
    r"\bUSB Type-A\b",
    r"\bUSB[\s-]?B\b",
    r"\bUSB-B\b",
    r"\bUSB[\s-]?Micro\b",
    r"\bMicro USB\b",
    r"\bUSB[\s-]?Mini\b",
    r"\bMini USB\b",
    // Display
    r"\bHDMI\b",
    r"\bDisplayPort\b",
    r"\bDP\b",
    r"\bMini DisplayPort\b",
    r"\bMini DP\b",
    r"\bDVI[-]?[DI]?\b",
    r"\bVGA\b",
    // Apple / mobile
    r"\bLightning\b",
    r"\bThunderbolt\b",
    // Audio
    r"\b3\.5mm\b",
    r"\b3\.5\s?mm\b",
    r"\bheadphone jack\b",
    r"\b6\.35mm\b",
    r#"\b1/4["\s]inch\b"#,
    r"\b2\.5mm\b",
    r"\bXLR\b",
    r"\bRCA\b",
    // Networking
    r"\bRJ45\b",
    r"\bRJ-45\b",
    r"\bEthernet\b",
    r"\bRJ11\b",
    r"\bRJ-11\b",
    // Power
    r"\bPower Type [A-Z]\b",
    r"\bIEC\b",
    r"\bSchuko\b",
    // Other
    r"\bBNC\b",
    r"\bSATA\b",
    r"\beSATA\b",
];

static CONNECTOR_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CONNECTOR_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(&format!("(?i){}", p)).ok())
        .collect()
});

/// Key used to treat "USB-C", "usb c" and "USB C" as the same connector
fn dedup_key(connector: &str) -> String {
    connector.to_uppercase().replace('-', " ").replace("  ", " ")
}

/// Join title, snippet and htmlSnippet of every search item into one corpus
fn search_corpus(search_data: &Value) -> String {
    let Some(items) = search_data.get("items").and_then(Value::as_array) else {
        return String::new();
    };

    items
        .iter()
        .flat_map(|item| {
            ["title", "snippet", "htmlSnippet"]
                .into_iter()
                .filter_map(move |key| item.get(key).and_then(Value::as_str))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract connector names from a Google Custom Search response.
///
/// Connectors are reported as written in the results, ordered by pattern
/// priority and then by position, first spelling wins.
pub fn extract_connector_types(search_data: &Value) -> Vec<String> {
    let corpus = search_corpus(search_data);
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for re in CONNECTOR_REGEXES.iter() {
        for m in re.find_iter(&corpus) {
            let connector = m.as_str().trim();
            if seen.insert(dedup_key(connector)) {
                found.push(connector.to_string());
            }
        }
    }

    found.truncate(MAX_CONNECTORS);
    found
}
