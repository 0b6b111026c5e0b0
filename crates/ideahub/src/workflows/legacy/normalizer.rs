use std::collections::BTreeMap;

use crate::workflows::ideas::{fields, DynamicValue};

/// Collapse whitespace, strip BOM/zero-width characters, and lowercase so
/// legacy labels compare reliably.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Canonical `dynamic_data` key for a legacy spelling, if one is recognized.
pub(crate) fn canonical_field_key(key: &str) -> Option<&'static str> {
    let folded: String = key
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect::<String>()
        .to_ascii_lowercase();

    match folded.as_str() {
        "cost" | "estimatedcost" | "estcost" => Some(fields::COST),
        "timeline" | "timeframe" | "expectedtimeline" => Some(fields::TIMELINE),
        "openforcollaboration" | "collaboration" | "collaborationopen" => {
            Some(fields::COLLABORATION)
        }
        _ => None,
    }
}

/// Fold legacy key spellings into their canonical names. Run once at the
/// intake/import boundary; a value already stored under the canonical key
/// wins over any legacy duplicate.
pub fn normalize_dynamic_keys(
    data: BTreeMap<String, DynamicValue>,
) -> BTreeMap<String, DynamicValue> {
    let mut normalized = BTreeMap::new();
    let mut folded = Vec::new();

    for (key, value) in data {
        match canonical_field_key(&key) {
            Some(canonical) if canonical != key => folded.push((canonical, value)),
            _ => {
                normalized.insert(key, value);
            }
        }
    }

    for (canonical, value) in folded {
        normalized.entry(canonical.to_string()).or_insert(value);
    }

    normalized
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_label(value)
}
