//! Popup-style rendering of feature attributes.

use gs_client::Feature;
use serde_json::Value;

/// Property keys never shown to the user (the raw geometry column).
const SKIPPED_KEYS: &[&str] = &["way"];

/// Make an attribute name presentable: `surface_area` -> `Surface area`.
pub fn sanitize_key(key: &str) -> String {
    let spaced: String = key
        .chars()
        .map(|c| if c == ':' || c == '_' { ' ' } else { c })
        .collect();
    capitalize(&spaced)
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Format a property value for display, applying unit formatting for
/// area and elevation attributes.
pub fn sanitize_value(key: &str, value: f64) -> String {
    let searchable = key.to_lowercase();
    if searchable.contains("area") {
        if value < 1_000_000.0 {
            format!("{} m²", value)
        } else {
            format!("{:.2} km²", value / 1_000_000.0)
        }
    } else if searchable.contains("ele") {
        format!("{} m", value)
    } else {
        trim_float(value)
    }
}

/// Integral floats print without the trailing `.0`.
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One `Key: value` line per displayable property. Empty values and
/// non-scalar values are skipped.
pub fn popup_lines(feature: &Feature) -> Vec<String> {
    feature
        .properties()
        .filter(|(key, _)| !SKIPPED_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Number(n) => sanitize_value(key, n.as_f64()?),
                _ => return None,
            };
            Some(format!("{}: {}", sanitize_key(key), rendered))
        })
        .collect()
}
