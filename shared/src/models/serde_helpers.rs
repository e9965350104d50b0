//! Serde helpers for loosely-typed store documents
//!
//! Summary documents are written by an external batch job; numeric fields may
//! be missing, `null`, or encoded as strings. These helpers normalize them to
//! zero at the ingestion boundary so consumers never see an `Option`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

fn loose_to_f64(value: Option<LooseNumber>) -> f64 {
    match value {
        Some(LooseNumber::Number(n)) => n,
        Some(LooseNumber::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        None => 0.0,
    }
}

/// Deserialize f64 that treats null / missing / unparsable text as 0
///
/// Textual `NaN` / `inf` count as unparsable, so the result is always finite.
pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseNumber>::deserialize(deserializer).map(loose_to_f64)
}

/// Deserialize a non-negative count that treats null / missing as 0
///
/// Fractional values are truncated, negative values clamp to 0.
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseNumber>::deserialize(deserializer).map(loose_to_f64)?;
    if value.is_finite() && value > 0.0 {
        Ok(value as u64)
    } else {
        Ok(0)
    }
}

/// Deserialize an optional f64; null / missing / unparsable text become None
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseNumber>::deserialize(deserializer).map(|value| match value {
        Some(LooseNumber::Number(n)) => Some(n),
        Some(LooseNumber::Text(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        None => None,
    })
}

/// Deserialize a nested block where `null` behaves like a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize an optional string where empty / whitespace-only becomes None
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| {
        opt.map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number_or_zero")]
        amount: f64,
        #[serde(default, deserialize_with = "count_or_zero")]
        count: u64,
        #[serde(default, deserialize_with = "non_empty_string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "optional_number")]
        target: Option<f64>,
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.amount, 0.0);
        assert_eq!(probe.count, 0);
        assert!(probe.label.is_none());
        assert!(probe.target.is_none());
    }

    #[test]
    fn test_optional_number() {
        let probe: Probe = serde_json::from_str(r#"{"target": "1.5"}"#).unwrap();
        assert_eq!(probe.target, Some(1.5));
        let probe: Probe = serde_json::from_str(r#"{"target": "n/a"}"#).unwrap();
        assert!(probe.target.is_none());
    }

    #[test]
    fn test_null_fields_default_to_zero() {
        let probe: Probe =
            serde_json::from_str(r#"{"amount": null, "count": null, "label": null}"#).unwrap();
        assert_eq!(probe.amount, 0.0);
        assert_eq!(probe.count, 0);
    }

    #[test]
    fn test_numeric_text() {
        let probe: Probe =
            serde_json::from_str(r#"{"amount": "12.5", "count": "7", "label": "  "}"#).unwrap();
        assert_eq!(probe.amount, 12.5);
        assert_eq!(probe.count, 7);
        assert!(probe.label.is_none());
    }

    #[test]
    fn test_non_finite_text_is_zero() {
        let probe: Probe = serde_json::from_str(r#"{"amount": "NaN", "count": "inf"}"#).unwrap();
        assert_eq!(probe.amount, 0.0);
        assert_eq!(probe.count, 0);
    }

    #[test]
    fn test_null_block_is_default() {
        #[derive(Deserialize)]
        struct Outer {
            #[serde(default, deserialize_with = "null_as_default")]
            tags: Vec<String>,
        }
        let outer: Outer = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(outer.tags.is_empty());
        let outer: Outer = serde_json::from_str(r#"{"tags": ["a"]}"#).unwrap();
        assert_eq!(outer.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_count_clamps_negative() {
        let probe: Probe = serde_json::from_str(r#"{"count": -3}"#).unwrap();
        assert_eq!(probe.count, 0);
    }
}
