use serde::{Deserialize, Deserializer};
use serde_with::DeserializeAs;

/// Convert a locale-formatted number like `1 234,56` into a float.
///
/// Returns infinity if the conversion fails, which is the invalid value downstream.
#[must_use]
pub fn to_number(s: &str) -> f64 {
    let mut normalized: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    // The separator that comes last is the decimal one:
    match (normalized.rfind(','), normalized.rfind('.')) {
        (Some(comma), Some(period)) if period > comma => {
            normalized = normalized.replace(',', "");
        }
        (Some(_), _) => {
            normalized = normalized.replace('.', "").replace(',', ".");
        }
        _ => {}
    }
    match normalized.parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => f64::INFINITY,
    }
}

/// Deserialize a nullable locale-formatted cell, `null` becomes infinity.
pub struct LocaleNumber;

impl<'de> DeserializeAs<'de, f64> for LocaleNumber {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map_or(f64::INFINITY, |s| to_number(&s)))
    }
}
