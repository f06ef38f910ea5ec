//! Numbers that may arrive as JSON numbers or as numeric strings.
//!
//! Table-backed endpoints serialise stored decimals with `str`, so a count of
//! years can come back as `6` or `"6"`.

use std::collections::BTreeMap;

use serde::de::{Deserializer, Error};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn into_f64<E: Error>(self) -> Result<f64, E> {
        match self {
            Numeric::Number(value) => Ok(value),
            Numeric::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got \"{text}\""))),
        }
    }
}

/// `null` reads as zero, matching a missing field.
pub(super) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        Some(value) => value.into_f64(),
        None => Ok(0.0),
    }
}

/// Blank strings read as absent.
pub(super) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        Some(Numeric::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => value.into_f64().map(Some),
        None => Ok(None),
    }
}

pub(super) fn number_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Numeric>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| value.into_f64().map(|value| (key, value)))
        .collect()
}
