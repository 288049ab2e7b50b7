//! Field deserializers that tolerate values of the wrong shape.
//!
//! YouTube documents counts as strings but occasionally sends numbers, and fields are sometimes
//! `null` rather than absent. With these, one odd field defaults instead of failing the whole
//! response. Use them together with `#[serde(default)]` so absent keys work too.

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::VecDeque;

/// A string, or a number rendered as one. Anything else is `None`.
pub(crate) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// An RFC 3339 timestamp, or `None` if the value is missing or unparseable.
pub(crate) fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// `T`, or `T::default()` if the value is `null` or does not have the shape of a `T`.
pub(crate) fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(Option::<Value>::deserialize(d)?
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

/// A list of resources where each one that doesn't parse is skipped with a warning.
pub(crate) fn items<'de, D, T>(d: D) -> Result<VecDeque<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed resource in API response");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Counts {
        #[serde(default, deserialize_with = "super::string")]
        count: Option<String>,
        #[serde(default, deserialize_with = "super::timestamp")]
        at: Option<jiff::Timestamp>,
        #[serde(default, deserialize_with = "super::or_default")]
        title: String,
    }

    fn parse(value: serde_json::Value) -> Counts {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn odd_values_default() {
        assert_eq!(parse(json!({})), Counts::default());
        assert_eq!(
            parse(json!({ "count": null, "at": null, "title": null })),
            Counts::default()
        );
        assert_eq!(
            parse(json!({ "count": ["x"], "at": "yesterday", "title": 7 })),
            Counts::default()
        );

        let counts = parse(json!({ "count": 10, "at": "2024-03-09T17:45:00Z", "title": "t" }));
        assert_eq!(counts.count.as_deref(), Some("10"));
        assert_eq!(counts.at.map(|at| at.to_string()).as_deref(), Some("2024-03-09T17:45:00Z"));
        assert_eq!(counts.title, "t");
    }
}
