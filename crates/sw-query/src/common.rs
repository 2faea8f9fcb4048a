//! Shapes shared by several endpoints: paging links, channel readings and
//! timestamp handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paging links attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default, rename = "self")]
    pub self_link: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    /// Total number of items across all pages.
    pub total_items_count: u64,
}

impl PagingLinks {
    /// Returns true if the server advertises another page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A channel reading value.
///
/// The API returns numbers for measurements, booleans for flags and strings
/// for enumerations, so no single type is assumed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ChannelValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl ChannelValue {
    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ChannelValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean value, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ChannelValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string value, if this is an enumeration.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ChannelValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelValue::Number(n) => write!(f, "{n}"),
            ChannelValue::Bool(b) => write!(f, "{b}"),
            ChannelValue::Text(s) => f.write_str(s),
        }
    }
}

/// One channel reading in flow or aggregated data.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub channel_type: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<ChannelValue>,
}

/// Find a channel by name.
pub(crate) fn find_channel<'a, C>(
    channels: Option<&'a [C]>,
    name: &str,
    channel_name: impl Fn(&C) -> Option<&str>,
) -> Option<&'a C> {
    channels?.iter().find(|c| channel_name(c) == Some(name))
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339, naive ISO 8601 date-times (taken as UTC) and plain dates
/// (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter for optional timestamps. Use with `#[serde(default, with = ...)]`.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        super::parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Accept either a single object or a list of them.
pub(crate) mod one_or_many {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    pub fn serialize<T: Serialize, S: Serializer>(
        value: &Option<Vec<T>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(
            Option::<OneOrMany<T>>::deserialize(deserializer)?.map(|v| match v {
                OneOrMany::Many(items) => items,
                OneOrMany::One(item) => vec![item],
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_value_variants() {
        let channels: Vec<Channel> = serde_json::from_str(
            r#"[
                {"channelName": "PowerPV", "channelType": "Power", "unit": "W", "value": 1520.5},
                {"channelName": "BattMode", "channelType": "Mode", "unit": "", "value": "normal"},
                {"channelName": "IsOnline", "value": true},
                {"channelName": "Missing", "value": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(channels[0].value.as_ref().and_then(ChannelValue::as_f64), Some(1520.5));
        assert_eq!(channels[1].value.as_ref().and_then(ChannelValue::as_str), Some("normal"));
        assert_eq!(channels[2].value.as_ref().and_then(ChannelValue::as_bool), Some(true));
        assert_eq!(channels[3].value, None);
        assert_eq!(channels[2].unit, None);
    }

    #[test]
    fn test_empty_channel_is_all_absent() {
        let channel: Channel = serde_json::from_str("{}").unwrap();
        assert_eq!(
            channel,
            Channel {
                channel_name: None,
                channel_type: None,
                unit: None,
                value: None,
            }
        );
    }

    #[test]
    fn test_paging_links() {
        let links: PagingLinks = serde_json::from_str(
            r#"{"first": "/pvsystems?offset=0", "self": "/pvsystems?offset=0",
                "next": "/pvsystems?offset=50", "totalItemsCount": 120}"#,
        )
        .unwrap();

        assert_eq!(links.self_link.as_deref(), Some("/pvsystems?offset=0"));
        assert!(links.has_next());
        assert_eq!(links.prev, None);
        assert_eq!(links.total_items_count, 120);

        assert!(serde_json::from_str::<PagingLinks>("{}").is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = "2024-05-01T12:30:00+00:00";
        for raw in [
            "2024-05-01T12:30:00Z",
            "2024-05-01T14:30:00+02:00",
            "2024-05-01T12:30:00",
            "2024-05-01T12:30:00.000",
        ] {
            assert_eq!(
                parse_timestamp(raw).map(|dt| dt.to_rfc3339()).as_deref(),
                Some(expected),
                "{raw}"
            );
        }

        assert_eq!(
            parse_timestamp("2019-02-22").map(|dt| dt.to_rfc3339()).as_deref(),
            Some("2019-02-22T00:00:00+00:00")
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
