//! Historical data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{find_channel, ChannelValue, PagingLinks};

/// A channel reading in a historical log entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalChannel {
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub channel_type: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<ChannelValue>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_damaged: Option<bool>,
}

/// One log entry covering `log_duration` seconds from `log_date_time`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalData {
    #[serde(default, with = "crate::common::timestamp")]
    pub log_date_time: Option<DateTime<Utc>>,
    pub log_duration: u64,
    #[serde(default)]
    pub channels: Option<Vec<HistoricalChannel>>,
}

impl HistoricalData {
    /// Find a channel by name.
    pub fn channel(&self, name: &str) -> Option<&HistoricalChannel> {
        find_channel(self.channels.as_deref(), name, |c| c.channel_name.as_deref())
    }
}

/// Response of `/pvsystems/{id}/histdata`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalValues {
    #[serde(default)]
    pub pv_system_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<HistoricalData>>,
    pub links: PagingLinks,
    /// Total number of log entries in the requested range.
    pub total_data_count: u64,
}

impl HistoricalValues {
    /// Log entries on this page.
    pub fn entries(&self) -> &[HistoricalData] {
        self.data.as_deref().unwrap_or_default()
    }
}
