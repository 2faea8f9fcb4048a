//! PV system metadata, flow data and aggregated data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{find_channel, Channel, PagingLinks};

/// Postal address of a PV system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// PV system metadata, from `/pvsystems/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PvSystem {
    pub pv_system_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    /// IANA zone name such as `Europe/Vienna`.
    #[serde(default, alias = "timeZone")]
    pub timezone: Option<String>,
    #[serde(default, rename = "pictureURL")]
    pub picture_url: Option<String>,
    /// Installed peak power in watts.
    #[serde(default)]
    pub peak_power: Option<f64>,
    #[serde(default)]
    pub meteo_data: Option<String>,
    #[serde(default, with = "crate::common::timestamp")]
    pub installation_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::common::timestamp")]
    pub last_import: Option<DateTime<Utc>>,
}

/// Response of `/pvsystems`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PvSystemList {
    #[serde(default)]
    pub pv_systems: Option<Vec<PvSystem>>,
    #[serde(default)]
    pub links: Option<PagingLinks>,
}

impl PvSystemList {
    /// Iterate over the returned systems.
    pub fn iter(&self) -> std::slice::Iter<'_, PvSystem> {
        self.pv_systems.as_deref().unwrap_or_default().iter()
    }

    /// Number of systems on this page.
    pub fn len(&self) -> usize {
        self.pv_systems.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if this page holds no systems.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a PvSystemList {
    type Item = &'a PvSystem;
    type IntoIter = std::slice::Iter<'a, PvSystem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Online state reported with flow data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub is_online: Option<bool>,
    #[serde(default)]
    pub batt_mode: Option<String>,
}

/// A timestamped set of channel readings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReadings {
    #[serde(default, with = "crate::common::timestamp")]
    pub log_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub channels: Option<Vec<Channel>>,
}

impl FlowReadings {
    /// Find a channel by name, e.g. `PowerPV`.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        find_channel(self.channels.as_deref(), name, |c| c.channel_name.as_deref())
    }
}

/// Near-real-time power flow, from `/pvsystems/{id}/flowdata`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowData {
    #[serde(default)]
    pub pv_system_id: Option<String>,
    #[serde(default)]
    pub status: Option<SystemStatus>,
    #[serde(default)]
    pub data: Option<FlowReadings>,
}

impl FlowData {
    /// Returns true if the system reported itself online.
    pub fn is_online(&self) -> Option<bool> {
        self.status.as_ref().and_then(|s| s.is_online)
    }
}

/// One aggregation bucket.
///
/// `log_date_time` is the bucket label as sent by the server: a year, month or
/// date depending on the requested period.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggrBucket {
    #[serde(default)]
    pub log_date_time: Option<String>,
    #[serde(default)]
    pub channels: Option<Vec<Channel>>,
}

impl AggrBucket {
    /// Find a channel by name, e.g. `EnergyProductionTotal`.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        find_channel(self.channels.as_deref(), name, |c| c.channel_name.as_deref())
    }
}

/// Aggregated values, from `/pvsystems/{id}/aggrdata`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggrData {
    #[serde(default)]
    pub pv_system_id: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<AggrBucket>>,
}
