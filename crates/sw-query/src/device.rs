//! Device metadata.
//!
//! The API returns inverters, batteries, sensors, smart meters, EV chargers and
//! data loggers in one flat shape. Fields that only apply to some device types
//! are grouped below and are `None` for the others.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::PagingLinks;

/// Nominal DC peak power per MPP tracker, in watts.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Power {
    #[serde(default)]
    pub dc1: Option<f64>,
    #[serde(default)]
    pub dc2: Option<f64>,
    #[serde(default)]
    pub dc3: Option<f64>,
    #[serde(default)]
    pub dc4: Option<f64>,
}

impl Power {
    /// Sum of the reported trackers, or `None` if none were reported.
    pub fn total(&self) -> Option<f64> {
        [self.dc1, self.dc2, self.dc3, self.dc4]
            .into_iter()
            .flatten()
            .reduce(|a, b| a + b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Firmware {
    #[serde(default)]
    pub update_available: Option<bool>,
    #[serde(default)]
    pub installed_version: Option<String>,
    #[serde(default)]
    pub available_version: Option<String>,
}

/// A sensor attached to a sensor box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    #[serde(default)]
    pub sensor_type: Option<String>,
    #[serde(default)]
    pub sensor_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "crate::common::timestamp")]
    pub activation_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::common::timestamp")]
    pub deactivation_date: Option<DateTime<Utc>>,
}

/// Metadata for one device of a PV system.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// `Inverter`, `Battery`, `Sensor`, `SmartMeter`, `EVCharger`, `Datalogger`, ...
    #[serde(default)]
    pub device_type: Option<String>,
    pub device_id: String,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_manufacturer: Option<String>,
    #[serde(default, rename = "serialnumber")]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub device_type_details: Option<String>,
    #[serde(default)]
    pub datalogger_id: Option<String>,
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default, rename = "numberMPPTrackers")]
    pub number_mpp_trackers: Option<u32>,
    #[serde(default)]
    pub number_phases: Option<u32>,
    #[serde(default)]
    pub peak_power: Option<Power>,
    #[serde(default)]
    pub nominal_ac_power: Option<f64>,
    #[serde(default)]
    pub firmware: Option<Firmware>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "crate::common::timestamp")]
    pub activation_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::common::timestamp")]
    pub deactivation_date: Option<DateTime<Utc>>,

    // Battery
    /// Usable capacity in watt-hours.
    #[serde(default)]
    pub capacity: Option<f64>,

    // Sensor
    #[serde(default, with = "crate::common::one_or_many")]
    pub sensors: Option<Vec<Sensor>>,

    // Smart meter
    #[serde(default)]
    pub device_category: Option<String>,
    #[serde(default)]
    pub device_location: Option<String>,

    // EV charger
    #[serde(default)]
    pub is_online: Option<bool>,

    // Data logger
    #[serde(default)]
    pub ip_address_v4: Option<String>,
}

impl Device {
    /// Returns true if `device_type` matches, ignoring case.
    pub fn is_type(&self, device_type: &str) -> bool {
        self.device_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(device_type))
    }
}

/// Response of `/pvsystems/{id}/devices`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Option<Vec<Device>>,
    #[serde(default)]
    pub links: Option<PagingLinks>,
}

impl DeviceList {
    /// Iterate over the returned devices.
    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.as_deref().unwrap_or_default().iter()
    }

    /// Devices of the given type, e.g. `Inverter`.
    pub fn of_type<'a>(&'a self, device_type: &'a str) -> impl Iterator<Item = &'a Device> + 'a {
        self.iter().filter(move |d| d.is_type(device_type))
    }

    /// Number of devices on this page.
    pub fn len(&self) -> usize {
        self.devices.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if this page holds no devices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
