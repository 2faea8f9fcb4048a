//! # sw-query
//!
//! Typed access to the Fronius Solar.web Query API.
//!
//! ## Endpoints
//!
//! | Method | Path |
//! |---|---|
//! | [`SolarWebClient::release_info`] | `/info/release` |
//! | [`SolarWebClient::pv_systems`] | `/pvsystems` |
//! | [`SolarWebClient::pv_system`] | `/pvsystems/{id}` |
//! | [`SolarWebClient::devices`] | `/pvsystems/{id}/devices` |
//! | [`SolarWebClient::flow_data`] | `/pvsystems/{id}/flowdata` |
//! | [`SolarWebClient::aggr_data`] | `/pvsystems/{id}/aggrdata` |
//! | [`SolarWebClient::hist_data`] | `/pvsystems/{id}/histdata` |
//!
//! Optional fields missing from a response are `None`, never a default value.
//!
//! ## Example
//!
//! ```rust,ignore
//! use solarweb_query::SolarWebClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), solarweb_query::Error> {
//!     let client = SolarWebClient::from_env()?;
//!     if client.auth().is_session_mode() {
//!         client.login().await?;
//!     }
//!
//!     for system in &client.pv_systems().await? {
//!         println!("{} {:?}", system.pv_system_id, system.name);
//!     }
//!
//!     let flow = client.flow_data(None, None).await?;
//!     println!("online: {:?}", flow.is_online());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod common;
mod device;
mod hist;
mod pvsystem;
mod service;

pub use client::{SolarWebClient, DEFAULT_PERIOD, DEFAULT_TIMEZONE};
pub use common::{parse_timestamp, Channel, ChannelValue, PagingLinks};
pub use device::{Device, DeviceList, Firmware, Power, Sensor};
pub use hist::{HistoricalChannel, HistoricalData, HistoricalValues};
pub use pvsystem::{
    Address, AggrBucket, AggrData, FlowData, FlowReadings, PvSystem, PvSystemList, SystemStatus,
};
pub use service::ReleaseInfo;

// Re-export the pieces callers need without depending on the lower crates.
pub use solarweb_auth::{AuthManager, AuthMode, Credentials};
pub use solarweb_client::{ClientConfig, Error, ErrorKind, Result, RetryConfig};
