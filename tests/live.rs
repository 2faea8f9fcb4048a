//! Tests against the real Solar.web Query API.
//!
//! These need credentials and a PV system:
//!   SOLARWEB_ACCESS_KEY_ID=... SOLARWEB_ACCESS_KEY_VALUE=... SOLARWEB_PV_SYSTEM_ID=... \
//!     cargo test --test live -- --ignored --nocapture
//!
//! Session mode works too with SOLARWEB_LOGIN_NAME and SOLARWEB_LOGIN_PASSWORD.

use chrono::{Duration, Utc};
use solarweb_api::SolarWebClient;

/// Build an authenticated client from the environment.
///
/// Panics with a hint when credentials are missing; live tests must not pass
/// silently without talking to the API.
async fn live_client() -> SolarWebClient {
    let client = SolarWebClient::from_env().unwrap_or_else(|e| {
        panic!(
            "\n\nLive tests need Solar.web credentials: {e}\n\
             Set SOLARWEB_ACCESS_KEY_ID and SOLARWEB_ACCESS_KEY_VALUE \
             (or SOLARWEB_LOGIN_NAME and SOLARWEB_LOGIN_PASSWORD) \
             and SOLARWEB_PV_SYSTEM_ID.\n\n"
        )
    });

    assert!(
        client.pv_system_id().is_some(),
        "SOLARWEB_PV_SYSTEM_ID must be set for live tests"
    );

    if client.auth().is_session_mode() {
        client.login().await.expect("login should succeed");
    }
    client
}

#[tokio::test]
#[ignore]
async fn test_live_release_info() {
    let client = live_client().await;
    let info = client.release_info().await.expect("release info");
    assert!(info.release_version.is_some(), "{info:?}");
}

#[tokio::test]
#[ignore]
async fn test_live_pv_systems_contains_configured_system() {
    let client = live_client().await;
    let systems = client.pv_systems().await.expect("pv systems");
    let id = client.pv_system_id().unwrap_or_default();
    assert!(
        systems.iter().any(|s| s.pv_system_id == id),
        "{id} not in {systems:?}"
    );
}

#[tokio::test]
#[ignore]
async fn test_live_system_and_devices() {
    let client = live_client().await;

    let system = client.pv_system(None).await.expect("pv system");
    assert_eq!(Some(system.pv_system_id.as_str()), client.pv_system_id());

    let devices = client.devices(None).await.expect("devices");
    assert!(!devices.is_empty(), "a PV system has at least one device");
}

#[tokio::test]
#[ignore]
async fn test_live_flow_and_aggr_data() {
    let client = live_client().await;

    let flow = client.flow_data(None, None).await.expect("flow data");
    println!("flow: {flow:#?}");

    let aggr = client
        .aggr_data(None, Some("years"), &[])
        .await
        .expect("aggregated data");
    println!("aggr: {aggr:#?}");
}

#[tokio::test]
#[ignore]
async fn test_live_hist_data_last_hour() {
    let client = live_client().await;
    let to = Utc::now();
    let from = to - Duration::hours(1);

    let values = client
        .hist_data(None, from, to, None)
        .await
        .expect("historical data");
    assert!(values.total_data_count as usize >= values.entries().len());
}

#[tokio::test]
#[ignore]
async fn test_live_session_refresh() {
    let client = live_client().await;
    if !client.auth().is_session_mode() {
        println!("Skipping refresh: key mode has no session");
        return;
    }

    client.refresh(None).await.expect("refresh");
    client.release_info().await.expect("release info after refresh");
}
