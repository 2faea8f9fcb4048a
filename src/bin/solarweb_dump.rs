//! Print everything the Query API knows about a PV system.
//!
//! Reads credentials from the environment, logs in when given a login name
//! and password, then dumps every read endpoint for the configured system.
//!
//! ```sh
//! export SOLARWEB_ACCESS_KEY_ID='FKIA...'
//! export SOLARWEB_ACCESS_KEY_VALUE='...'
//! export SOLARWEB_PV_SYSTEM_ID='...'
//! RUST_LOG=solarweb=debug cargo run --bin solarweb-dump
//! ```

use std::process::ExitCode;

use solarweb_api::{Credentials, Result, SolarWebClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("  Set SOLARWEB_ACCESS_KEY_ID and SOLARWEB_ACCESS_KEY_VALUE,");
            eprintln!("  or SOLARWEB_LOGIN_NAME and SOLARWEB_LOGIN_PASSWORD.");
            return ExitCode::FAILURE;
        }
    };

    let mut client = match SolarWebClient::new(credentials) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: Failed to create client: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(id) = Credentials::pv_system_id_from_env() {
        client = client.with_pv_system_id(id);
    }

    match dump(&client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(last) = e.last_failure() {
                eprintln!("  last failure: {last}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn dump(client: &SolarWebClient) -> Result<()> {
    if client.auth().is_session_mode() {
        println!("Logging in to Solar.web");
        client.login().await?;
        if let Some(expiry) = client.auth().token_expiry().await {
            println!("  token valid until {expiry}\n");
        }
    }

    println!("Getting Solar.web API release info:");
    println!("{:#?}\n", client.release_info().await?);

    println!("Getting PV systems metadata:");
    let systems = client.pv_systems().await?;
    println!("{systems:#?}\n");

    // Without a configured system, fall back to the first one listed.
    let fallback = systems.iter().next().map(|s| s.pv_system_id.clone());
    let Some(id) = client
        .pv_system_id()
        .map(str::to_string)
        .or(fallback)
    else {
        println!("No PV systems available");
        return Ok(());
    };

    println!("Getting PV system metadata for {id}:");
    println!("{:#?}\n", client.pv_system(Some(id.as_str())).await?);

    println!("Getting devices metadata:");
    println!("{:#?}\n", client.devices(Some(id.as_str())).await?);

    println!("Getting power flow data:");
    println!("{:#?}\n", client.flow_data(Some(id.as_str()), None).await?);

    println!("Getting aggregated data:");
    println!("{:#?}\n", client.aggr_data(Some(id.as_str()), None, &[]).await?);

    Ok(())
}
