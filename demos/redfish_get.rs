//! Fetches one Redfish path and prints the status line and body.
//!
//! ```text
//! RUST_LOG=debug REDFISH_VERIFY_TLS=false cargo run --example redfish_get -- https://bmc.example.com /redfish/v1
//! ```
use anyhow::{bail, Context};
use redfish_client::{Connector, ConnectorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(base) = args.next() else {
        bail!("usage: redfish_get <base-uri> [path]");
    };
    let path = args.next().unwrap_or_else(|| "/redfish/v1".to_string());

    let config = ConnectorConfig::from_env().context("reading REDFISH_* environment")?;
    let connector = Connector::with_config(&base, config)?;

    let resp = connector.get(&path).await?;
    println!("{} {}", resp.status, resp.status_text);
    println!("{}", resp.text());

    Ok(())
}
