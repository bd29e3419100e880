use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::repository::{BitflowRepository, CommandTransactionBuilder, StacksNodeRepository};
use crate::service::{SwapService, SwapSettings};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Wires the configured quoting service, signer and node into a [`SwapService`].
pub fn build_service(config: &Config) -> anyhow::Result<SwapService> {
    let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;

    let quotes = BitflowRepository::new(
        client.clone(),
        config.bitflow.api_host.as_str(),
        config.bitflow.api_key.as_str(),
    );
    let builder =
        CommandTransactionBuilder::new(config.signer.command.as_str(), config.signer.args.clone());
    let broadcaster = StacksNodeRepository::new(client, config.network.node_url.clone());

    let settings = SwapSettings::from_config(config);
    tracing::debug!("swap settings: {settings:?}");

    Ok(SwapService::new(
        Box::new(quotes),
        Box::new(builder),
        Box::new(broadcaster),
        settings,
    ))
}
