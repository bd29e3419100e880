use stacks_swap::build_service;
use stacks_swap::config::{Config, DEFAULT_CONFIG_PATH};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "debug,reqwest=info,hyper=info".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("debug logging enabled");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::from_yaml(&config_path).await?;

    let service = build_service(&config)?;

    match service.execute_swap().await {
        Ok(receipt) => {
            tracing::info!("swap submitted: {}", receipt.txid);
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("swap failed: {e}");
            Err(e.into())
        }
    }
}
