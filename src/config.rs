use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, bail};
use dotenv::dotenv;
use envsubst::substitute;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::repository::{AnchorMode, PostConditionMode, StacksNetwork};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

/// Only these variables are interpolated into the YAML file.
const ENV_PREFIXES: &[&str] = &["BITFLOW_", "STACKS_", "SWAP_"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bitflow: BitflowConfig,
    pub network: NetworkConfig,
    pub wallet: WalletConfig,
    pub swap: SwapConfig,
    pub signer: SignerConfig,
}

impl Config {
    pub async fn from_yaml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        dotenv().ok();

        let path = path.as_ref();
        let file_content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file from path: {}", path.display()))?;

        let env_vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| ENV_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
            .collect();

        Self::from_yaml_str(&file_content, &env_vars)
    }

    /// Parses YAML after substituting `${VAR}` placeholders from `env_vars`.
    ///
    /// A placeholder with no matching variable is an error.
    pub fn from_yaml_str(content: &str, env_vars: &HashMap<String, String>) -> anyhow::Result<Self> {
        let interpolated = substitute(content, env_vars)
            .context("failed to substitute environment variables in YAML")?;

        if let Some(name) = first_unresolved_placeholder(&interpolated) {
            bail!("required environment variable `{name}` is not set");
        }

        serde_yaml::from_str(&interpolated).context("failed to parse YAML configuration")
    }
}

fn first_unresolved_placeholder(content: &str) -> Option<&str> {
    let start = content.find("${")? + 2;
    let len = content[start..].find('}')?;
    Some(&content[start..start + len])
}

#[derive(Debug, Clone, Deserialize)]
pub struct BitflowConfig {
    pub api_host: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub name: StacksNetwork,
    /// Overrides the network's public API when set
    #[serde(default)]
    pub node_url: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct WalletConfig {
    pub sender_address: String,
    pub private_key: String,
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("sender_address", &self.sender_address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwapConfig {
    pub token_x: String,
    /// Destination token id; takes precedence over `token_y_index`
    #[serde(default)]
    pub token_y: Option<String>,
    /// Position in the list of reachable tokens
    #[serde(default)]
    pub token_y_index: Option<usize>,
    /// Amount of `token_x` in human units
    pub amount: Decimal,
    /// Fraction, e.g. `0.01` for 1%
    pub slippage_tolerance: Decimal,
    #[serde(default)]
    pub anchor_mode: AnchorMode,
    #[serde(default)]
    pub post_condition_mode: PostConditionMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}
