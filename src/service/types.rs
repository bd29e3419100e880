use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::repository::{AnchorMode, PostConditionMode, StacksNetwork};

/// How the destination token is chosen among the reachable ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSelection {
    /// A specific token id, which must be reachable
    Id(String),
    /// Position in the service's list of reachable tokens
    Index(usize),
}

/// Everything about one swap attempt that does not come from the network
#[derive(Clone)]
pub struct SwapSettings {
    pub network: StacksNetwork,
    pub sender_address: String,
    pub sender_key: String,
    pub token_x: String,
    pub token_y: TokenSelection,
    pub amount: Decimal,
    pub slippage_tolerance: Decimal,
    pub anchor_mode: AnchorMode,
    pub post_condition_mode: PostConditionMode,
}

impl SwapSettings {
    pub fn from_config(config: &Config) -> Self {
        let token_y = match (&config.swap.token_y, config.swap.token_y_index) {
            (Some(id), _) => TokenSelection::Id(id.clone()),
            (None, Some(index)) => TokenSelection::Index(index),
            (None, None) => TokenSelection::Index(0),
        };

        Self {
            network: config.network.name,
            sender_address: config.wallet.sender_address.clone(),
            sender_key: config.wallet.private_key.clone(),
            token_x: config.swap.token_x.clone(),
            token_y,
            amount: config.swap.amount,
            slippage_tolerance: config.swap.slippage_tolerance,
            anchor_mode: config.swap.anchor_mode,
            post_condition_mode: config.swap.post_condition_mode,
        }
    }
}

impl std::fmt::Debug for SwapSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapSettings")
            .field("network", &self.network)
            .field("sender_address", &self.sender_address)
            .field("token_x", &self.token_x)
            .field("token_y", &self.token_y)
            .field("amount", &self.amount)
            .field("slippage_tolerance", &self.slippage_tolerance)
            .field("anchor_mode", &self.anchor_mode)
            .field("post_condition_mode", &self.post_condition_mode)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapReceipt {
    /// Source token id
    pub token_x: String,
    /// Destination token id
    pub token_y: String,
    /// Amount of the source token, human units
    pub amount: String,
    /// Quoted output amount, if the service reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    /// `address.contract-name` of the called contract
    pub contract: String,
    pub function_name: String,
    /// Transaction id assigned by the node
    pub txid: String,
}
