use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha512_256};

use crate::clarity::ClarityValue;
use crate::translate::{ArgumentDescriptor, NormalizedPostCondition, PostConditionDescriptor};

/// Mainnet Stacks API
const MAINNET_NODE_URL: &str = "https://api.mainnet.hiro.so";

/// Testnet Stacks API
const TESTNET_NODE_URL: &str = "https://api.testnet.hiro.so";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StacksNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl StacksNetwork {
    pub fn default_node_url(&self) -> &'static str {
        match self {
            StacksNetwork::Mainnet => MAINNET_NODE_URL,
            StacksNetwork::Testnet => TESTNET_NODE_URL,
        }
    }
}

impl fmt::Display for StacksNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StacksNetwork::Mainnet => f.write_str("mainnet"),
            StacksNetwork::Testnet => f.write_str("testnet"),
        }
    }
}

/// When the transaction may be included relative to microblocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorMode {
    OnChainOnly,
    OffChainOnly,
    #[default]
    Any,
}

/// Whether asset transfers not covered by a post-condition are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostConditionMode {
    Allow,
    #[default]
    Deny,
}

/// Route quote as returned by the quoting service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuote {
    /// Opaque route description, handed back verbatim when asking for swap parameters
    pub route: Value,
    /// Expected output amount in destination-token units
    #[serde(default)]
    pub quote: Option<Decimal>,
    pub token_x_decimals: u8,
    pub token_y_decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    #[serde(default)]
    pub best_route: Option<RouteQuote>,
}

/// What the quoting service needs to build the contract call for a route
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapExecutionData {
    pub route: Value,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub token_x_decimals: u8,
    pub token_y_decimals: u8,
}

impl SwapExecutionData {
    pub fn new(quote: &RouteQuote, amount: Decimal) -> Self {
        Self {
            route: quote.route.clone(),
            amount,
            token_x_decimals: quote.token_x_decimals,
            token_y_decimals: quote.token_y_decimals,
        }
    }
}

/// Contract-call description returned by the quoting service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    #[serde(default)]
    pub function_args: Vec<ArgumentDescriptor>,
    #[serde(default)]
    pub post_conditions: Vec<PostConditionDescriptor>,
}

/// Everything the transaction builder needs to produce a signed contract call
#[derive(Clone)]
pub struct ContractCallOptions {
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    pub function_args: Vec<ClarityValue>,
    pub sender_key: String,
    pub network: StacksNetwork,
    pub anchor_mode: AnchorMode,
    pub post_condition_mode: PostConditionMode,
    pub post_conditions: Vec<NormalizedPostCondition>,
}

impl ContractCallOptions {
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.contract_address, self.contract_name)
    }
}

// The sender key never reaches logs.
impl fmt::Debug for ContractCallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractCallOptions")
            .field("contract_address", &self.contract_address)
            .field("contract_name", &self.contract_name)
            .field("function_name", &self.function_name)
            .field("function_args", &self.function_args)
            .field("sender_key", &"<redacted>")
            .field("network", &self.network)
            .field("anchor_mode", &self.anchor_mode)
            .field("post_condition_mode", &self.post_condition_mode)
            .field("post_conditions", &self.post_conditions)
            .finish()
    }
}

/// A serialized, signed transaction ready for broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub bytes: Vec<u8>,
}

impl SignedTransaction {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Transaction id: SHA-512/256 of the serialized transaction.
    pub fn txid(&self) -> String {
        format!("0x{}", hex::encode(Sha512_256::digest(&self.bytes)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BroadcastResult {
    Accepted {
        txid: String,
    },
    Rejected {
        txid: Option<String>,
        error: String,
        reason: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_swap_params_from_service_json_should_work() {
        let params: SwapParams = serde_json::from_value(json!({
            "contractAddress": "SP000",
            "contractName": "router",
            "functionName": "swap-helper-a",
            "functionArgs": [
                {"type": "contract", "value": "SP000.token-a"},
                {"type": "uint", "value": "1000"}
            ],
            "postConditions": [
                {"type": "stx-postcondition", "address": "SP1", "condition": "eq", "amount": 10}
            ]
        }))
        .unwrap();

        assert_eq!(params.function_name, "swap-helper-a");
        assert_eq!(params.function_args.len(), 2);
        assert_eq!(params.function_args[1].kind, "uint");
        assert_eq!(params.post_conditions[0].kind, "stx-postcondition");
    }

    #[test]
    fn test_quote_result_without_route_should_work() {
        let result: QuoteResult = serde_json::from_value(json!({"bestRoute": null})).unwrap();
        assert!(result.best_route.is_none());

        let result: QuoteResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.best_route.is_none());
    }

    #[test]
    fn test_quote_result_with_numeric_quote_should_work() {
        let result: QuoteResult = serde_json::from_str(
            r#"{"bestRoute": {"route": {}, "quote": 12.345678, "tokenXDecimals": 6, "tokenYDecimals": 8}}"#,
        )
        .unwrap();
        let route = result.best_route.unwrap();
        assert_eq!(route.quote, Some(Decimal::new(12_345_678, 6)));
        assert_eq!(route.token_y_decimals, 8);
    }

    #[test]
    fn test_swap_execution_data_serializes_amount_as_number() {
        let quote = RouteQuote {
            route: json!({"path": ["token-aeusdc", "token-stx"]}),
            quote: Some(Decimal::new(42, 1)),
            token_x_decimals: 6,
            token_y_decimals: 6,
        };
        let data = SwapExecutionData::new(&quote, Decimal::new(1, 2));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "route": {"path": ["token-aeusdc", "token-stx"]},
                "amount": 0.01,
                "tokenXDecimals": 6,
                "tokenYDecimals": 6
            })
        );
    }

    #[test]
    fn test_mode_names_should_work() {
        assert_eq!(serde_json::to_value(AnchorMode::Any).unwrap(), json!("any"));
        assert_eq!(
            serde_json::to_value(AnchorMode::OnChainOnly).unwrap(),
            json!("onChainOnly")
        );
        assert_eq!(
            serde_json::to_value(PostConditionMode::Deny).unwrap(),
            json!("deny")
        );
        assert_eq!(
            serde_json::to_value(StacksNetwork::Testnet).unwrap(),
            json!("testnet")
        );
    }

    #[test]
    fn test_contract_call_options_debug_redacts_key() {
        let options = ContractCallOptions {
            contract_address: "SP000".to_string(),
            contract_name: "router".to_string(),
            function_name: "swap".to_string(),
            function_args: vec![],
            sender_key: "super-secret".to_string(),
            network: StacksNetwork::Mainnet,
            anchor_mode: AnchorMode::Any,
            post_condition_mode: PostConditionMode::Deny,
            post_conditions: vec![],
        };
        let debug = format!("{options:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert_eq!(options.contract_id(), "SP000.router");
    }

    #[test]
    fn test_txid_is_sha512_256_of_bytes() {
        let tx = SignedTransaction::new(vec![]);
        // SHA-512/256 of the empty input
        assert_eq!(
            tx.txid(),
            "0xc672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a"
        );
    }
}
