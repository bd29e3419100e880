//! Transaction building through an external signer process.
//!
//! The signer is any program that reads one JSON contract-call request on
//! stdin and writes `{"transaction": "<hex>"}` on stdout. Function arguments
//! are sent as hex-encoded Clarity values and post-conditions in their
//! normalized form, so a signer built on the Stacks JS tooling can pass both
//! straight to `makeContractCall`.

use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::instrument;

use super::error::RepositoryError;
use super::types::{
    AnchorMode, ContractCallOptions, PostConditionMode, SignedTransaction, StacksNetwork,
};
use super::{RepoResult, TransactionBuilder};
use crate::clarity;
use crate::translate::NormalizedPostCondition;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignerRequest<'a> {
    contract_address: &'a str,
    contract_name: &'a str,
    function_name: &'a str,
    function_args: Vec<String>,
    sender_key: &'a str,
    network: StacksNetwork,
    anchor_mode: AnchorMode,
    post_condition_mode: PostConditionMode,
    post_conditions: &'a [NormalizedPostCondition],
}

impl<'a> SignerRequest<'a> {
    fn from_options(options: &'a ContractCallOptions) -> RepoResult<Self> {
        let function_args = options
            .function_args
            .iter()
            .map(clarity::to_hex)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            contract_address: &options.contract_address,
            contract_name: &options.contract_name,
            function_name: &options.function_name,
            function_args,
            sender_key: &options.sender_key,
            network: options.network,
            anchor_mode: options.anchor_mode,
            post_condition_mode: options.post_condition_mode,
            post_conditions: &options.post_conditions,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SignerResponse {
    transaction: String,
}

pub struct CommandTransactionBuilder {
    program: String,
    args: Vec<String>,
}

impl CommandTransactionBuilder {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl TransactionBuilder for CommandTransactionBuilder {
    #[instrument(skip_all, fields(contract = %options.contract_id(), function = %options.function_name), err)]
    async fn make_contract_call(
        &self,
        options: &ContractCallOptions,
    ) -> RepoResult<SignedTransaction> {
        let request = SignerRequest::from_options(options)?;
        let payload = serde_json::to_vec(&request)
            .map_err(|e| RepositoryError::Other(format!("Failed to encode signer request: {e}")))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                RepositoryError::SignerError(format!("Failed to start `{}`: {e}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await.map_err(|e| {
                RepositoryError::SignerError(format!("Failed to write signer request: {e}"))
            })?;
            // closing stdin tells the signer the request is complete
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RepositoryError::SignerError(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RepositoryError::SignerError(format!(
                "signer exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_signer_output(&output.stdout)
    }
}

fn parse_signer_output(stdout: &[u8]) -> RepoResult<SignedTransaction> {
    let response: SignerResponse = serde_json::from_slice(stdout)
        .map_err(|e| RepositoryError::ParseError(format!("Invalid signer output: {e}")))?;

    let hex_tx = response.transaction.trim();
    let hex_tx = hex_tx.strip_prefix("0x").unwrap_or(hex_tx);
    let bytes = hex::decode(hex_tx)
        .map_err(|e| RepositoryError::ParseError(format!("Signed transaction is not hex: {e}")))?;

    if bytes.is_empty() {
        return Err(RepositoryError::SignerError(
            "signer returned an empty transaction".to_string(),
        ));
    }

    Ok(SignedTransaction::new(bytes))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use serde_json::json;

    use super::*;
    use crate::clarity::{ClarityValue, EncodeError};

    fn options(function_args: Vec<ClarityValue>) -> ContractCallOptions {
        ContractCallOptions {
            contract_address: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7".to_string(),
            contract_name: "router".to_string(),
            function_name: "swap-helper-a".to_string(),
            function_args,
            sender_key: "key".to_string(),
            network: StacksNetwork::Mainnet,
            anchor_mode: AnchorMode::Any,
            post_condition_mode: PostConditionMode::Deny,
            post_conditions: vec![NormalizedPostCondition {
                kind: "stx-postcondition".to_string(),
                address: "SP1".to_string(),
                condition: "eq".to_string(),
                amount: "10".to_string(),
                asset: None,
            }],
        }
    }

    #[test]
    fn test_signer_request_encodes_arguments_as_hex() {
        let options = options(vec![
            ClarityValue::UInt(BigUint::from(1u8)),
            ClarityValue::some(ClarityValue::Bool(true)),
        ]);
        let request = SignerRequest::from_options(&options).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contractAddress": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "contractName": "router",
                "functionName": "swap-helper-a",
                "functionArgs": ["0x0100000000000000000000000000000001", "0x0a03"],
                "senderKey": "key",
                "network": "mainnet",
                "anchorMode": "any",
                "postConditionMode": "deny",
                "postConditions": [
                    {"type": "stx-postcondition", "address": "SP1", "condition": "eq", "amount": "10"}
                ]
            })
        );
    }

    #[test]
    fn test_signer_request_with_unencodable_argument_should_fail() {
        let options = options(vec![ClarityValue::contract_principal("SP000", "pool")]);
        let err = SignerRequest::from_options(&options).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::EncodeError(EncodeError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_parse_signer_output_should_work() {
        let tx = parse_signer_output(br#"{"transaction": "0x0000ff"}"#).unwrap();
        assert_eq!(tx.bytes, vec![0x00, 0x00, 0xff]);

        let tx = parse_signer_output(b"{\"transaction\": \"abcd\"}\n").unwrap();
        assert_eq!(tx.bytes, vec![0xab, 0xcd]);
    }

    #[test]
    fn test_parse_signer_output_with_garbage_should_fail() {
        assert!(matches!(
            parse_signer_output(b"not json"),
            Err(RepositoryError::ParseError(_))
        ));
        assert!(matches!(
            parse_signer_output(br#"{"transaction": "zz"}"#),
            Err(RepositoryError::ParseError(_))
        ));
        assert!(matches!(
            parse_signer_output(br#"{"transaction": ""}"#),
            Err(RepositoryError::SignerError(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_builder_reads_signer_stdout() {
        // drains the request and answers with a fixed transaction
        let builder = CommandTransactionBuilder::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"cat > /dev/null; printf '{"transaction":"0x0102"}'"#.to_string(),
            ],
        );
        let tx = builder
            .make_contract_call(&options(vec![ClarityValue::Bool(false)]))
            .await
            .unwrap();
        assert_eq!(tx.bytes, vec![0x01, 0x02]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_builder_reports_signer_failure() {
        let builder = CommandTransactionBuilder::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat > /dev/null; echo 'bad key' >&2; exit 3".to_string(),
            ],
        );
        let err = builder
            .make_contract_call(&options(vec![]))
            .await
            .unwrap_err();
        match err {
            RepositoryError::SignerError(msg) => assert!(msg.contains("bad key")),
            other => panic!("Expected SignerError, got: {other:?}"),
        }
    }
}
