use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::instrument;

use super::error::RepositoryError;
use super::types::{BroadcastResult, SignedTransaction, StacksNetwork};
use super::{Broadcaster, RepoResult};

const TRANSACTIONS_PATH: &str = "/v2/transactions";

/// Body of a refused broadcast
#[derive(Debug, Deserialize)]
struct RejectionBody {
    error: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    txid: Option<String>,
}

/// Broadcasts transactions through a Stacks node's RPC interface.
pub struct StacksNodeRepository {
    client: Client,
    node_url: Option<String>,
}

impl StacksNodeRepository {
    /// `node_url` overrides the network's default public API.
    pub fn new(client: Client, node_url: Option<String>) -> Self {
        let node_url = node_url.map(|url| url.trim_end_matches('/').to_string());
        Self { client, node_url }
    }

    fn transactions_url(&self, network: StacksNetwork) -> String {
        let base = self
            .node_url
            .as_deref()
            .unwrap_or_else(|| network.default_node_url());
        format!("{base}{TRANSACTIONS_PATH}")
    }
}

#[async_trait]
impl Broadcaster for StacksNodeRepository {
    #[instrument(skip(self, transaction), fields(txid = %transaction.txid()), err)]
    async fn broadcast(
        &self,
        transaction: &SignedTransaction,
        network: StacksNetwork,
    ) -> RepoResult<BroadcastResult> {
        let response = self
            .client
            .post(self.transactions_url(network))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(transaction.bytes.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_server_error() {
            return Err(RepositoryError::NetworkError(format!(
                "node returned {status}: {body}"
            )));
        }

        parse_broadcast_response(status.is_success(), &body)
    }
}

/// Interpret the node's answer to a broadcast.
///
/// An accepted transaction comes back as a JSON string holding the txid; a
/// refused one as an object with `error`, `reason` and `txid`.
pub(crate) fn parse_broadcast_response(accepted: bool, body: &str) -> RepoResult<BroadcastResult> {
    if accepted {
        let txid: String = serde_json::from_str(body)
            .map_err(|e| RepositoryError::ParseError(format!("Unexpected broadcast reply: {e}")))?;
        let txid = if txid.starts_with("0x") {
            txid
        } else {
            format!("0x{txid}")
        };
        return Ok(BroadcastResult::Accepted { txid });
    }

    match serde_json::from_str::<RejectionBody>(body) {
        Ok(rejection) => Ok(BroadcastResult::Rejected {
            txid: rejection.txid,
            error: rejection.error,
            reason: rejection.reason,
        }),
        Err(_) => Ok(BroadcastResult::Rejected {
            txid: None,
            error: body.trim().to_string(),
            reason: None,
        }),
    }
}
