use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::error::RepositoryError;
use super::types::{QuoteResult, SwapExecutionData, SwapParams};
use super::{QuoteRepository, RepoResult};

/// Reachable destination tokens for a source token
const POSSIBLE_TOKEN_Y_PATH: &str = "/getAllPossibleTokenY";

/// Best-route quote for a token pair and amount
const QUOTE_FOR_ROUTE_PATH: &str = "/getQuoteForRoute";

/// Contract-call parameters for a quoted route
const SWAP_PARAMS_PATH: &str = "/getSwapParams";

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapParamsRequest<'a> {
    swap_execution_data: &'a SwapExecutionData,
    sender_address: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    slippage_tolerance: Decimal,
}

/// HTTP client for the Bitflow routing API.
pub struct BitflowRepository {
    client: Client,
    api_host: String,
    api_key: String,
}

impl BitflowRepository {
    pub fn new(client: Client, api_host: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_host = api_host.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_host,
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_host, path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> RepoResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Rate limited by quote service");
            }
            return Err(RepositoryError::QuoteServiceError(format!(
                "{status}: {body}"
            )));
        }

        response.json::<T>().await.map_err(RepositoryError::from)
    }
}

#[async_trait]
impl QuoteRepository for BitflowRepository {
    #[instrument(skip(self), err)]
    async fn get_all_possible_token_y(&self, token_x: &str) -> RepoResult<Vec<String>> {
        let response = self
            .client
            .get(self.url(POSSIBLE_TOKEN_Y_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("tokenX", token_x)])
            .send()
            .await?;

        Self::read_json(response).await
    }

    #[instrument(skip(self), err)]
    async fn get_quote_for_route(
        &self,
        token_x: &str,
        token_y: &str,
        amount: Decimal,
    ) -> RepoResult<QuoteResult> {
        let amount = amount.to_string();
        let response = self
            .client
            .get(self.url(QUOTE_FOR_ROUTE_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("tokenX", token_x),
                ("tokenY", token_y),
                ("amount", amount.as_str()),
            ])
            .send()
            .await?;

        Self::read_json(response).await
    }

    #[instrument(skip(self, execution_data), err)]
    async fn get_swap_params(
        &self,
        execution_data: &SwapExecutionData,
        sender_address: &str,
        slippage_tolerance: Decimal,
    ) -> RepoResult<SwapParams> {
        let request = SwapParamsRequest {
            swap_execution_data: execution_data,
            sender_address,
            slippage_tolerance,
        };

        let response = self
            .client
            .post(self.url(SWAP_PARAMS_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let repo = BitflowRepository::new(Client::new(), "https://bitflow.example/", "key");
        assert_eq!(
            repo.url(QUOTE_FOR_ROUTE_PATH),
            "https://bitflow.example/getQuoteForRoute"
        );
    }

    #[test]
    fn test_swap_params_request_body_should_work() {
        let data = SwapExecutionData {
            route: json!(["a", "b"]),
            amount: Decimal::new(1, 2),
            token_x_decimals: 6,
            token_y_decimals: 8,
        };
        let request = SwapParamsRequest {
            swap_execution_data: &data,
            sender_address: "SP000",
            slippage_tolerance: Decimal::new(5, 3),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "swapExecutionData": {
                    "route": ["a", "b"],
                    "amount": 0.01,
                    "tokenXDecimals": 6,
                    "tokenYDecimals": 8
                },
                "senderAddress": "SP000",
                "slippageTolerance": 0.005
            })
        );
    }
}
