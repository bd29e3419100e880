use rust_decimal::Decimal;
use tracing::instrument;

use crate::repository::{
    Broadcaster, BroadcastResult, ContractCallOptions, QuoteRepository, RouteQuote, SwapExecutionData,
    SwapParams, TransactionBuilder,
};
use crate::service::types::{SwapReceipt, SwapSettings};
use crate::service::utils::{select_token_y, validate_amount, validate_slippage};
use crate::service::{ServiceError, ServiceResult};
use crate::translate::{normalize_post_conditions, translate_arguments};

pub struct SwapService {
    quotes: Box<dyn QuoteRepository>,
    builder: Box<dyn TransactionBuilder>,
    broadcaster: Box<dyn Broadcaster>,
    settings: SwapSettings,
}

impl SwapService {
    pub fn new(
        quotes: Box<dyn QuoteRepository>,
        builder: Box<dyn TransactionBuilder>,
        broadcaster: Box<dyn Broadcaster>,
        settings: SwapSettings,
    ) -> Self {
        Self {
            quotes,
            builder,
            broadcaster,
            settings,
        }
    }

    pub fn settings(&self) -> &SwapSettings {
        &self.settings
    }

    /// Runs one swap end to end: quote, parameters, translation, signing, broadcast.
    ///
    /// Any failure aborts the remaining steps.
    #[instrument(skip(self), fields(token_x = %self.settings.token_x, amount = %self.settings.amount), err)]
    pub async fn execute_swap(&self) -> ServiceResult<SwapReceipt> {
        validate_amount(self.settings.amount)?;
        validate_slippage(self.settings.slippage_tolerance)?;

        let token_x = self.settings.token_x.as_str();
        let token_y = self.select_token_y().await?;

        let route = self
            .get_quote(token_x, &token_y, self.settings.amount)
            .await?;
        tracing::info!("Quote for {token_x} -> {token_y}: {:?}", route.quote);

        let execution_data = SwapExecutionData::new(&route, self.settings.amount);
        let params = self
            .get_swap_params(
                &execution_data,
                &self.settings.sender_address,
                self.settings.slippage_tolerance,
            )
            .await?;
        tracing::debug!(
            "Swap params: {}.{}::{} with {} args and {} post-conditions",
            params.contract_address,
            params.contract_name,
            params.function_name,
            params.function_args.len(),
            params.post_conditions.len()
        );

        let options = self.prepare_contract_call(&params)?;
        let transaction = self.builder.make_contract_call(&options).await?;
        tracing::info!("Signed transaction {}", transaction.txid());

        match self
            .broadcaster
            .broadcast(&transaction, self.settings.network)
            .await?
        {
            BroadcastResult::Accepted { txid } => {
                tracing::info!("Broadcast accepted: {txid}");
                Ok(SwapReceipt {
                    token_x: token_x.to_string(),
                    token_y,
                    amount: self.settings.amount.to_string(),
                    quote: route.quote.map(|q| q.to_string()),
                    contract: options.contract_id(),
                    function_name: options.function_name,
                    txid,
                })
            }
            BroadcastResult::Rejected {
                txid,
                error,
                reason,
            } => Err(ServiceError::BroadcastRejected {
                txid,
                error,
                reason,
            }),
        }
    }

    /// Chooses the destination token among those reachable from the source token.
    #[instrument(skip(self), err)]
    pub async fn select_token_y(&self) -> ServiceResult<String> {
        let reachable = self
            .quotes
            .get_all_possible_token_y(&self.settings.token_x)
            .await?;
        tracing::debug!(
            "{} tokens reachable from {}",
            reachable.len(),
            self.settings.token_x
        );

        select_token_y(&reachable, &self.settings.token_y)
    }

    /// Fetches the best route for the pair; a missing route is an error.
    #[instrument(skip(self), err)]
    pub async fn get_quote(
        &self,
        token_x: &str,
        token_y: &str,
        amount: Decimal,
    ) -> ServiceResult<RouteQuote> {
        let result = self
            .quotes
            .get_quote_for_route(token_x, token_y, amount)
            .await?;

        result.best_route.ok_or_else(|| ServiceError::NoRouteFound {
            token_x: token_x.to_string(),
            token_y: token_y.to_string(),
        })
    }

    #[instrument(skip(self, execution_data), err)]
    pub async fn get_swap_params(
        &self,
        execution_data: &SwapExecutionData,
        sender_address: &str,
        slippage_tolerance: Decimal,
    ) -> ServiceResult<SwapParams> {
        Ok(self
            .quotes
            .get_swap_params(execution_data, sender_address, slippage_tolerance)
            .await?)
    }

    /// Translates the service's call description into builder options.
    ///
    /// Either every argument and post-condition translates, or nothing is built.
    pub fn prepare_contract_call(&self, params: &SwapParams) -> ServiceResult<ContractCallOptions> {
        let function_args = translate_arguments(&params.function_args)?;
        let post_conditions = normalize_post_conditions(&params.post_conditions)?;

        Ok(ContractCallOptions {
            contract_address: params.contract_address.clone(),
            contract_name: params.contract_name.clone(),
            function_name: params.function_name.clone(),
            function_args,
            sender_key: self.settings.sender_key.clone(),
            network: self.settings.network,
            anchor_mode: self.settings.anchor_mode,
            post_condition_mode: self.settings.post_condition_mode,
            post_conditions,
        })
    }
}
