pub mod bitflow;
pub mod error;
pub mod node;
pub mod signer;
pub mod types;

use async_trait::async_trait;
use rust_decimal::Decimal;

pub use bitflow::BitflowRepository;
pub use error::RepositoryError;
pub use node::StacksNodeRepository;
pub use signer::CommandTransactionBuilder;
pub use types::{
    AnchorMode, BroadcastResult, ContractCallOptions, PostConditionMode, QuoteResult, RouteQuote,
    SignedTransaction, StacksNetwork, SwapExecutionData, SwapParams,
};

pub(crate) type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Trait for the liquidity-routing service that discovers routes and
/// describes how to execute them.
///
/// Route discovery and optimization live entirely behind this trait.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Lists every token the service can route to from `token_x`.
    ///
    /// # Arguments
    ///
    /// * `token_x` - Service token id of the source token (e.g. `token-aeusdc`)
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Token ids reachable from `token_x`, in service order
    /// * `Err(RepositoryError)` - If the request fails or the response cannot be parsed
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let tokens = repository.get_all_possible_token_y("token-aeusdc").await?;
    /// println!("{} reachable tokens", tokens.len());
    /// ```
    async fn get_all_possible_token_y(&self, token_x: &str) -> RepoResult<Vec<String>>;

    /// Requests the best route quote for swapping `amount` of `token_x` into `token_y`.
    ///
    /// # Arguments
    ///
    /// * `token_x` - Source token id
    /// * `token_y` - Destination token id
    /// * `amount` - Amount of `token_x` in human units (e.g. `0.01`)
    ///
    /// # Returns
    ///
    /// * `Ok(QuoteResult)` - `best_route` is `None` when no route exists
    /// * `Err(RepositoryError)` - If the request fails
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let result = repository.get_quote_for_route("token-aeusdc", "token-stx", amount).await?;
    /// if let Some(route) = result.best_route {
    ///     println!("quote: {:?}", route.quote);
    /// }
    /// ```
    async fn get_quote_for_route(
        &self,
        token_x: &str,
        token_y: &str,
        amount: Decimal,
    ) -> RepoResult<QuoteResult>;

    /// Requests the contract-call description that executes a quoted route.
    ///
    /// # Arguments
    ///
    /// * `execution_data` - The selected route together with the swap amount
    /// * `sender_address` - Principal that will sign and send the transaction
    /// * `slippage_tolerance` - Accepted slippage as a fraction (`0.01` is 1%)
    ///
    /// # Returns
    ///
    /// * `Ok(SwapParams)` - Contract, function, argument and post-condition descriptors
    /// * `Err(RepositoryError)` - If the request fails or the response cannot be parsed
    async fn get_swap_params(
        &self,
        execution_data: &SwapExecutionData,
        sender_address: &str,
        slippage_tolerance: Decimal,
    ) -> RepoResult<SwapParams>;
}

/// Trait for whatever turns a contract-call description into a signed transaction.
///
/// Fee estimation, nonce management and signing happen behind this trait.
#[async_trait]
pub trait TransactionBuilder: Send + Sync {
    /// Builds and signs a contract-call transaction.
    ///
    /// # Returns
    ///
    /// * `Ok(SignedTransaction)` - The serialized transaction
    /// * `Err(RepositoryError)` - If an argument cannot be encoded or signing fails
    async fn make_contract_call(&self, options: &ContractCallOptions)
    -> RepoResult<SignedTransaction>;
}

/// Trait for submitting signed transactions to the network.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Broadcasts a signed transaction.
    ///
    /// A transaction the node refuses is reported as
    /// [`BroadcastResult::Rejected`], not as an error; errors are reserved for
    /// failing to reach the node at all.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// match broadcaster.broadcast(&tx, StacksNetwork::Mainnet).await? {
    ///     BroadcastResult::Accepted { txid } => println!("sent {txid}"),
    ///     BroadcastResult::Rejected { reason, .. } => println!("rejected: {reason:?}"),
    /// }
    /// ```
    async fn broadcast(
        &self,
        transaction: &SignedTransaction,
        network: StacksNetwork,
    ) -> RepoResult<BroadcastResult>;
}
