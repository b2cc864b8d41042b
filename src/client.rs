use alloy::primitives::{Bytes, U256};
use tracing::debug;

use crate::{
    Registry,
    cache::SessionCache,
    encode,
    error::SdkError,
    fees::{self, FeeKind, NativeTokenPriceSource},
    params,
    position::{self, Position, PositionKey},
    provider::ChainConnector,
    types::{ChainId, MutationKind, MutationRequest, MutationResponse, TokenInfo},
};

const MSG_WRONG_TYPE: &str = "the type is not correct";
const MSG_NO_POSITION: &str = "cannot find position info";

/// Client over the protocol's transaction-building pipeline.
///
/// Holds the chain registry and the injected connector; every
/// orchestrator call is a single-pass validate -> fetch -> build ->
/// encode sequence producing a signable transaction, never submitting
/// one. The session cache is passed per call and shared at the caller's
/// discretion.
#[derive(Debug)]
pub struct PerpClient<C> {
    registry: Registry,
    connector: C,
}

impl<C: ChainConnector> PerpClient<C> {
    pub fn new(registry: Registry, connector: C) -> Self {
        Self {
            registry,
            connector,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Builds a transaction adding collateral to an existing position.
    ///
    /// Requires `request.kind()` to be [`MutationKind::Deposit`] and an
    /// open position in the requested slot; either violation is a
    /// structured 400 response. Infrastructure faults propagate as
    /// [`SdkError`].
    pub async fn deposit_collateral(
        &self,
        request: &MutationRequest,
        to_token: &TokenInfo,
        collateral_token: &TokenInfo,
        price_update_data: Vec<Bytes>,
        cache: &SessionCache,
    ) -> Result<MutationResponse, SdkError> {
        self.collateral_mutation(
            request,
            MutationKind::Deposit,
            "deposit success",
            to_token,
            collateral_token,
            price_update_data,
            cache,
        )
        .await
    }

    /// Builds a transaction removing collateral from an existing
    /// position. Same response contract as
    /// [`Self::deposit_collateral`], for [`MutationKind::Withdraw`].
    pub async fn withdraw_collateral(
        &self,
        request: &MutationRequest,
        to_token: &TokenInfo,
        collateral_token: &TokenInfo,
        price_update_data: Vec<Bytes>,
        cache: &SessionCache,
    ) -> Result<MutationResponse, SdkError> {
        self.collateral_mutation(
            request,
            MutationKind::Withdraw,
            "withdraw success",
            to_token,
            collateral_token,
            price_update_data,
            cache,
        )
        .await
    }

    /// Builds a transaction opening or growing a position. An absent
    /// position is allowed here: increasing into an empty slot opens
    /// it.
    pub async fn increase_position(
        &self,
        request: &MutationRequest,
        to_token: &TokenInfo,
        collateral_token: &TokenInfo,
        price_update_data: Vec<Bytes>,
        cache: &SessionCache,
    ) -> Result<MutationResponse, SdkError> {
        self.collateral_mutation(
            request,
            MutationKind::IncreasePosition,
            "increase position success",
            to_token,
            collateral_token,
            price_update_data,
            cache,
        )
        .await
    }

    /// Builds a reduce-only transaction shrinking an existing position.
    pub async fn decrease_position(
        &self,
        request: &MutationRequest,
        to_token: &TokenInfo,
        collateral_token: &TokenInfo,
        price_update_data: Vec<Bytes>,
        cache: &SessionCache,
    ) -> Result<MutationResponse, SdkError> {
        self.collateral_mutation(
            request,
            MutationKind::DecreasePosition,
            "decrease position success",
            to_token,
            collateral_token,
            price_update_data,
            cache,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn collateral_mutation(
        &self,
        request: &MutationRequest,
        expected: MutationKind,
        success_message: &str,
        to_token: &TokenInfo,
        collateral_token: &TokenInfo,
        price_update_data: Vec<Bytes>,
        cache: &SessionCache,
    ) -> Result<MutationResponse, SdkError> {
        // Kind validation comes first: a mismatched request must fail
        // before any lookup happens
        if request.kind() != expected {
            return Ok(MutationResponse::failure(MSG_WRONG_TYPE));
        }

        let chain = self.registry.get(request.chain_id())?;
        let key = PositionKey::new(
            request.account(),
            collateral_token.address,
            to_token.address,
            request.is_long(),
            request.chain_id(),
        );
        let found = position::fetch_position(&self.connector, chain, &key, cache).await?;
        let position = match found {
            Some(position) => Some(position),
            // Increasing into an empty slot opens a position; every
            // other mutation needs one to exist
            None if expected == MutationKind::IncreasePosition => None,
            None => return Ok(MutationResponse::failure(MSG_NO_POSITION)),
        };

        let execution_fee =
            fees::min_execution_fee(&self.connector, chain, FeeKind::Position, cache).await?;
        let pyth_fee = fees::pyth_update_fee(&self.connector, chain, &price_update_data).await?;

        let call = params::build_collateral_call(
            request,
            position.as_ref(),
            to_token,
            collateral_token,
            execution_fee,
            pyth_fee,
            price_update_data,
        );
        debug!(?request, ?call, "built collateral mutation");

        let tx = encode::encode_mutation(request.account(), chain, &call);
        Ok(MutationResponse::success(success_message, tx))
    }

    /// Minimum execution fee for the given request kind, in native
    /// token units. See [`fees::min_execution_fee`].
    pub async fn min_execution_fee(
        &self,
        kind: FeeKind,
        chain_id: ChainId,
        cache: &SessionCache,
    ) -> Result<U256, SdkError> {
        let chain = self.registry.get(chain_id)?;
        fees::min_execution_fee(&self.connector, chain, kind, cache).await
    }

    /// Position minimum execution fee in USD, `None` when no fee is
    /// quoted. See [`fees::min_execution_fee_usd`].
    pub async fn min_execution_fee_usd(
        &self,
        chain_id: ChainId,
        price_source: &dyn NativeTokenPriceSource,
        cache: &SessionCache,
    ) -> Result<Option<U256>, SdkError> {
        let chain = self.registry.get(chain_id)?;
        fees::min_execution_fee_usd(&self.connector, chain, price_source, cache).await
    }

    /// Current gas price on the chain, cache-first.
    pub async fn gas_price(
        &self,
        chain_id: ChainId,
        cache: &SessionCache,
    ) -> Result<u128, SdkError> {
        fees::gas_price(&self.connector, chain_id, cache).await
    }

    /// Open position for the request's slot, if any. Thin passthrough
    /// to the position reader with the registry resolved.
    pub async fn position(
        &self,
        key: &PositionKey,
        cache: &SessionCache,
    ) -> Result<Option<Position>, SdkError> {
        let chain = self.registry.get(key.chain_id)?;
        position::fetch_position(&self.connector, chain, key, cache).await
    }
}
