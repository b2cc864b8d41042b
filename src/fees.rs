use std::collections::HashMap;

use alloy::{
    primitives::{Bytes, U256},
    providers::Provider,
};
use tracing::debug;

use crate::{
    Chain, ContractKind,
    abi::{order_book::IOrderBook, pyth::IPyth, router::IPositionRouter},
    cache::SessionCache,
    error::SdkError,
    num,
    provider::ChainConnector,
    types::ChainId,
};

/// Which plugin contract quotes the minimum execution fee.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FeeKind {
    Position,
    Order,
}

/// USD price source for the chain's native token.
///
/// The SDK never hardcodes a price; callers inject whatever feed they
/// trust (or a fixed value in tests and demos). Prices are fixed-point
/// integers in the protocol's USD precision.
pub trait NativeTokenPriceSource: Send + Sync {
    /// `Ok(None)` means the source has no quote for this chain — a
    /// missing value, not an error and not zero.
    fn native_token_price_usd(&self, chain_id: ChainId) -> Result<Option<U256>, SdkError>;
}

/// Price source over a fixed per-chain table.
#[derive(Clone, Debug, Default)]
pub struct FixedPriceSource {
    prices: HashMap<ChainId, U256>,
}

impl FixedPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, chain_id: ChainId, price: U256) -> Self {
        self.prices.insert(chain_id, price);
        self
    }
}

impl NativeTokenPriceSource for FixedPriceSource {
    fn native_token_price_usd(&self, chain_id: ChainId) -> Result<Option<U256>, SdkError> {
        Ok(self.prices.get(&chain_id).copied())
    }
}

/// Minimum execution fee for a queued request, in native token units.
///
/// The raw quote is read from the position router or the order book
/// (cache-first, keyed by chain and kind). The order book's internal
/// rounding can leave a request one unit short of executable, so the
/// order quote is returned with one unit added on top; the position
/// quote is returned verbatim.
pub async fn min_execution_fee(
    connector: &dyn ChainConnector,
    chain: &Chain,
    kind: FeeKind,
    cache: &SessionCache,
) -> Result<U256, SdkError> {
    let quote = match cache.fee_quote(chain.chain_id(), kind) {
        Some(quote) => quote,
        None => {
            let provider = connector.provider(chain.chain_id())?;
            let quote = match kind {
                FeeKind::Position => {
                    IPositionRouter::new(chain.contract(ContractKind::PositionRouter), provider)
                        .minExecutionFee()
                        .call()
                        .await?
                }
                FeeKind::Order => {
                    IOrderBook::new(chain.contract(ContractKind::OrderBook), provider)
                        .minExecutionFee()
                        .call()
                        .await?
                }
            };
            cache.insert_fee_quote(chain.chain_id(), kind, quote);
            debug!(chain_id = chain.chain_id(), ?kind, %quote, "execution fee quoted");
            quote
        }
    };

    Ok(match kind {
        FeeKind::Position => quote,
        FeeKind::Order => quote + U256::ONE,
    })
}

/// Position minimum execution fee converted to USD, or `None` when the
/// plugin quotes no fee (or the price source has no quote).
///
/// `fee * native_price / 10^native_decimals`, all in fixed-precision
/// integers.
pub async fn min_execution_fee_usd(
    connector: &dyn ChainConnector,
    chain: &Chain,
    price_source: &dyn NativeTokenPriceSource,
    cache: &SessionCache,
) -> Result<Option<U256>, SdkError> {
    let fee = min_execution_fee(connector, chain, FeeKind::Position, cache).await?;
    if fee.is_zero() {
        return Ok(None);
    }
    let Some(price) = price_source.native_token_price_usd(chain.chain_id())? else {
        return Ok(None);
    };
    Ok(Some(num::token_to_usd(fee, price, chain.native_decimals())))
}

/// Total native value that must accompany an increase-position request:
/// the execution fee plus the Pyth update fee, plus the deposited
/// amount itself when the collateral token is the native token (the
/// deposit and the fees are then paid from the same balance).
pub fn increase_position_value(
    from_amount: U256,
    pyth_update_fee: U256,
    execution_fee: U256,
    is_native: bool,
) -> U256 {
    let value = execution_fee + pyth_update_fee;
    if is_native { value + from_amount } else { value }
}

/// Cost of posting the given Pyth price updates on-chain. Empty update
/// data costs nothing and performs no chain read.
pub async fn pyth_update_fee(
    connector: &dyn ChainConnector,
    chain: &Chain,
    update_data: &[Bytes],
) -> Result<U256, SdkError> {
    if update_data.is_empty() {
        return Ok(U256::ZERO);
    }
    let provider = connector.provider(chain.chain_id())?;
    let fee = IPyth::new(chain.contract(ContractKind::Pyth), provider)
        .getUpdateFee(update_data.to_vec())
        .call()
        .await?;
    Ok(fee)
}

/// Current gas price on the chain, cache-first.
pub async fn gas_price(
    connector: &dyn ChainConnector,
    chain_id: ChainId,
    cache: &SessionCache,
) -> Result<u128, SdkError> {
    if let Some(price) = cache.gas_price(chain_id) {
        return Ok(price);
    }
    let provider = connector.provider(chain_id)?;
    let price = provider.get_gas_price().await?;
    cache.insert_gas_price(chain_id, price);
    Ok(price)
}
