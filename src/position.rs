use alloy::primitives::{Address, I256, U256};
use tracing::debug;

use crate::{
    Chain, ContractKind,
    abi::vault::IVault::{self, getPositionReturn},
    cache::SessionCache,
    error::SdkError,
    provider::ChainConnector,
    types::ChainId,
};

/// Stable cache key identifying one position slot on one chain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PositionKey {
    pub account: Address,
    pub collateral_token: Address,
    pub index_token: Address,
    pub is_long: bool,
    pub chain_id: ChainId,
}

impl PositionKey {
    pub fn new(
        account: Address,
        collateral_token: Address,
        index_token: Address,
        is_long: bool,
        chain_id: ChainId,
    ) -> Self {
        Self {
            account,
            collateral_token,
            index_token,
            is_long,
            chain_id,
        }
    }
}

/// Open perpetual position as reported by the vault.
///
/// `size`, `collateral` and `average_price` are fixed-point integers in
/// the protocol's USD precision.
#[derive(Clone, Debug)]
pub struct Position {
    account: Address,
    collateral_token: Address,
    index_token: Address,
    is_long: bool,
    size: U256,
    collateral: U256,
    average_price: U256,
    entry_funding_rate: U256,
    reserve_amount: U256,
    realised_pnl: I256,
    last_increased_time: U256,
}

impl Position {
    pub(crate) fn new(key: &PositionKey, info: &getPositionReturn) -> Self {
        Self {
            account: key.account,
            collateral_token: key.collateral_token,
            index_token: key.index_token,
            is_long: key.is_long,
            size: info.size,
            collateral: info.collateral,
            average_price: info.averagePrice,
            entry_funding_rate: info.entryFundingRate,
            reserve_amount: info.reserveAmount,
            realised_pnl: info.realisedPnl,
            last_increased_time: info.lastIncreasedTime,
        }
    }

    /// Account holding the position.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Token backing the position's margin.
    pub fn collateral_token(&self) -> Address {
        self.collateral_token
    }

    /// Token the position tracks.
    pub fn index_token(&self) -> Address {
        self.index_token
    }

    /// Position side.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// Notional size in USD units.
    pub fn size(&self) -> U256 {
        self.size
    }

    /// Margin locked in the position, in USD units.
    pub fn collateral(&self) -> U256 {
        self.collateral
    }

    /// Average entry price.
    pub fn average_price(&self) -> U256 {
        self.average_price
    }

    /// Cumulative funding rate at entry.
    pub fn entry_funding_rate(&self) -> U256 {
        self.entry_funding_rate
    }

    /// Vault reserve backing the position.
    pub fn reserve_amount(&self) -> U256 {
        self.reserve_amount
    }

    /// PnL realised by past decreases.
    pub fn realised_pnl(&self) -> I256 {
        self.realised_pnl
    }

    /// Timestamp of the last increase, drives the vault's cooldown.
    pub fn last_increased_time(&self) -> U256 {
        self.last_increased_time
    }
}

/// Fetches the open position matching `key`, or `None` when the account
/// has no position in that slot.
///
/// The cache is consulted first; a hit (including a cached "no
/// position") returns without touching the connector at all. On a miss
/// the vault is queried and the result, present or absent, is written
/// back under the same key. Chain failure propagates as [`SdkError`];
/// an absent position is a valid non-error result.
pub async fn fetch_position(
    connector: &dyn ChainConnector,
    chain: &Chain,
    key: &PositionKey,
    cache: &SessionCache,
) -> Result<Option<Position>, SdkError> {
    debug_assert_eq!(chain.chain_id(), key.chain_id);

    if let Some(cached) = cache.position(key) {
        debug!(?key, hit = cached.is_some(), "position cache hit");
        return Ok(cached);
    }

    let provider = connector.provider(key.chain_id)?;
    let vault = IVault::new(chain.contract(ContractKind::Vault), provider);
    let info = vault
        .getPosition(key.account, key.collateral_token, key.index_token, key.is_long)
        .call()
        .await?;

    // The vault reports empty slots as an all-zero tuple
    let position = (!info.size.is_zero()).then(|| Position::new(key, &info));
    cache.insert_position(*key, position.clone());
    debug!(?key, found = position.is_some(), "position fetched from vault");
    Ok(position)
}
