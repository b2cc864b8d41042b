use alloy::primitives::U256;
use dashmap::DashMap;

use crate::{
    fees::FeeKind,
    position::{Position, PositionKey},
    types::ChainId,
};

/// Session-scoped cache of idempotent on-chain facts.
///
/// Supplied by the caller and shared across orchestrator calls within
/// one session to avoid redundant chain reads. The SDK defines no
/// eviction; lifetime is caller-controlled — drop the cache to drop the
/// facts. Concurrent calls sharing one instance may race on population,
/// which is last-write-wins.
///
/// Position entries cache the absence of a position too: `None` means
/// "the vault was asked and reported no open position in this slot".
#[derive(Debug, Default)]
pub struct SessionCache {
    positions: DashMap<PositionKey, Option<Position>>,
    fee_quotes: DashMap<(ChainId, FeeKind), U256>,
    gas_prices: DashMap<ChainId, u128>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` is a cache miss; `Some(None)` is a cached
    /// "no open position".
    pub fn position(&self, key: &PositionKey) -> Option<Option<Position>> {
        self.positions.get(key).map(|entry| entry.clone())
    }

    pub fn insert_position(&self, key: PositionKey, position: Option<Position>) {
        self.positions.insert(key, position);
    }

    /// Raw minimum-execution-fee quote as read from the plugin contract,
    /// before any kind-specific adjustment.
    pub fn fee_quote(&self, chain_id: ChainId, kind: FeeKind) -> Option<U256> {
        self.fee_quotes.get(&(chain_id, kind)).map(|entry| *entry)
    }

    pub fn insert_fee_quote(&self, chain_id: ChainId, kind: FeeKind, quote: U256) {
        self.fee_quotes.insert((chain_id, kind), quote);
    }

    pub fn gas_price(&self, chain_id: ChainId) -> Option<u128> {
        self.gas_prices.get(&chain_id).map(|entry| *entry)
    }

    pub fn insert_gas_price(&self, chain_id: ChainId, price: u128) {
        self.gas_prices.insert(chain_id, price);
    }
}
