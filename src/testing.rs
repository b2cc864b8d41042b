//! Test utilities.
//!
//! [`PositionBuilder`] creates [`Position`] instances with controlled
//! values so pipeline tests can seed a [`crate::cache::SessionCache`]
//! without a live chain behind it.

use alloy::primitives::{Address, I256, U256};

use crate::{
    abi::vault::IVault::getPositionReturn,
    position::{Position, PositionKey},
    types::ChainId,
};

/// Builder of test [`Position`] instances.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    account: Address,
    collateral_token: Address,
    index_token: Address,
    is_long: bool,
    chain_id: ChainId,
    size: U256,
    collateral: U256,
    average_price: U256,
    realised_pnl: I256,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self {
            account: Address::repeat_byte(0xaa),
            collateral_token: Address::repeat_byte(0x22),
            index_token: Address::repeat_byte(0x33),
            is_long: true,
            chain_id: 42,
            size: U256::from(1_000u64),
            collateral: U256::from(100u64),
            average_price: U256::from(30_000u64),
            realised_pnl: I256::ZERO,
        }
    }
}

impl PositionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: Address) -> Self {
        self.account = account;
        self
    }

    pub fn collateral_token(mut self, token: Address) -> Self {
        self.collateral_token = token;
        self
    }

    pub fn index_token(mut self, token: Address) -> Self {
        self.index_token = token;
        self
    }

    pub fn is_long(mut self, is_long: bool) -> Self {
        self.is_long = is_long;
        self
    }

    pub fn chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn size(mut self, size: U256) -> Self {
        self.size = size;
        self
    }

    pub fn collateral(mut self, collateral: U256) -> Self {
        self.collateral = collateral;
        self
    }

    pub fn average_price(mut self, price: U256) -> Self {
        self.average_price = price;
        self
    }

    pub fn realised_pnl(mut self, pnl: I256) -> Self {
        self.realised_pnl = pnl;
        self
    }

    /// The cache key matching the built position's slot.
    pub fn key(&self) -> PositionKey {
        PositionKey::new(
            self.account,
            self.collateral_token,
            self.index_token,
            self.is_long,
            self.chain_id,
        )
    }

    pub fn build(&self) -> Position {
        Position::new(
            &self.key(),
            &getPositionReturn {
                size: self.size,
                collateral: self.collateral,
                averagePrice: self.average_price,
                entryFundingRate: U256::ZERO,
                reserveAmount: U256::ZERO,
                realisedPnl: self.realised_pnl,
                lastIncreasedTime: U256::ZERO,
            },
        )
    }
}
