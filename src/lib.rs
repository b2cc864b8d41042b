//! Perpetual protocol client SDK.
//!
//! # Overview
//!
//! Builds signable transaction payloads for the protocol's position
//! router — deposit/withdraw collateral, increase/decrease leveraged
//! positions — and reads the on-chain state those payloads are derived
//! from (positions, execution fees, prices). Nothing here signs or
//! submits; the produced [`types::TxData`] goes to whatever wallet the
//! caller trusts.
//!
//! Use [`client::PerpClient`] with a [`Registry`] of deployed chains
//! and an injected [`provider::ChainConnector`]; pass a
//! [`cache::SessionCache`] across calls to avoid re-reading on-chain
//! facts within one session.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * Swap path construction assumes the position's collateral is the
//!   index token for longs; multi-hop routes are not derived.
//! * Token metadata and price bounds come from the caller; no token
//!   registry or price feed client is bundled.
//!
//! # Testing
//!
//! [`testing`] module provides a builder of position fixtures for
//! seeding session caches in tests.

pub mod abi;
pub mod cache;
pub mod client;
pub mod encode;
pub mod error;
pub mod fees;
pub mod num;
pub mod params;
pub mod position;
pub mod provider;
pub mod signing;
pub mod testing;
pub mod types;

use alloy::primitives::Address;
use std::collections::HashMap;

use crate::{error::SdkError, types::ChainId};

/// Logical names of the protocol's deployed contracts.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContractKind {
    Vault,
    PositionRouter,
    OrderBook,
    Pyth,
}

/// Chain the protocol is deployed on, with its contract addresses and
/// native-token parameters.
#[derive(Clone, Debug)]
pub struct Chain {
    chain_id: ChainId,
    vault: Address,
    position_router: Address,
    order_book: Address,
    pyth: Address,
    native_symbol: String,
    native_decimals: u8,
}

impl Chain {
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        chain_id: ChainId,
        vault: Address,
        position_router: Address,
        order_book: Address,
        pyth: Address,
        native_symbol: String,
        native_decimals: u8,
    ) -> Self {
        Self {
            chain_id,
            vault,
            position_router,
            order_book,
            pyth,
            native_symbol,
            native_decimals,
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Address of the contract deployment by logical name.
    pub fn contract(&self, kind: ContractKind) -> Address {
        match kind {
            ContractKind::Vault => self.vault,
            ContractKind::PositionRouter => self.position_router,
            ContractKind::OrderBook => self.order_book,
            ContractKind::Pyth => self.pyth,
        }
    }

    /// Symbol of the chain's gas token.
    pub fn native_symbol(&self) -> &str {
        &self.native_symbol
    }

    /// Fixed-point precision of the chain's gas token.
    pub fn native_decimals(&self) -> u8 {
        self.native_decimals
    }
}

/// Lookup of known [`Chain`] deployments by chain ID.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    chains: HashMap<ChainId, Chain>,
}

impl Registry {
    pub fn new(chains: impl IntoIterator<Item = Chain>) -> Self {
        Self {
            chains: chains
                .into_iter()
                .map(|chain| (chain.chain_id(), chain))
                .collect(),
        }
    }

    pub fn get(&self, chain_id: ChainId) -> Result<&Chain, SdkError> {
        self.chains
            .get(&chain_id)
            .ok_or(SdkError::UnknownChain(chain_id))
    }

    /// Resolves a logical contract name on a chain, the
    /// `resolveAddress` entry point of the pipeline.
    pub fn contract(&self, kind: ContractKind, chain_id: ChainId) -> Result<Address, SdkError> {
        Ok(self.get(chain_id)?.contract(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Chain {
        Chain::custom(
            42,
            Address::repeat_byte(0x01),
            Address::repeat_byte(0x02),
            Address::repeat_byte(0x03),
            Address::repeat_byte(0x04),
            "ETH".to_string(),
            18,
        )
    }

    #[test]
    fn test_registry_resolves_contracts_by_name() {
        let registry = Registry::new([chain()]);

        assert_eq!(
            registry.contract(ContractKind::Vault, 42).unwrap(),
            Address::repeat_byte(0x01)
        );
        assert_eq!(
            registry.contract(ContractKind::PositionRouter, 42).unwrap(),
            Address::repeat_byte(0x02)
        );
        assert!(matches!(
            registry.contract(ContractKind::Vault, 7),
            Err(SdkError::UnknownChain(7))
        ));
    }
}
