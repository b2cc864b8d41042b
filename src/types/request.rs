use alloy::primitives::{Address, U256};

use super::*;

/// Kind of the position mutation.
///
/// * [`MutationKind::Deposit`] adds collateral to an existing position
///   without changing its size (deleverages it).
/// * [`MutationKind::Withdraw`] removes collateral from an existing
///   position without changing its size.
/// * [`MutationKind::IncreasePosition`] opens a position or grows an
///   existing one, posting the transaction amount as fresh collateral.
/// * [`MutationKind::DecreasePosition`] is reduce-only and shrinks an
///   existing position by the transaction amount's notional value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MutationKind {
    Deposit,
    Withdraw,
    IncreasePosition,
    DecreasePosition,
}

/// Request to mutate collateral or size of a perpetual position.
///
/// Immutable once created; one request drives exactly one orchestrator
/// call and produces one signable transaction on success.
#[derive(Clone, derive_more::Debug)]
pub struct MutationRequest {
    account: Address,
    chain_id: ChainId,
    kind: MutationKind,
    collateral_token_symbol: String,
    target_token_symbol: String,
    is_long: bool,
    #[debug("{amount}")]
    amount: U256,
    slippage_bps: BasisPoints,
}

impl MutationRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account: Address,
        chain_id: ChainId,
        kind: MutationKind,
        collateral_token_symbol: String,
        target_token_symbol: String,
        is_long: bool,
        amount: U256,
        slippage_bps: BasisPoints,
    ) -> Self {
        Self {
            account,
            chain_id,
            kind,
            collateral_token_symbol,
            target_token_symbol,
            is_long,
            amount,
            slippage_bps,
        }
    }

    /// Wallet address the resulting transaction is sent from.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Chain the mutation targets.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Kind of the mutation.
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Symbol of the token paying for (or receiving) the mutation.
    pub fn collateral_token_symbol(&self) -> &str {
        &self.collateral_token_symbol
    }

    /// Symbol of the position's index token.
    pub fn target_token_symbol(&self) -> &str {
        &self.target_token_symbol
    }

    /// Position side.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// Transaction amount in the collateral token's own fixed-point units.
    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Allowed slippage on the acceptable price bound.
    pub fn slippage_bps(&self) -> BasisPoints {
        self.slippage_bps
    }
}

impl MutationKind {
    /// Whether the mutation maps onto the router's increase-position call.
    pub fn is_increase(&self) -> bool {
        matches!(self, MutationKind::Deposit | MutationKind::IncreasePosition)
    }

    /// Whether the mutation leaves position size untouched.
    pub fn is_collateral_only(&self) -> bool {
        matches!(self, MutationKind::Deposit | MutationKind::Withdraw)
    }
}
