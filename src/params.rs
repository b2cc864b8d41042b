use alloy::primitives::{Address, B256, Bytes, U256};

use crate::{
    fees,
    num,
    position::Position,
    types::{MutationKind, MutationRequest, TokenInfo},
};

/// Parameter tuple for the router's increase-position calls.
#[derive(Clone, Debug)]
pub struct IncreaseParams {
    pub path: Vec<Address>,
    pub index_token: Address,
    pub amount_in: U256,
    pub min_out: U256,
    pub size_delta: U256,
    pub is_long: bool,
    pub acceptable_price: U256,
    pub execution_fee: U256,
    pub referral_code: B256,
    pub callback_target: Address,
    /// Pyth updates posted with the request; non-empty routes the call
    /// to `createIncreasePositionV2`.
    pub price_update_data: Vec<Bytes>,
}

/// Parameter tuple for `createDecreasePosition`.
#[derive(Clone, Debug)]
pub struct DecreaseParams {
    pub path: Vec<Address>,
    pub index_token: Address,
    pub collateral_delta: U256,
    pub size_delta: U256,
    pub is_long: bool,
    pub receiver: Address,
    pub acceptable_price: U256,
    pub min_out: U256,
    pub execution_fee: U256,
    pub withdraw_native: bool,
    pub callback_target: Address,
}

/// Transaction-level overrides attached to the call parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallOverrides {
    pub value: Option<U256>,
    pub gas: Option<u64>,
}

/// Tagged union over the router methods a mutation can encode to.
#[derive(Clone, Debug)]
pub enum CallParams {
    Increase(IncreaseParams),
    Decrease(DecreaseParams),
}

/// Parameter Builder output, consumed only by the transaction encoder.
#[derive(Clone, Debug)]
pub struct CollateralCall {
    pub params: CallParams,
    pub overrides: CallOverrides,
}

/// Acceptable price bound for the mutation, slippage-adjusted so the
/// trade can never execute worse than requested.
///
/// Increases bound the worst fill from above for longs (pay at most
/// this much) and from below for shorts; decreases mirror that.
/// Increases quote against the oracle's max price, decreases against
/// its min price.
pub fn acceptable_price(request: &MutationRequest, to_token: &TokenInfo) -> U256 {
    let bps = request.slippage_bps();
    if request.kind().is_increase() {
        if request.is_long() {
            num::add_slippage(to_token.max_price, bps)
        } else {
            num::sub_slippage(to_token.max_price, bps)
        }
    } else if request.is_long() {
        num::sub_slippage(to_token.min_price, bps)
    } else {
        num::add_slippage(to_token.min_price, bps)
    }
}

/// Computes the protocol call parameters for a validated mutation
/// request.
///
/// The orchestrator has already checked the request kind and, where
/// required, that a position exists; this builder only derives values.
/// `position` is used to cap reduce-only deltas. All arithmetic is
/// fixed-precision integer.
pub fn build_collateral_call(
    request: &MutationRequest,
    position: Option<&Position>,
    to_token: &TokenInfo,
    collateral_token: &TokenInfo,
    execution_fee: U256,
    pyth_fee: U256,
    price_update_data: Vec<Bytes>,
) -> CollateralCall {
    let acceptable_price = acceptable_price(request, to_token);
    // USD notional of the transaction amount, valued conservatively at
    // the collateral token's min price
    let amount_usd = num::token_to_usd(
        request.amount(),
        collateral_token.min_price,
        collateral_token.decimals,
    );

    match request.kind() {
        MutationKind::Deposit | MutationKind::IncreasePosition => {
            let size_delta = if request.kind().is_collateral_only() {
                U256::ZERO
            } else {
                amount_usd
            };
            let value = fees::increase_position_value(
                request.amount(),
                pyth_fee,
                execution_fee,
                collateral_token.is_native,
            );
            let path = swap_path(collateral_token.address, to_token.address);
            CollateralCall {
                params: CallParams::Increase(IncreaseParams {
                    path,
                    index_token: to_token.address,
                    amount_in: request.amount(),
                    min_out: U256::ZERO,
                    size_delta,
                    is_long: request.is_long(),
                    acceptable_price,
                    execution_fee,
                    referral_code: B256::ZERO,
                    callback_target: Address::ZERO,
                    price_update_data,
                }),
                overrides: CallOverrides {
                    value: Some(value),
                    gas: None,
                },
            }
        }
        MutationKind::Withdraw | MutationKind::DecreasePosition => {
            let (collateral_delta, size_delta) = if request.kind().is_collateral_only() {
                (amount_usd, U256::ZERO)
            } else {
                // Reduce-only: never shrink below zero size
                let cap = position.map(Position::size).unwrap_or(U256::ZERO);
                (U256::ZERO, amount_usd.min(cap))
            };
            let path = swap_path(to_token.address, collateral_token.address);
            CollateralCall {
                params: CallParams::Decrease(DecreaseParams {
                    path,
                    index_token: to_token.address,
                    collateral_delta,
                    size_delta,
                    is_long: request.is_long(),
                    receiver: request.account(),
                    acceptable_price,
                    min_out: U256::ZERO,
                    execution_fee,
                    withdraw_native: collateral_token.is_native,
                    callback_target: Address::ZERO,
                }),
                overrides: CallOverrides {
                    value: Some(execution_fee + pyth_fee),
                    gas: None,
                },
            }
        }
    }
}

fn swap_path(from: Address, to: Address) -> Vec<Address> {
    if from == to { vec![from] } else { vec![from, to] }
}
