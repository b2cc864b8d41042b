use alloy::{
    primitives::{Address, Bytes, TxKind},
    rpc::types::TransactionInput,
    sol_types::SolCall,
};

use crate::{
    Chain, ContractKind,
    abi::router::IPositionRouter,
    params::{CallParams, CollateralCall},
    types::TxData,
};

/// ABI-encodes the built call parameters against the position router
/// plugin and wraps them into a signable transaction.
///
/// Purely constructs the payload — nothing is signed or submitted. The
/// `sol!`-generated call structs fix method arity and argument types at
/// compile time, so a malformed calldata cannot be produced here; the
/// fallible part of construction (resolving the chain) happens in the
/// orchestrator before this point.
pub fn encode_mutation(account: Address, chain: &Chain, call: &CollateralCall) -> TxData {
    let plugin = chain.contract(ContractKind::PositionRouter);
    let data: Bytes = match &call.params {
        CallParams::Increase(p) if p.price_update_data.is_empty() => {
            IPositionRouter::createIncreasePositionCall {
                path: p.path.clone(),
                indexToken: p.index_token,
                amountIn: p.amount_in,
                minOut: p.min_out,
                sizeDelta: p.size_delta,
                isLong: p.is_long,
                acceptablePrice: p.acceptable_price,
                executionFee: p.execution_fee,
                referralCode: p.referral_code,
                callbackTarget: p.callback_target,
            }
            .abi_encode()
            .into()
        }
        CallParams::Increase(p) => IPositionRouter::createIncreasePositionV2Call {
            path: p.path.clone(),
            indexToken: p.index_token,
            amountIn: p.amount_in,
            minOut: p.min_out,
            sizeDelta: p.size_delta,
            isLong: p.is_long,
            acceptablePrice: p.acceptable_price,
            executionFee: p.execution_fee,
            referralCode: p.referral_code,
            callbackTarget: p.callback_target,
            priceUpdateData: p.price_update_data.clone(),
        }
        .abi_encode()
        .into(),
        CallParams::Decrease(p) => IPositionRouter::createDecreasePositionCall {
            path: p.path.clone(),
            indexToken: p.index_token,
            collateralDelta: p.collateral_delta,
            sizeDelta: p.size_delta,
            isLong: p.is_long,
            receiver: p.receiver,
            acceptablePrice: p.acceptable_price,
            minOut: p.min_out,
            executionFee: p.execution_fee,
            withdrawETH: p.withdraw_native,
            callbackTarget: p.callback_target,
        }
        .abi_encode()
        .into(),
    };

    TxData {
        from: Some(account),
        to: Some(TxKind::Call(plugin)),
        input: TransactionInput::new(data),
        value: call.overrides.value,
        gas: call.overrides.gas,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{B256, U256};

    use crate::params::{CallOverrides, DecreaseParams, IncreaseParams};

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

    fn increase_params(price_update_data: Vec<Bytes>) -> IncreaseParams {
        IncreaseParams {
            path: vec![Address::repeat_byte(0x22)],
            index_token: Address::repeat_byte(0x33),
            amount_in: U256::from(500u64),
            min_out: U256::ZERO,
            size_delta: U256::ZERO,
            is_long: true,
            acceptable_price: U256::from(30_090u64),
            execution_fee: U256::from(1000u64),
            referral_code: B256::ZERO,
            callback_target: Address::ZERO,
            price_update_data,
        }
    }

    #[test]
    fn test_increase_selects_v1_without_price_updates() {
        let call = CollateralCall {
            params: CallParams::Increase(increase_params(vec![])),
            overrides: CallOverrides {
                value: Some(U256::from(1000u64)),
                gas: None,
            },
        };
        let tx = encode_mutation(Address::repeat_byte(0xaa), &chain(), &call);

        assert_eq!(tx.from, Some(Address::repeat_byte(0xaa)));
        assert_eq!(tx.to, Some(TxKind::Call(Address::repeat_byte(0x02))));
        assert_eq!(tx.value, Some(U256::from(1000u64)));
        let data = tx.input.input().unwrap();
        assert_eq!(
            data[..4],
            IPositionRouter::createIncreasePositionCall::SELECTOR[..]
        );
    }

    #[test]
    fn test_increase_selects_v2_with_price_updates() {
        let call = CollateralCall {
            params: CallParams::Increase(increase_params(vec![Bytes::from_static(b"\x01")])),
            overrides: CallOverrides::default(),
        };
        let tx = encode_mutation(Address::repeat_byte(0xaa), &chain(), &call);

        let data = tx.input.input().unwrap();
        assert_eq!(
            data[..4],
            IPositionRouter::createIncreasePositionV2Call::SELECTOR[..]
        );
    }

    #[test]
    fn test_decrease_encodes_router_method() {
        let call = CollateralCall {
            params: CallParams::Decrease(DecreaseParams {
                path: vec![Address::repeat_byte(0x33), Address::repeat_byte(0x22)],
                index_token: Address::repeat_byte(0x33),
                collateral_delta: U256::from(3u64),
                size_delta: U256::ZERO,
                is_long: true,
                receiver: Address::repeat_byte(0xaa),
                acceptable_price: U256::from(29_810u64),
                min_out: U256::ZERO,
                execution_fee: U256::from(1000u64),
                withdraw_native: false,
                callback_target: Address::ZERO,
            }),
            overrides: CallOverrides {
                value: Some(U256::from(1000u64)),
                gas: None,
            },
        };
        let tx = encode_mutation(Address::repeat_byte(0xaa), &chain(), &call);

        let data = tx.input.input().unwrap();
        assert_eq!(
            data[..4],
            IPositionRouter::createDecreasePositionCall::SELECTOR[..]
        );
    }
}
