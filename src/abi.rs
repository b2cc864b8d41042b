//! Solidity contract bindings for the protocol's on-chain surface.
//!
//! Generated with alloy's `sol!` macro from the deployed interfaces.
//! Only the read methods and mutation entry points this SDK touches are
//! declared; the full contracts carry much more.

#[allow(clippy::too_many_arguments)]
pub mod vault {
    alloy::sol! {
        /// Core vault holding collateral and open positions.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IVault {
            function getPosition(
                address account,
                address collateralToken,
                address indexToken,
                bool isLong
            ) external view returns (
                uint256 size,
                uint256 collateral,
                uint256 averagePrice,
                uint256 entryFundingRate,
                uint256 reserveAmount,
                int256 realisedPnl,
                uint256 lastIncreasedTime
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub mod router {
    alloy::sol! {
        /// Position router plugin: queued market increase/decrease requests,
        /// executed by keepers against fresh oracle prices.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IPositionRouter {
            function minExecutionFee() external view returns (uint256);

            function createIncreasePosition(
                address[] calldata path,
                address indexToken,
                uint256 amountIn,
                uint256 minOut,
                uint256 sizeDelta,
                bool isLong,
                uint256 acceptablePrice,
                uint256 executionFee,
                bytes32 referralCode,
                address callbackTarget
            ) external payable returns (bytes32);

            function createIncreasePositionV2(
                address[] calldata path,
                address indexToken,
                uint256 amountIn,
                uint256 minOut,
                uint256 sizeDelta,
                bool isLong,
                uint256 acceptablePrice,
                uint256 executionFee,
                bytes32 referralCode,
                address callbackTarget,
                bytes[] calldata priceUpdateData
            ) external payable returns (bytes32);

            function createDecreasePosition(
                address[] calldata path,
                address indexToken,
                uint256 collateralDelta,
                uint256 sizeDelta,
                bool isLong,
                address receiver,
                uint256 acceptablePrice,
                uint256 minOut,
                uint256 executionFee,
                bool withdrawETH,
                address callbackTarget
            ) external payable returns (bytes32);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub mod order_book {
    alloy::sol! {
        /// Limit order book plugin.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IOrderBook {
            function minExecutionFee() external view returns (uint256);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub mod pyth {
    alloy::sol! {
        /// Pyth price-feed contract, quoted for the cost of posting
        /// price updates alongside a position request.
        #[derive(Debug)]
        #[sol(rpc)]
        interface IPyth {
            function getUpdateFee(bytes[] calldata updateData) external view returns (uint256 feeAmount);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub mod errors {
    alloy::sol! {
        /// Revert errors emitted by the position router plugin.
        #[derive(Debug)]
        interface PositionRouter {
            error InsufficientExecutionFee(uint256 provided, uint256 required);
            error InvalidPathLength(uint256 length);
            error PriceSlippage(uint256 acceptablePrice, uint256 markPrice);
            error Paused();
        }
    }
}
