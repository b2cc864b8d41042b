use alloy::primitives::U256;
use fastnum::{
    bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

/// Denominator of basis-point fractions used by the protocol's
/// acceptable-price convention.
pub const BASIS_POINTS_DIVISOR: u64 = 10_000;

/// Fixed-point precision of the protocol's USD-denominated values
/// (prices, position size, collateral).
pub const USD_DECIMALS: u8 = 30;

/// `10^decimals` as a fixed-precision integer.
pub fn pow10(decimals: u8) -> U256 {
    U256::from(10u8).pow(U256::from(decimals))
}

/// Price bound raised by `bps` basis points:
/// `price * (10000 + bps) / 10000`.
pub fn add_slippage(price: U256, bps: u16) -> U256 {
    let divisor = U256::from(BASIS_POINTS_DIVISOR);
    price * (divisor + U256::from(bps)) / divisor
}

/// Price bound lowered by `bps` basis points:
/// `price * (10000 - bps) / 10000`.
pub fn sub_slippage(price: U256, bps: u16) -> U256 {
    let divisor = U256::from(BASIS_POINTS_DIVISOR);
    price * (divisor - U256::from(bps)) / divisor
}

/// USD value of a token amount at the given fixed-point price:
/// `amount * price / 10^decimals`, where `decimals` is the token's
/// own precision. The result keeps the price's precision.
pub fn token_to_usd(amount: U256, price: U256, decimals: u8) -> U256 {
    amount * price / pow10(decimals)
}

/// Fixed-point to decimal converter for a token precision.
///
/// Lives at the SDK's human boundary only (CLI parsing and display);
/// the transaction pipeline itself stays in integer units.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    pub fn from_unsigned<const N: usize>(&self, value: U256) -> UnsignedDecimal<N> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())
            .expect("Converter: U256 -> UInt::<N>");
        UnsignedDecimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    pub fn to_unsigned<const N: usize>(&self, value: UnsignedDecimal<N>) -> U256 {
        let rescaled = value.rescale(self.decimals as i16);
        U256::from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
    }
}
