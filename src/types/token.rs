use alloy::primitives::{Address, U256};

/// Token metadata plus its current oracle price bounds.
///
/// Fetched externally (token registry + price feed) and read-only
/// within the transaction pipeline. Prices are fixed-point integers in
/// the protocol's USD precision; `max_price`/`min_price` are the oracle
/// spread bounds, used for increase and decrease acceptable prices
/// respectively.
#[derive(Clone, Debug)]
pub struct TokenInfo {
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    /// Marks the chain's gas token; its deposits are paid in `msg.value`.
    pub is_native: bool,
    pub max_price: U256,
    pub min_price: U256,
}

impl TokenInfo {
    /// `10^decimals`, the token's own fixed-point scale.
    pub fn scale(&self) -> U256 {
        crate::num::pow10(self.decimals)
    }
}
