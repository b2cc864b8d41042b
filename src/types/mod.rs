mod request;
mod response;
mod token;

pub use request::{MutationKind, MutationRequest};
pub use response::{MutationResponse, TxData, STATUS_BAD_REQUEST, STATUS_OK};
pub use token::TokenInfo;

/// EVM chain ID.
pub type ChainId = u64;

/// Slippage tolerance in integer basis points (1 bps = 0.01%).
pub type BasisPoints = u16;
