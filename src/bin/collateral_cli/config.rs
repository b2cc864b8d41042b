//! Configuration for the collateral mutation builder.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): connection details,
//!   keys, contract deployment addresses
//! - CLI arguments: the mutation to build and the token metadata/prices
//!   it is priced against

use alloy::primitives::{Address, U256};
use clap::{Parser, ValueEnum};
use fastnum::{UD256, decimal::Context};
use perp_sdk::{
    num::{Converter, USD_DECIMALS},
    types::{MutationKind, MutationRequest, TokenInfo},
};

/// Environment configuration (connection details, deployment).
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Chain ID (e.g., 42161 for Arbitrum One)
    pub chain_id: u64,

    /// Vault contract address
    pub vault_address: String,

    /// Position router plugin address
    pub position_router_address: String,

    /// Order book plugin address
    pub order_book_address: String,

    /// Pyth price-feed contract address
    pub pyth_address: String,

    /// Private key of the account the transaction is built for
    pub private_key: String,

    /// RPC URL for the node
    pub node_rpc_url: String,

    /// Gas token symbol (default: ETH)
    pub native_symbol: Option<String>,

    /// Gas token decimals (default: 18)
    pub native_decimals: Option<u8>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn vault_address(&self) -> Result<Address, alloy::primitives::hex::FromHexError> {
        self.vault_address.parse()
    }

    pub fn position_router_address(&self) -> Result<Address, alloy::primitives::hex::FromHexError> {
        self.position_router_address.parse()
    }

    pub fn order_book_address(&self) -> Result<Address, alloy::primitives::hex::FromHexError> {
        self.order_book_address.parse()
    }

    pub fn pyth_address(&self) -> Result<Address, alloy::primitives::hex::FromHexError> {
        self.pyth_address.parse()
    }
}

/// Mutation to build.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Operation {
    Deposit,
    Withdraw,
    Increase,
    Decrease,
}

impl From<Operation> for MutationKind {
    fn from(value: Operation) -> Self {
        match value {
            Operation::Deposit => MutationKind::Deposit,
            Operation::Withdraw => MutationKind::Withdraw,
            Operation::Increase => MutationKind::IncreasePosition,
            Operation::Decrease => MutationKind::DecreasePosition,
        }
    }
}

/// CLI arguments describing the mutation and its pricing inputs.
#[derive(Debug, Parser)]
#[command(name = "collateral-cli")]
#[command(about = "Builds signable collateral/position transactions for the perp protocol")]
pub struct CliConfig {
    /// Operation to build a transaction for
    #[arg(long, value_enum)]
    pub operation: Operation,

    /// Build for a short position (defaults to long)
    #[arg(long)]
    pub short: bool,

    /// Collateral token address
    #[arg(long)]
    pub collateral_token: String,

    /// Collateral token symbol
    #[arg(long, default_value = "USDC")]
    pub collateral_symbol: String,

    /// Collateral token decimals
    #[arg(long, default_value_t = 6)]
    pub collateral_decimals: u8,

    /// Collateral token is the chain's gas token
    #[arg(long)]
    pub collateral_native: bool,

    /// Collateral token price in USD (e.g., "1.0")
    #[arg(long, default_value = "1")]
    pub collateral_price: String,

    /// Index token address
    #[arg(long)]
    pub target_token: String,

    /// Index token symbol
    #[arg(long, default_value = "BTC")]
    pub target_symbol: String,

    /// Index token decimals
    #[arg(long, default_value_t = 18)]
    pub target_decimals: u8,

    /// Index token oracle max price in USD (e.g., "30000")
    #[arg(long)]
    pub target_max_price: String,

    /// Index token oracle min price in USD (e.g., "29900")
    #[arg(long)]
    pub target_min_price: String,

    /// Transaction amount in collateral token units (e.g., "1.5")
    #[arg(long)]
    pub amount: String,

    /// Allowed slippage in basis points
    #[arg(long, default_value_t = 30)]
    pub slippage_bps: u16,

    /// Native token USD price for fee display (e.g., "3000");
    /// omit to skip the USD fee estimate
    #[arg(long)]
    pub native_price_usd: Option<String>,
}

impl CliConfig {
    /// Token metadata for the collateral side of the mutation.
    pub fn collateral_token_info(&self) -> Result<TokenInfo, ConfigError> {
        let price = parse_usd(&self.collateral_price)?;
        Ok(TokenInfo {
            address: parse_address(&self.collateral_token)?,
            decimals: self.collateral_decimals,
            symbol: self.collateral_symbol.clone(),
            is_native: self.collateral_native,
            max_price: price,
            min_price: price,
        })
    }

    /// Token metadata for the index side of the mutation.
    pub fn target_token_info(&self) -> Result<TokenInfo, ConfigError> {
        Ok(TokenInfo {
            address: parse_address(&self.target_token)?,
            decimals: self.target_decimals,
            symbol: self.target_symbol.clone(),
            is_native: false,
            max_price: parse_usd(&self.target_max_price)?,
            min_price: parse_usd(&self.target_min_price)?,
        })
    }

    /// The mutation request for the signer's account.
    pub fn to_request(
        &self,
        account: Address,
        chain_id: u64,
    ) -> Result<MutationRequest, ConfigError> {
        let amount = parse_amount(&self.amount, self.collateral_decimals)?;
        Ok(MutationRequest::new(
            account,
            chain_id,
            MutationKind::from(self.operation),
            self.collateral_symbol.clone(),
            self.target_symbol.clone(),
            !self.short,
            amount,
            self.slippage_bps,
        ))
    }

    /// Optional fixed native token price for the USD fee estimate.
    pub fn native_price_usd(&self) -> Result<Option<U256>, ConfigError> {
        self.native_price_usd
            .as_deref()
            .map(parse_usd)
            .transpose()
    }
}

fn parse_address(value: &str) -> Result<Address, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(value.to_string()))
}

/// Decimal token amount -> fixed-point integer units.
fn parse_amount(value: &str, decimals: u8) -> Result<U256, ConfigError> {
    let decimal = UD256::from_str(value, Context::default())
        .map_err(|_| ConfigError::InvalidAmount(value.to_string()))?;
    Ok(Converter::new(decimals).to_unsigned(decimal))
}

/// Decimal USD value -> the protocol's USD fixed-point precision.
fn parse_usd(value: &str) -> Result<U256, ConfigError> {
    let decimal = UD256::from_str(value, Context::default())
        .map_err(|_| ConfigError::InvalidPrice(value.to_string()))?;
    Ok(Converter::new(USD_DECIMALS).to_unsigned(decimal))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount value: {0}")]
    InvalidAmount(String),

    #[error("Invalid USD price value: {0}")]
    InvalidPrice(String),
}
