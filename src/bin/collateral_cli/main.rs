//! Collateral mutation builder for the perp protocol.
//!
//! Builds a signable deposit/withdraw/increase/decrease transaction
//! from CLI inputs and prints it; nothing is submitted. Useful for
//! inspecting what the SDK would hand to a wallet.

mod config;
mod error;

use alloy::{
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use clap::Parser;
use perp_sdk::{
    Chain, Registry,
    cache::SessionCache,
    client::PerpClient,
    fees::FixedPriceSource,
    num::{Converter, USD_DECIMALS},
    provider::StaticConnector,
    types::MutationKind,
};
use std::process::exit;
use tracing::{error, info};
use url::Url;

use config::{CliConfig, EnvConfig};

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(env_config, cli_config).await {
        error!(%e, "Failed to build transaction");
        exit(1);
    }
}

async fn run(env_config: EnvConfig, cli_config: CliConfig) -> error::Result<()> {
    let signer: PrivateKeySigner = env_config
        .private_key
        .parse()
        .map_err(error::Error::AlloySigner)?;
    let account: Address = signer.address();

    let node_url = Url::parse(&env_config.node_rpc_url)?;
    let provider = DynProvider::new(ProviderBuilder::new().wallet(signer).connect_http(node_url));

    let chain = Chain::custom(
        env_config.chain_id,
        env_config.vault_address()?,
        env_config.position_router_address()?,
        env_config.order_book_address()?,
        env_config.pyth_address()?,
        env_config.native_symbol.clone().unwrap_or_else(|| "ETH".to_string()),
        env_config.native_decimals.unwrap_or(18),
    );

    let client = PerpClient::new(
        Registry::new([chain]),
        StaticConnector::new().with_provider(env_config.chain_id, provider),
    );
    let cache = SessionCache::new();

    let request = cli_config.to_request(account, env_config.chain_id)?;
    let to_token = cli_config.target_token_info()?;
    let collateral_token = cli_config.collateral_token_info()?;

    info!(?request, "Building collateral mutation");

    let response = match request.kind() {
        MutationKind::Deposit => {
            client
                .deposit_collateral(&request, &to_token, &collateral_token, vec![], &cache)
                .await?
        }
        MutationKind::Withdraw => {
            client
                .withdraw_collateral(&request, &to_token, &collateral_token, vec![], &cache)
                .await?
        }
        MutationKind::IncreasePosition => {
            client
                .increase_position(&request, &to_token, &collateral_token, vec![], &cache)
                .await?
        }
        MutationKind::DecreasePosition => {
            client
                .decrease_position(&request, &to_token, &collateral_token, vec![], &cache)
                .await?
        }
    };

    info!(
        status = response.status_code(),
        message = ?response.message(),
        "Pipeline finished"
    );

    for tx in response.tx_data() {
        println!("{tx:#?}");
    }

    // Optional USD estimate of the execution fee, against a fixed
    // injected price
    if let Some(price) = cli_config.native_price_usd()? {
        let source = FixedPriceSource::new().with_price(env_config.chain_id, price);
        match client
            .min_execution_fee_usd(env_config.chain_id, &source, &cache)
            .await?
        {
            Some(fee_usd) => {
                let fee_display = Converter::new(USD_DECIMALS).from_unsigned::<4>(fee_usd);
                info!(display = %fee_display, "Minimum execution fee (USD)");
            }
            None => info!("No execution fee quoted"),
        }
    }

    Ok(())
}
