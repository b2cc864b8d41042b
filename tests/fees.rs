use alloy::primitives::{Address, U256};
use perp_sdk::{
    Chain, Registry,
    cache::SessionCache,
    client::PerpClient,
    fees::{FeeKind, FixedPriceSource},
    num,
    provider::StaticConnector,
};

const CHAIN_ID: u64 = 42;

fn chain() -> Chain {
    Chain::custom(
        CHAIN_ID,
        Address::repeat_byte(0x01),
        Address::repeat_byte(0x02),
        Address::repeat_byte(0x03),
        Address::repeat_byte(0x04),
        "ETH".to_string(),
        18,
    )
}

fn offline_client() -> PerpClient<StaticConnector> {
    PerpClient::new(Registry::new([chain()]), StaticConnector::new())
}

#[tokio::test]
async fn test_position_fee_is_returned_verbatim() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_fee_quote(CHAIN_ID, FeeKind::Position, U256::from(1000u64));

    let fee = client
        .min_execution_fee(FeeKind::Position, CHAIN_ID, &cache)
        .await
        .unwrap();
    assert_eq!(fee, U256::from(1000u64));
}

#[tokio::test]
async fn test_order_fee_adds_one_unit_over_the_quote() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_fee_quote(CHAIN_ID, FeeKind::Order, U256::from(1000u64));

    let fee = client
        .min_execution_fee(FeeKind::Order, CHAIN_ID, &cache)
        .await
        .unwrap();
    assert_eq!(fee, U256::from(1001u64));

    // The adjustment is applied per read, not accumulated in the cache
    let fee = client
        .min_execution_fee(FeeKind::Order, CHAIN_ID, &cache)
        .await
        .unwrap();
    assert_eq!(fee, U256::from(1001u64));
}

#[tokio::test]
async fn test_fee_usd_converts_through_native_decimals() {
    let client = offline_client();
    let cache = SessionCache::new();
    // 0.002 of an 18-decimals native token
    cache.insert_fee_quote(
        CHAIN_ID,
        FeeKind::Position,
        U256::from(2u64) * num::pow10(15),
    );
    let source = FixedPriceSource::new().with_price(CHAIN_ID, U256::from(3000u64));

    let fee_usd = client
        .min_execution_fee_usd(CHAIN_ID, &source, &cache)
        .await
        .unwrap();
    // 0.002 * 3000 = 6
    assert_eq!(fee_usd, Some(U256::from(6u64)));
}

#[tokio::test]
async fn test_fee_usd_is_absent_when_no_fee_is_quoted() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_fee_quote(CHAIN_ID, FeeKind::Position, U256::ZERO);
    let source = FixedPriceSource::new().with_price(CHAIN_ID, U256::from(3000u64));

    let fee_usd = client
        .min_execution_fee_usd(CHAIN_ID, &source, &cache)
        .await
        .unwrap();
    assert_eq!(fee_usd, None);
}

#[tokio::test]
async fn test_fee_usd_is_absent_without_a_price_quote() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_fee_quote(CHAIN_ID, FeeKind::Position, U256::from(1000u64));

    // Empty price source: no quote for any chain
    let fee_usd = client
        .min_execution_fee_usd(CHAIN_ID, &FixedPriceSource::new(), &cache)
        .await
        .unwrap();
    assert_eq!(fee_usd, None);
}

#[tokio::test]
async fn test_gas_price_is_served_from_cache() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_gas_price(CHAIN_ID, 100_000_000);

    let price = client.gas_price(CHAIN_ID, &cache).await.unwrap();
    assert_eq!(price, 100_000_000);
}
