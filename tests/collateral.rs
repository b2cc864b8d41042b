use alloy::primitives::{Address, U256};
use perp_sdk::{
    Chain, Registry,
    cache::SessionCache,
    client::PerpClient,
    fees::FeeKind,
    provider::StaticConnector,
    testing::PositionBuilder,
    types::{MutationKind, MutationRequest, STATUS_BAD_REQUEST, STATUS_OK, TokenInfo},
};

const CHAIN_ID: u64 = 42;

const ACCOUNT: Address = Address::repeat_byte(0xaa);
const USDC: Address = Address::repeat_byte(0x22);
const BTC: Address = Address::repeat_byte(0x33);
const ROUTER: Address = Address::repeat_byte(0x02);

fn chain() -> Chain {
    Chain::custom(
        CHAIN_ID,
        Address::repeat_byte(0x01),
        ROUTER,
        Address::repeat_byte(0x03),
        Address::repeat_byte(0x04),
        "ETH".to_string(),
        18,
    )
}

/// Client over an empty connector: any attempt to reach a chain fails
/// with `UnknownChain`, so every `Ok` outcome in these tests proves the
/// pipeline was served entirely from the session cache.
fn offline_client() -> PerpClient<StaticConnector> {
    PerpClient::new(Registry::new([chain()]), StaticConnector::new())
}

fn usdc() -> TokenInfo {
    TokenInfo {
        address: USDC,
        decimals: 0,
        symbol: "USDC".to_string(),
        is_native: false,
        max_price: U256::from(1u64),
        min_price: U256::from(1u64),
    }
}

fn btc() -> TokenInfo {
    TokenInfo {
        address: BTC,
        decimals: 18,
        symbol: "BTC".to_string(),
        is_native: false,
        max_price: U256::from(30_000u64),
        min_price: U256::from(29_900u64),
    }
}

fn request(kind: MutationKind) -> MutationRequest {
    MutationRequest::new(
        ACCOUNT,
        CHAIN_ID,
        kind,
        "USDC".to_string(),
        "BTC".to_string(),
        true,
        U256::from(500u64),
        30,
    )
}

fn position_builder() -> PositionBuilder {
    PositionBuilder::new()
        .account(ACCOUNT)
        .collateral_token(USDC)
        .index_token(BTC)
        .is_long(true)
        .chain_id(CHAIN_ID)
}

/// Cache with an open position in the request's slot and the execution
/// fee quote already populated.
fn seeded_cache() -> SessionCache {
    let cache = SessionCache::new();
    let builder = position_builder();
    cache.insert_position(builder.key(), Some(builder.build()));
    cache.insert_fee_quote(CHAIN_ID, FeeKind::Position, U256::from(1000u64));
    cache
}

#[tokio::test]
async fn test_mismatched_kind_is_rejected_without_chain_access() {
    let client = offline_client();
    let cache = SessionCache::new();

    // A withdraw-typed request sent to the deposit orchestrator; the
    // connector is empty, so reaching for a provider would surface as
    // an error instead of this clean 400
    let response = client
        .deposit_collateral(
            &request(MutationKind::Withdraw),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_BAD_REQUEST);
    assert_eq!(response.message(), ["the type is not correct"]);
    assert!(response.tx_data().is_empty());

    let response = client
        .withdraw_collateral(
            &request(MutationKind::Deposit),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();
    assert_eq!(response.status_code(), STATUS_BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_position_is_rejected() {
    let client = offline_client();
    let cache = SessionCache::new();
    // The vault has already answered "no position" for this slot
    cache.insert_position(position_builder().key(), None);

    let response = client
        .deposit_collateral(
            &request(MutationKind::Deposit),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_BAD_REQUEST);
    assert_eq!(response.message(), ["cannot find position info"]);
    assert!(response.tx_data().is_empty());
}

#[tokio::test]
async fn test_deposit_builds_increase_transaction() {
    let client = offline_client();
    let cache = seeded_cache();

    let response = client
        .deposit_collateral(
            &request(MutationKind::Deposit),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_OK);
    assert_eq!(response.message(), ["deposit success"]);
    assert_eq!(response.tx_data().len(), 1);

    let tx = &response.tx_data()[0];
    assert_eq!(tx.from, Some(ACCOUNT));
    assert_eq!(tx.to, Some(ROUTER.into()));
    // Non-native collateral: attached value covers the execution fee only
    assert_eq!(tx.value, Some(U256::from(1000u64)));
    assert!(!tx.input.input().unwrap().is_empty());
}

#[tokio::test]
async fn test_native_deposit_attaches_amount_to_value() {
    let client = offline_client();
    let cache = seeded_cache();
    let native_usdc = TokenInfo {
        is_native: true,
        ..usdc()
    };

    let response = client
        .deposit_collateral(
            &request(MutationKind::Deposit),
            &btc(),
            &native_usdc,
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_OK);
    // Execution fee 1000 plus the deposited 500, paid from the same
    // native balance
    assert_eq!(response.tx_data()[0].value, Some(U256::from(1500u64)));
}

#[tokio::test]
async fn test_withdraw_builds_decrease_transaction() {
    let client = offline_client();
    let cache = seeded_cache();

    let response = client
        .withdraw_collateral(
            &request(MutationKind::Withdraw),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_OK);
    assert_eq!(response.message(), ["withdraw success"]);
    assert_eq!(response.tx_data().len(), 1);
    assert_eq!(response.tx_data()[0].to, Some(ROUTER.into()));
}

#[tokio::test]
async fn test_increase_position_may_open_a_fresh_slot() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_position(position_builder().key(), None);
    cache.insert_fee_quote(CHAIN_ID, FeeKind::Position, U256::from(1000u64));

    let response = client
        .increase_position(
            &request(MutationKind::IncreasePosition),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_OK);
    assert_eq!(response.message(), ["increase position success"]);
}

#[tokio::test]
async fn test_decrease_position_requires_an_open_slot() {
    let client = offline_client();
    let cache = SessionCache::new();
    cache.insert_position(position_builder().key(), None);

    let response = client
        .decrease_position(
            &request(MutationKind::DecreasePosition),
            &btc(),
            &usdc(),
            vec![],
            &cache,
        )
        .await
        .unwrap();

    assert_eq!(response.status_code(), STATUS_BAD_REQUEST);
    assert_eq!(response.message(), ["cannot find position info"]);
}

#[tokio::test]
async fn test_unknown_chain_propagates_as_error() {
    let client = offline_client();
    let cache = SessionCache::new();

    let bad_request = MutationRequest::new(
        ACCOUNT,
        7,
        MutationKind::Deposit,
        "USDC".to_string(),
        "BTC".to_string(),
        true,
        U256::from(500u64),
        30,
    );

    // Infrastructure faults are not downgraded to a 400 response
    let result = client
        .deposit_collateral(&bad_request, &btc(), &usdc(), vec![], &cache)
        .await;
    assert!(result.is_err());
}
