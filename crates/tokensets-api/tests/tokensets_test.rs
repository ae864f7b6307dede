use tokensets_api::tokensets::{
    PortfoliosResponse, RebalancingSetsResponse, TOKENSETS_API_BASE, TokenSet, TokenSetsClient,
};

// ============================================================================
// Unit Tests (no network required)
// ============================================================================

#[test]
fn test_token_set_deserialization_full() {
    let json = r#"{
        "id": "ethbtcrsi7030",
        "address": "0xBA1A4b1E3b2F1c9E5D7C9a9b0c4D3e2F1A0B9C8D",
        "name": "ETH/BTC RSI Ratio Trading Set",
        "symbol": "ETHBTCRSI7030",
        "image": "https://example.com/logo.png",
        "market_cap": 1234567.89,
        "price_usd": 103.25
    }"#;

    let set: TokenSet = serde_json::from_str(json).expect("Should deserialize");
    assert_eq!(set.id, "ethbtcrsi7030");
    assert_eq!(set.address, "0xBA1A4b1E3b2F1c9E5D7C9a9b0c4D3e2F1A0B9C8D");
    assert_eq!(set.symbol, Some("ETHBTCRSI7030".to_string()));
    assert_eq!(set.image, Some("https://example.com/logo.png".to_string()));
    assert_eq!(set.market_cap, Some(1234567.89));
    assert_eq!(set.price_usd, Some(103.25));
}

#[test]
fn test_token_set_numeric_strings() {
    let json = r#"{
        "id": "a",
        "address": "0x1",
        "name": "A",
        "market_cap": "2500000.5",
        "price_usd": " 12.5 "
    }"#;

    let set: TokenSet = serde_json::from_str(json).expect("Should deserialize");
    assert_eq!(set.market_cap, Some(2500000.5));
    assert_eq!(set.price_usd, Some(12.5));
}

#[test]
fn test_token_set_missing_and_null_amounts() {
    let json = r#"{"id": "a", "address": "0x1", "name": "A", "market_cap": null, "price_usd": ""}"#;

    let set: TokenSet = serde_json::from_str(json).expect("Should deserialize");
    assert!(set.market_cap.is_none());
    assert!(set.price_usd.is_none());
    assert!(set.image.is_none());
    assert!(set.symbol.is_none());
}

#[test]
fn test_null_or_missing_name_keeps_the_row() {
    let json = r#"{"portfolios": [
        {"id": "a", "address": "0x1", "name": null},
        {"id": "b", "address": "0x2"},
        {"id": "c", "address": "0x3", "name": "C"}
    ]}"#;
    let response: PortfoliosResponse = serde_json::from_str(json).expect("Should deserialize");
    let names: Vec<&str> = response.portfolios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["", "", "C"]);
}

#[test]
fn test_token_set_rejects_garbage_amount() {
    let json = r#"{"id": "a", "address": "0x1", "name": "A", "price_usd": "twelve"}"#;
    assert!(serde_json::from_str::<TokenSet>(json).is_err());
}

#[test]
fn test_portfolios_response_preserves_order() {
    let json = r#"{
        "portfolios": [
            {"id": "p1", "address": "0x1", "name": "First"},
            {"id": "p2", "address": "0x2", "name": "Second"}
        ]
    }"#;

    let response: PortfoliosResponse = serde_json::from_str(json).expect("Should deserialize");
    let ids: Vec<&str> = response.portfolios.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[test]
fn test_rebalancing_sets_response_missing_list() {
    let response: RebalancingSetsResponse =
        serde_json::from_str("{}").expect("Should deserialize");
    assert!(response.rebalancing_sets.is_empty());
}

#[test]
fn test_client_urls() {
    let client = TokenSetsClient::new();
    assert_eq!(client.base_url(), TOKENSETS_API_BASE);
    assert_eq!(
        client.portfolios_url(),
        "https://api.tokensets.com/v2/portfolios"
    );
    assert_eq!(
        client.rebalancing_sets_url(),
        "https://api.tokensets.com/v2/rebalancing_sets"
    );
}

#[test]
fn test_client_base_url_trailing_slash() {
    let client = TokenSetsClient::with_base_url("http://localhost:8080/v2/");
    assert_eq!(client.portfolios_url(), "http://localhost:8080/v2/portfolios");
}

// ============================================================================
// Integration Tests (require network)
// ============================================================================

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_all_sets() {
    let client = TokenSetsClient::new();
    let result = client.fetch_all_sets().await;
    assert!(result.is_ok(), "Should fetch rebalancing sets: {:?}", result.err());
}

#[tokio::test]
async fn test_fetch_against_closed_port_fails() {
    let client = TokenSetsClient::with_base_url("http://127.0.0.1:9");
    assert!(client.fetch_portfolios().await.is_err());
}
