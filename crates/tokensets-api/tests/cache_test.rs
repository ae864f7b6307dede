use {
    std::path::PathBuf,
    tokensets_api::{FileCache, HistoricalClient, HistoricalEntry, MarketData},
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tokensets-api-cache-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_entry() -> HistoricalEntry {
    HistoricalEntry {
        id: Some("set".to_string()),
        symbol: None,
        contract_address: Some("0xabc".to_string()),
        market_data: Some(MarketData {
            price_change_percentage_24h: Some(-2.5),
            ..MarketData::default()
        }),
    }
}

#[test]
fn test_cache_roundtrip() {
    let dir = scratch_dir("roundtrip");
    let cache = FileCache::new(&dir).expect("Should create cache");

    cache.set("historical_0xabc", &sample_entry()).expect("Should write");
    let cached: Option<HistoricalEntry> = cache.get("historical_0xabc");
    assert_eq!(cached, Some(sample_entry()));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cache_miss() {
    let dir = scratch_dir("miss");
    let cache = FileCache::new(&dir).expect("Should create cache");
    assert!(cache.get::<HistoricalEntry>("nothing_here").is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_expired_entry_is_removed() {
    let dir = scratch_dir("expired");
    let cache = FileCache::new(&dir).expect("Should create cache");

    let stale = r#"{"data": {"id": "old"}, "cached_at": "2020-01-01T00:00:00Z", "ttl_seconds": 60}"#;
    std::fs::write(dir.join("historical_old.json"), stale).expect("Should write raw entry");

    assert!(cache.get::<HistoricalEntry>("historical_old").is_none());
    assert!(!dir.join("historical_old.json").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_entry_reads_as_miss() {
    let dir = scratch_dir("corrupt");
    let cache = FileCache::new(&dir).expect("Should create cache");

    std::fs::write(dir.join("broken.json"), "{not json").expect("Should write raw entry");
    assert!(cache.get::<HistoricalEntry>("broken").is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_keys_are_sanitized() {
    let dir = scratch_dir("sanitize");
    let cache = FileCache::new(&dir).expect("Should create cache");

    cache.set("a/b:c", &1u32).expect("Should write");
    assert!(dir.join("a_b_c.json").exists());
    assert_eq!(cache.get::<u32>("a/b:c"), Some(1));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_historical_client_serves_cached_entries() {
    let dir = scratch_dir("client");
    let cache = FileCache::new(&dir).expect("Should create cache").with_ttl(3600);
    cache
        .set("historical_0xabc", &sample_entry())
        .expect("Should write");

    // Unroutable base: only the cache can answer
    let mut client = HistoricalClient::with_base_url("http://127.0.0.1:9");
    client.set_cache(cache);

    let entries = client
        .get_token_sets_historical(&["0xABC".to_string()])
        .await
        .expect("Should be served from cache");
    assert_eq!(entries, vec![sample_entry()]);

    let _ = std::fs::remove_dir_all(&dir);
}
