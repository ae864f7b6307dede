use {
    crate::{
        cache::FileCache,
        error::{Result, TokenSetsError, snippet},
        logging::{log_debug, log_info, log_warn},
        tokensets::deserialize_flexible_f64,
    },
    futures_util::future::try_join_all,
    serde::{Deserialize, Serialize},
};

pub const HISTORICAL_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Point-in-time market data snapshot for one token set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub market_data: Option<MarketData>,
}

impl HistoricalEntry {
    /// Percentage change over `window`, if the API reported one
    pub fn change(&self, window: ChangeWindow) -> Option<f64> {
        self.market_data.as_ref().and_then(|md| window.value(md))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub price_change_percentage_7d: Option<f64>,
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub price_change_percentage_30d: Option<f64>,
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub price_change_percentage_200d: Option<f64>,
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub price_change_percentage_1y: Option<f64>,
}

/// Time window of a price-change percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeWindow {
    Day,
    Week,
    Month,
    SixMonths,
    Year,
}

impl ChangeWindow {
    pub const ALL: [ChangeWindow; 5] = [
        ChangeWindow::Day,
        ChangeWindow::Week,
        ChangeWindow::Month,
        ChangeWindow::SixMonths,
        ChangeWindow::Year,
    ];

    pub fn value(&self, market_data: &MarketData) -> Option<f64> {
        match self {
            ChangeWindow::Day => market_data.price_change_percentage_24h,
            ChangeWindow::Week => market_data.price_change_percentage_7d,
            ChangeWindow::Month => market_data.price_change_percentage_30d,
            ChangeWindow::SixMonths => market_data.price_change_percentage_200d,
            ChangeWindow::Year => market_data.price_change_percentage_1y,
        }
    }
}

pub struct HistoricalClient {
    client: reqwest::Client,
    base_url: String,
    cache: Option<FileCache>,
}

impl HistoricalClient {
    pub fn new() -> Self {
        Self::with_base_url(HISTORICAL_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: None,
        }
    }

    /// Serve repeated lookups of the same address from `cache`
    pub fn set_cache(&mut self, cache: FileCache) {
        self.cache = Some(cache);
    }

    pub fn contract_url(&self, address: &str) -> String {
        format!(
            "{}/coins/ethereum/contract/{}",
            self.base_url,
            urlencoding::encode(address)
        )
    }

    /// Fetch historical market data for each address.
    ///
    /// The result has one entry per input address, in input order. Any single
    /// failure fails the whole call.
    pub async fn get_token_sets_historical(&self, ids: &[String]) -> Result<Vec<HistoricalEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        log_info!("Fetching historical data for {} token sets", ids.len());
        try_join_all(ids.iter().map(|id| self.get_contract(id))).await
    }

    async fn get_contract(&self, address: &str) -> Result<HistoricalEntry> {
        let cache_key = format!("historical_{}", address.to_ascii_lowercase());
        if let Some(cached) = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get::<HistoricalEntry>(&cache_key))
        {
            log_debug!("Historical cache hit for {}", address);
            return Ok(cached);
        }

        let url = self.contract_url(address);
        log_debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log_warn!(
                "Historical API error for {}: status={}, body={}",
                address,
                status,
                snippet(&body, 300)
            );
            return Err(TokenSetsError::Status {
                status: status.as_u16(),
                body: snippet(&body, 300),
            });
        }

        let entry: HistoricalEntry = serde_json::from_str(&body)?;

        if let Some(ref cache) = self.cache
            && let Err(_e) = cache.set(&cache_key, &entry)
        {
            log_warn!("Failed to cache historical data for {}: {}", address, _e);
        }

        Ok(entry)
    }
}

impl Default for HistoricalClient {
    fn default() -> Self {
        Self::new()
    }
}
