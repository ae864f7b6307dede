use {
    crate::{
        error::{Result, TokenSetsError, snippet},
        logging::{log_debug, log_info, log_warn},
    },
    serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned},
};

pub const TOKENSETS_API_BASE: &str = "https://api.tokensets.com/v2";

// The TokenSets API reports some amounts as numbers and others as decimal strings
pub(crate) fn deserialize_flexible_f64<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed.parse::<f64>().map(Some).map_err(Error::custom)
            }
        },
        Some(other) => Err(Error::custom(format!(
            "expected a number or numeric string, got {}",
            other
        ))),
    }
}

// A missing or null name still yields a row; it just shows up blank
fn deserialize_null_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One token set or portfolio as listed by the TokenSets API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    pub id: String,
    pub address: String,
    #[serde(deserialize_with = "deserialize_null_string", default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    /// Logo URL
    #[serde(default)]
    pub image: Option<String>,
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub market_cap: Option<f64>,
    #[serde(deserialize_with = "deserialize_flexible_f64", default)]
    pub price_usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct PortfoliosResponse {
    #[serde(default)]
    pub portfolios: Vec<TokenSet>,
}

#[derive(Debug, Deserialize)]
pub struct RebalancingSetsResponse {
    #[serde(default)]
    pub rebalancing_sets: Vec<TokenSet>,
}

pub struct TokenSetsClient {
    client: reqwest::Client,
    base_url: String,
}

impl TokenSetsClient {
    pub fn new() -> Self {
        Self::with_base_url(TOKENSETS_API_BASE)
    }

    /// Point the client at another deployment (trailing slashes are ignored)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn portfolios_url(&self) -> String {
        format!("{}/portfolios", self.base_url)
    }

    pub fn rebalancing_sets_url(&self) -> String {
        format!("{}/rebalancing_sets", self.base_url)
    }

    /// Fetch user-curated portfolios
    pub async fn fetch_portfolios(&self) -> Result<Vec<TokenSet>> {
        let response: PortfoliosResponse = self.get_json(&self.portfolios_url()).await?;
        log_info!("Fetched {} portfolios", response.portfolios.len());
        Ok(response.portfolios)
    }

    /// Fetch every rebalancing set
    pub async fn fetch_all_sets(&self) -> Result<Vec<TokenSet>> {
        let response: RebalancingSetsResponse =
            self.get_json(&self.rebalancing_sets_url()).await?;
        log_info!("Fetched {} rebalancing sets", response.rebalancing_sets.len());
        Ok(response.rebalancing_sets)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log_info!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        log_debug!("GET {} -> status: {}", url, status);

        let body = response.text().await?;
        if !status.is_success() {
            log_warn!("TokenSets API error: status={}, body={}", status, snippet(&body, 500));
            return Err(TokenSetsError::Status {
                status: status.as_u16(),
                body: snippet(&body, 500),
            });
        }

        serde_json::from_str(&body).map_err(TokenSetsError::Serialization)
    }
}

impl Default for TokenSetsClient {
    fn default() -> Self {
        Self::new()
    }
}
