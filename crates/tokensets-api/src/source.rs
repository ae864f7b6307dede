//! The data-source seam consumed by the token-set tab

use {
    crate::{
        error::Result,
        historical::{HistoricalClient, HistoricalEntry},
        tokensets::{TokenSet, TokenSetsClient},
    },
    async_trait::async_trait,
};

/// Everything the token-set tab needs from the network
#[async_trait]
pub trait TokenSetsSource: Send + Sync {
    async fn fetch_portfolios(&self) -> Result<Vec<TokenSet>>;

    async fn fetch_all_sets(&self) -> Result<Vec<TokenSet>>;

    /// One entry per id, in the order the ids were given
    async fn get_token_sets_historical(&self, ids: &[String]) -> Result<Vec<HistoricalEntry>>;
}

/// Live implementation backed by the TokenSets and historical market-data APIs
pub struct TokenSetsApi {
    sets: TokenSetsClient,
    historical: HistoricalClient,
}

impl TokenSetsApi {
    pub fn new(sets: TokenSetsClient, historical: HistoricalClient) -> Self {
        Self { sets, historical }
    }
}

impl Default for TokenSetsApi {
    fn default() -> Self {
        Self::new(TokenSetsClient::new(), HistoricalClient::new())
    }
}

#[async_trait]
impl TokenSetsSource for TokenSetsApi {
    async fn fetch_portfolios(&self) -> Result<Vec<TokenSet>> {
        self.sets.fetch_portfolios().await
    }

    async fn fetch_all_sets(&self) -> Result<Vec<TokenSet>> {
        self.sets.fetch_all_sets().await
    }

    async fn get_token_sets_historical(&self, ids: &[String]) -> Result<Vec<HistoricalEntry>> {
        self.historical.get_token_sets_historical(ids).await
    }
}
