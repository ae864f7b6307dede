//! Fetch orchestration: primary list, then historical data for its addresses

use {
    super::{
        logging::{log_error, log_info},
        state::{AppState, TabKey},
    },
    std::sync::Arc,
    tokio::{sync::Mutex as TokioMutex, task::JoinHandle},
    tokensets_api::{HistoricalEntry, TokenSet, TokenSetsSource},
};

/// Result of one successful fetch cycle
#[derive(Debug, Clone, PartialEq)]
pub struct TabData {
    pub sets: Vec<TokenSet>,
    /// Positionally matched to `sets`
    pub historical: Vec<HistoricalEntry>,
}

/// Run one fetch cycle for `key`: the primary list, then historical data for
/// exactly its addresses in row order.
pub async fn load_tab(source: &dyn TokenSetsSource, key: TabKey) -> tokensets_api::Result<TabData> {
    let sets = match key {
        TabKey::Portfolios => source.fetch_portfolios().await?,
        TabKey::RebalancingSets => source.fetch_all_sets().await?,
    };

    let ids: Vec<String> = sets.iter().map(|set| set.address.clone()).collect();
    let historical = source.get_token_sets_historical(&ids).await?;

    Ok(TabData { sets, historical })
}

/// Start a cycle for the active tab if it is due. Returns the tab and generation to fetch.
pub fn begin_fetch_if_due(app: &mut AppState) -> Option<(TabKey, u64)> {
    let key = app.active_tab;
    let tab = app.tab_mut(key);
    if !tab.should_fetch(true) {
        return None;
    }
    Some((key, tab.start_load()))
}

/// Fetch and apply the outcome to the tab's state. Failures empty the tab.
pub async fn run_fetch_cycle(
    app_state: Arc<TokioMutex<AppState>>,
    source: Arc<dyn TokenSetsSource>,
    key: TabKey,
    generation: u64,
) {
    log_info!("Fetching {} (cycle {})", key.as_str(), generation);

    let outcome = load_tab(source.as_ref(), key).await;

    let mut app = app_state.lock().await;
    let tab = app.tab_mut(key);
    let applied = match outcome {
        Ok(data) => {
            log_info!(
                "Loaded {} {} with {} historical entries",
                data.sets.len(),
                key.as_str(),
                data.historical.len()
            );
            tab.apply_success(generation, data.sets, data.historical)
        },
        Err(_e) => {
            log_error!("Failed to fetch {}: {}", key.as_str(), _e);
            tab.apply_failure(generation)
        },
    };

    if !applied {
        log_info!("Discarded stale {} results (cycle {})", key.as_str(), generation);
    }
}

pub fn spawn_tab_fetch(
    app_state: Arc<TokioMutex<AppState>>,
    source: Arc<dyn TokenSetsSource>,
    key: TabKey,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(run_fetch_cycle(app_state, source, key, generation))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{i18n::Locale, token_tab::state::LoadState},
        async_trait::async_trait,
        std::{
            collections::VecDeque,
            sync::Mutex,
        },
        tokensets_api::{ChangeWindow, MarketData, TokenSetsError},
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Portfolios,
        AllSets,
        Historical(Vec<String>),
    }

    #[derive(Default)]
    struct RecordingSource {
        calls: Mutex<Vec<Call>>,
        rows: Vec<TokenSet>,
        historical: Vec<HistoricalEntry>,
        fail_primary: bool,
        fail_historical: bool,
    }

    impl RecordingSource {
        fn with_rows(rows: Vec<TokenSet>, historical: Vec<HistoricalEntry>) -> Self {
            Self {
                rows,
                historical,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().expect("calls lock").clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().expect("calls lock").push(call);
        }

        fn primary(&self) -> tokensets_api::Result<Vec<TokenSet>> {
            if self.fail_primary {
                Err(TokenSetsError::InvalidData("primary down".to_string()))
            } else {
                Ok(self.rows.clone())
            }
        }
    }

    #[async_trait]
    impl TokenSetsSource for RecordingSource {
        async fn fetch_portfolios(&self) -> tokensets_api::Result<Vec<TokenSet>> {
            self.record(Call::Portfolios);
            self.primary()
        }

        async fn fetch_all_sets(&self) -> tokensets_api::Result<Vec<TokenSet>> {
            self.record(Call::AllSets);
            self.primary()
        }

        async fn get_token_sets_historical(
            &self,
            ids: &[String],
        ) -> tokensets_api::Result<Vec<HistoricalEntry>> {
            self.record(Call::Historical(ids.to_vec()));
            if self.fail_historical {
                Err(TokenSetsError::Status {
                    status: 429,
                    body: "rate limited".to_string(),
                })
            } else {
                Ok(self.historical.clone())
            }
        }
    }

    fn row(id: &str, address: &str) -> TokenSet {
        TokenSet {
            id: id.to_string(),
            address: address.to_string(),
            name: id.to_string(),
            symbol: None,
            image: None,
            market_cap: Some(1_000_000.0),
            price_usd: Some(100.0),
        }
    }

    fn day_change(value: f64, contract: &str) -> HistoricalEntry {
        HistoricalEntry {
            contract_address: Some(contract.to_string()),
            market_data: Some(MarketData {
                price_change_percentage_24h: Some(value),
                ..MarketData::default()
            }),
            ..HistoricalEntry::default()
        }
    }

    fn app(active: TabKey) -> Arc<TokioMutex<AppState>> {
        let logs = Arc::new(Mutex::new(VecDeque::new()));
        Arc::new(TokioMutex::new(AppState::new(active, Locale::En, 120, logs)))
    }

    async fn activate(app_state: &Arc<TokioMutex<AppState>>, source: Arc<RecordingSource>) {
        let due = {
            let mut app = app_state.lock().await;
            begin_fetch_if_due(&mut app)
        };
        if let Some((key, generation)) = due {
            run_fetch_cycle(Arc::clone(app_state), source, key, generation).await;
        }
    }

    #[tokio::test]
    async fn portfolios_key_uses_portfolio_endpoint() {
        let source = RecordingSource::with_rows(vec![row("p", "0x1")], vec![]);
        load_tab(&source, TabKey::from_key("portfolios"))
            .await
            .expect("Should load");
        assert_eq!(source.calls(), vec![
            Call::Portfolios,
            Call::Historical(vec!["0x1".to_string()])
        ]);
    }

    #[tokio::test]
    async fn other_keys_use_rebalancing_set_endpoint() {
        let source = RecordingSource::with_rows(vec![row("s", "0x9")], vec![]);
        load_tab(&source, TabKey::from_key("sets"))
            .await
            .expect("Should load");
        assert_eq!(source.calls()[0], Call::AllSets);
    }

    #[tokio::test]
    async fn historical_ids_follow_row_order() {
        let source = RecordingSource::with_rows(vec![row("a", "0x1"), row("b", "0x2")], vec![]);
        load_tab(&source, TabKey::Portfolios).await.expect("Should load");
        assert_eq!(
            source.calls()[1],
            Call::Historical(vec!["0x1".to_string(), "0x2".to_string()])
        );
    }

    #[tokio::test]
    async fn primary_failure_skips_historical() {
        let source = RecordingSource {
            fail_primary: true,
            ..RecordingSource::default()
        };
        assert!(load_tab(&source, TabKey::Portfolios).await.is_err());
        assert_eq!(source.calls(), vec![Call::Portfolios]);
    }

    #[tokio::test]
    async fn one_cycle_per_activation_while_rows_exist() {
        let source = Arc::new(RecordingSource::with_rows(vec![row("a", "0x1")], vec![
            day_change(1.0, "0x1"),
        ]));
        let app_state = app(TabKey::Portfolios);

        activate(&app_state, Arc::clone(&source)).await;
        activate(&app_state, Arc::clone(&source)).await;
        {
            let mut app = app_state.lock().await;
            app.switch_tab(TabKey::RebalancingSets);
            app.switch_tab(TabKey::Portfolios);
        }
        activate(&app_state, Arc::clone(&source)).await;

        assert_eq!(source.calls().len(), 2, "one primary + one historical call");
        let app = app_state.lock().await;
        assert_eq!(app.active().len(), 1);
        assert_eq!(app.active().load_state, LoadState::Ready);
    }

    #[tokio::test]
    async fn historical_is_matched_by_position() {
        // Entry identifiers deliberately point at the other row
        let source = Arc::new(RecordingSource::with_rows(
            vec![row("a", "0x1"), row("b", "0x2")],
            vec![day_change(2.5, "0x2"), day_change(-4.0, "0x1")],
        ));
        let app_state = app(TabKey::RebalancingSets);

        activate(&app_state, source).await;

        let app = app_state.lock().await;
        let tab = app.active();
        assert_eq!(tab.sets()[0].id, "a");
        assert_eq!(
            tab.historical_at(0).and_then(|h| h.change(ChangeWindow::Day)),
            Some(2.5)
        );
        assert_eq!(
            tab.historical_at(1).and_then(|h| h.change(ChangeWindow::Day)),
            Some(-4.0)
        );
    }

    #[tokio::test]
    async fn historical_failure_discards_primary_rows() {
        let source = Arc::new(RecordingSource {
            rows: vec![row("a", "0x1")],
            fail_historical: true,
            ..RecordingSource::default()
        });
        let app_state = app(TabKey::Portfolios);

        activate(&app_state, Arc::clone(&source)).await;

        let app = app_state.lock().await;
        assert!(app.active().is_empty());
        assert!(!app.active().is_loading());
        assert_eq!(app.active().load_state, LoadState::Ready);
    }

    #[tokio::test]
    async fn failed_tab_waits_for_next_activation() {
        let source = Arc::new(RecordingSource {
            fail_primary: true,
            ..RecordingSource::default()
        });
        let app_state = app(TabKey::Portfolios);

        activate(&app_state, Arc::clone(&source)).await;
        activate(&app_state, Arc::clone(&source)).await;
        assert_eq!(source.calls().len(), 1, "no retry loop on an empty tab");

        {
            let mut app = app_state.lock().await;
            app.switch_tab(TabKey::RebalancingSets);
            app.switch_tab(TabKey::Portfolios);
        }
        activate(&app_state, Arc::clone(&source)).await;
        assert_eq!(source.calls(), vec![Call::Portfolios, Call::Portfolios]);
    }

    #[tokio::test]
    async fn loading_flag_spans_the_whole_cycle() {
        let source = Arc::new(RecordingSource::with_rows(vec![row("a", "0x1")], vec![]));
        let app_state = app(TabKey::Portfolios);

        let (key, generation) = {
            let mut app = app_state.lock().await;
            begin_fetch_if_due(&mut app).expect("Fetch should be due")
        };
        assert!(app_state.lock().await.active().is_loading());

        spawn_tab_fetch(Arc::clone(&app_state), source, key, generation)
            .await
            .expect("Task should finish");
        assert!(!app_state.lock().await.active().is_loading());
    }

    #[tokio::test]
    async fn inactive_tab_is_not_fetched() {
        let source = Arc::new(RecordingSource::with_rows(vec![row("a", "0x1")], vec![]));
        let app_state = app(TabKey::Portfolios);

        activate(&app_state, Arc::clone(&source)).await;

        assert_eq!(source.calls()[0], Call::Portfolios);
        let app = app_state.lock().await;
        assert_eq!(app.tab(TabKey::RebalancingSets).load_state, LoadState::Idle);
    }
}
