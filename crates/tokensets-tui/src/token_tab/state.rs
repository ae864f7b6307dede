//! State types for the token-set tabs

use {
    super::columns::{Column, SortState},
    crate::i18n::Locale,
    chrono::{DateTime, Local},
    ratatui::widgets::TableState,
    std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    },
    tokensets_api::{HistoricalEntry, TokenSet},
};

/// Captured log lines shown in the log panel
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

pub const MAX_LOG_LINES: usize = 1000;

/// Which list a tab shows, and where its rows link to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabKey {
    Portfolios,
    RebalancingSets,
}

impl TabKey {
    pub const ALL: [TabKey; 2] = [TabKey::Portfolios, TabKey::RebalancingSets];

    /// `"portfolios"` selects portfolios; any other key selects rebalancing sets
    pub fn from_key(key: &str) -> Self {
        if key == "portfolios" {
            TabKey::Portfolios
        } else {
            TabKey::RebalancingSets
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabKey::Portfolios => "portfolios",
            TabKey::RebalancingSets => "rebalancing_sets",
        }
    }

    /// Path segment used by tokensets.com for this kind of row
    pub fn url_segment(&self) -> &'static str {
        match self {
            TabKey::Portfolios => "portfolio",
            TabKey::RebalancingSets => "set",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            TabKey::Portfolios => "tokensets.portfolios",
            TabKey::RebalancingSets => "tokensets.rebalancingSets",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TabKey::Portfolios => 0,
            TabKey::RebalancingSets => 1,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TabKey::Portfolios => TabKey::RebalancingSets,
            TabKey::RebalancingSets => TabKey::Portfolios,
        }
    }

    pub fn prev(&self) -> Self {
        self.next() // Only 2 tabs, so prev == next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,    // Never fetched
    Loading, // Fetch cycle in flight
    Ready,   // Settled, rows possibly empty
}

/// One token-set tab: fetched rows plus view state
#[derive(Debug)]
pub struct TokenSetTabState {
    pub key: TabKey,
    pub load_state: LoadState,
    pub last_updated: Option<DateTime<Local>>,
    pub sort: SortState,
    pub table_state: TableState,
    /// First visible card in the narrow layout
    pub card_offset: usize,
    /// Set on activation, consumed by the next fetch cycle
    fetch_pending: bool,
    sets: Vec<TokenSet>,
    /// Entry `i` belongs to `sets[i]`, whatever identifiers it carries
    historical: Vec<HistoricalEntry>,
    generation: u64,
    /// Indices into `sets` in display order
    view: Vec<usize>,
}

impl TokenSetTabState {
    pub fn new(key: TabKey) -> Self {
        Self {
            key,
            load_state: LoadState::Idle,
            last_updated: None,
            sort: SortState::default(),
            table_state: TableState::default(),
            card_offset: 0,
            fetch_pending: false,
            sets: Vec::new(),
            historical: Vec::new(),
            generation: 0,
            view: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The tab became visible. Only an empty, idle tab asks for a fetch.
    pub fn activate(&mut self) {
        self.fetch_pending = self.sets.is_empty() && !self.is_loading();
    }

    /// A fetch cycle is due when the tab is shown, was activated while empty
    /// and none is running
    pub fn should_fetch(&self, active: bool) -> bool {
        active && self.fetch_pending && self.sets.is_empty() && !self.is_loading()
    }

    /// Enter `Loading` and return the generation the results must carry
    pub fn start_load(&mut self) -> u64 {
        self.fetch_pending = false;
        self.generation += 1;
        self.load_state = LoadState::Loading;
        self.generation
    }

    /// Replace rows and historical data wholesale. Returns false for stale results.
    pub fn apply_success(
        &mut self,
        generation: u64,
        sets: Vec<TokenSet>,
        historical: Vec<HistoricalEntry>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }

        let mut historical = historical;
        historical.truncate(sets.len());
        self.historical = historical;
        self.sets = sets;
        self.load_state = LoadState::Ready;
        self.last_updated = Some(Local::now());
        self.rebuild_view();
        self.table_state
            .select(if self.sets.is_empty() { None } else { Some(0) });
        *self.table_state.offset_mut() = 0;
        self.card_offset = 0;
        true
    }

    /// Any failure empties the tab. Returns false for stale results.
    pub fn apply_failure(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }

        self.clear_rows();
        self.load_state = LoadState::Ready;
        true
    }

    /// Drop the current rows so the next tick fetches again
    pub fn refresh(&mut self) {
        if self.is_loading() {
            return;
        }
        self.clear_rows();
        self.load_state = LoadState::Idle;
        self.fetch_pending = true;
    }

    fn clear_rows(&mut self) {
        self.sets.clear();
        self.historical.clear();
        self.view.clear();
        self.table_state.select(None);
        *self.table_state.offset_mut() = 0;
        self.card_offset = 0;
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Rows in API order
    pub fn sets(&self) -> &[TokenSet] {
        &self.sets
    }

    /// Historical entry of the row at `index` in API order
    pub fn historical_at(&self, index: usize) -> Option<&HistoricalEntry> {
        self.historical.get(index)
    }

    /// Rows in display order
    pub fn view_rows(&self) -> impl Iterator<Item = &TokenSet> {
        self.view.iter().filter_map(|&i| self.sets.get(i))
    }

    /// Rows in display order, each with its positionally matched entry
    pub fn view_entries(&self) -> impl Iterator<Item = (&TokenSet, Option<&HistoricalEntry>)> {
        self.view
            .iter()
            .filter_map(|&i| self.sets.get(i).map(|set| (set, self.historical.get(i))))
    }

    pub fn row_at(&self, view_index: usize) -> Option<&TokenSet> {
        self.view.get(view_index).and_then(|&i| self.sets.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn selected_set(&self) -> Option<&TokenSet> {
        self.selected_index().and_then(|i| self.row_at(i))
    }

    pub fn select(&mut self, view_index: usize) {
        if view_index < self.view.len() {
            self.table_state.select(Some(view_index));
        }
    }

    pub fn select_next(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1).min(self.view.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let prev = self.selected_index().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    pub fn select_first(&mut self) {
        if !self.view.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.view.is_empty() {
            self.table_state.select(Some(self.view.len() - 1));
        }
    }

    /// Advance the sort column, keeping the selected row selected
    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next_column();
        self.resort();
    }

    pub fn toggle_sort_direction(&mut self) {
        if self.sort.column.is_some() {
            self.sort.descending = !self.sort.descending;
            self.resort();
        }
    }

    pub fn sort_column(&self) -> Option<Column> {
        self.sort.column
    }

    fn resort(&mut self) {
        let selected = self
            .selected_index()
            .and_then(|i| self.view.get(i).copied());
        self.rebuild_view();
        let pos = selected.and_then(|source| self.view.iter().position(|&i| i == source));
        if let Some(pos) = pos {
            self.table_state.select(Some(pos));
        }
    }

    fn rebuild_view(&mut self) {
        self.view = self.sort.order(&self.sets, &self.historical);
    }
}

/// Top-level application state shared between the UI loop and fetch tasks
#[derive(Debug)]
pub struct AppState {
    pub tabs: [TokenSetTabState; 2],
    pub active_tab: TabKey,
    pub locale: Locale,
    /// Terminal width at which the full table is used
    pub breakpoint: u16,
    pub show_logs: bool,
    pub should_quit: bool,
    /// Advances once per UI tick, drives the spinner
    pub tick: usize,
    pub logs: LogBuffer,
}

impl AppState {
    pub fn new(active_tab: TabKey, locale: Locale, breakpoint: u16, logs: LogBuffer) -> Self {
        let mut tabs = TabKey::ALL.map(TokenSetTabState::new);
        tabs[active_tab.index()].activate();
        Self {
            tabs,
            active_tab,
            locale,
            breakpoint,
            show_logs: false,
            should_quit: false,
            tick: 0,
            logs,
        }
    }

    pub fn tab(&self, key: TabKey) -> &TokenSetTabState {
        &self.tabs[key.index()]
    }

    pub fn tab_mut(&mut self, key: TabKey) -> &mut TokenSetTabState {
        &mut self.tabs[key.index()]
    }

    pub fn active(&self) -> &TokenSetTabState {
        self.tab(self.active_tab)
    }

    pub fn active_mut(&mut self) -> &mut TokenSetTabState {
        self.tab_mut(self.active_tab)
    }

    /// Show `key`, activating it if it was not already shown
    pub fn switch_tab(&mut self, key: TabKey) {
        if key != self.active_tab {
            self.active_tab = key;
            self.tab_mut(key).activate();
        }
    }

    /// Snapshot of the newest `count` log lines, oldest first
    pub fn recent_logs(&self, count: usize) -> Vec<String> {
        match self.logs.lock() {
            Ok(logs) => logs.iter().rev().take(count).rev().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}
