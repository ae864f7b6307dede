//! Token-set tabs: portfolios and rebalancing sets with historical price changes

pub mod columns;
mod event_loop;
pub mod fetch;
mod keys;
pub mod layout;
pub(crate) mod logging;
pub mod navigation;
mod render;
pub mod state;

pub use {
    event_loop::run_token_sets_tui,
    state::{AppState, LogBuffer, MAX_LOG_LINES, TabKey},
};
