pub mod cache;
pub mod error;
pub mod historical;
mod logging;
pub mod source;
pub mod tokensets;

pub use {
    cache::{FileCache, default_cache_dir},
    error::{Result, TokenSetsError},
    historical::{ChangeWindow, HistoricalClient, HistoricalEntry, MarketData},
    source::{TokenSetsApi, TokenSetsSource},
    tokensets::{TokenSet, TokenSetsClient},
};
