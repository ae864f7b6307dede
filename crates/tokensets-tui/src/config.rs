//! Configuration module
//!
//! Settings are read from ~/.config/tokensets-tui/config.json. Every field is
//! optional; command-line flags override whatever the file says.

use {
    crate::{i18n::Locale, token_tab::TabKey},
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
    tokensets_api::{cache::DEFAULT_TTL_SECONDS, historical, tokensets},
};

/// Terminal width (columns) at which the full table replaces the card layout
pub const DEFAULT_BREAKPOINT: u16 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tokensets_api_base: String,
    pub historical_api_base: String,
    pub locale: Locale,
    pub breakpoint: u16,
    /// 0 disables the historical cache
    pub cache_ttl_seconds: u64,
    pub show_logs: bool,
    pub default_tab: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tokensets_api_base: tokensets::TOKENSETS_API_BASE.to_string(),
            historical_api_base: historical::HISTORICAL_API_BASE.to_string(),
            locale: Locale::En,
            breakpoint: DEFAULT_BREAKPOINT,
            cache_ttl_seconds: DEFAULT_TTL_SECONDS,
            show_logs: false,
            default_tab: TabKey::Portfolios.as_str().to_string(),
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tokensets-tui")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn default_tab_key(&self) -> TabKey {
        TabKey::from_key(&self.default_tab)
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub tab: Option<String>,
    pub locale: Option<Locale>,
    pub breakpoint: Option<u16>,
    pub tokensets_api: Option<String>,
    pub historical_api: Option<String>,
    pub no_cache: bool,
    pub show_logs: bool,
}

impl AppConfig {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(tab) = overrides.tab {
            self.default_tab = tab;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(breakpoint) = overrides.breakpoint {
            self.breakpoint = breakpoint;
        }
        if let Some(base) = overrides.tokensets_api {
            self.tokensets_api_base = base;
        }
        if let Some(base) = overrides.historical_api {
            self.historical_api_base = base;
        }
        if overrides.no_cache {
            self.cache_ttl_seconds = 0;
        }
        self.show_logs |= overrides.show_logs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tokensets-tui-no-such-config.json");
        let config = AppConfig::load_from(&path).expect("Missing file is not an error");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_tab_key(), TabKey::Portfolios);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"locale": "fr", "breakpoint": 90}"#).expect("Should parse");
        assert_eq!(config.locale, Locale::Fr);
        assert_eq!(config.breakpoint, 90);
        assert_eq!(config.tokensets_api_base, tokensets::TOKENSETS_API_BASE);
        assert_eq!(config.cache_ttl_seconds, DEFAULT_TTL_SECONDS);
    }

    #[test]
    fn overrides_win() {
        let config = AppConfig::default().apply(Overrides {
            tab: Some("rebalancing_sets".to_string()),
            breakpoint: Some(80),
            tokensets_api: Some("http://localhost:1/v2".to_string()),
            no_cache: true,
            ..Overrides::default()
        });
        assert_eq!(config.default_tab_key(), TabKey::RebalancingSets);
        assert_eq!(config.breakpoint, 80);
        assert_eq!(config.tokensets_api_base, "http://localhost:1/v2");
        assert_eq!(config.cache_ttl_seconds, 0);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "tokensets-tui-bad-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ nope").expect("Should write");
        assert!(AppConfig::load_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
