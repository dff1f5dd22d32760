use chrono_tz::Tz;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_TOKEN_URL: &str = "https://api.ebay.com/identity/v1/oauth2/token";
pub const DEFAULT_SEARCH_URL: &str = "https://api.ebay.com/buy/browse/v1/item_summary/search";
pub const DEFAULT_OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";
pub const DEFAULT_ZONE: Tz = chrono_tz::US::Central;

/// Runtime settings, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub search_url: String,
    pub oauth_scope: String,
    /// Currency for the price filter clause
    pub currency: String,
    /// Zone auction end times are shown in
    pub zone: Tz,
    pub token_ttl: Duration,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            oauth_scope: DEFAULT_OAUTH_SCOPE.to_string(),
            currency: "USD".to_string(),
            zone: DEFAULT_ZONE,
            token_ttl: Duration::from_secs(3600),
            http_timeout: Duration::from_secs(30),
            user_agent: concat!("listing-scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secs = |key: &str, fallback: Duration| {
            non_empty(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        let zone = match non_empty("SCOUT_TIMEZONE") {
            Some(name) => name.trim().parse::<Tz>().unwrap_or_else(|_| {
                warn!("Unknown SCOUT_TIMEZONE '{}', using {}", name, DEFAULT_ZONE);
                DEFAULT_ZONE
            }),
            None => DEFAULT_ZONE,
        };

        Self {
            client_id: non_empty("EBAY_CLIENT_ID"),
            client_secret: non_empty("EBAY_CLIENT_SECRET"),
            token_url: non_empty("EBAY_TOKEN_URL").unwrap_or(defaults.token_url),
            search_url: non_empty("EBAY_SEARCH_URL").unwrap_or(defaults.search_url),
            oauth_scope: non_empty("EBAY_OAUTH_SCOPE").unwrap_or(defaults.oauth_scope),
            currency: non_empty("SCOUT_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.currency),
            zone,
            token_ttl: secs("SCOUT_TOKEN_TTL_SECS", defaults.token_ttl),
            http_timeout: secs("SCOUT_HTTP_TIMEOUT_SECS", defaults.http_timeout),
            user_agent: non_empty("SCOUT_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}
