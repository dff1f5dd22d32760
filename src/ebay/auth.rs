use crate::config::AppConfig;
use crate::ebay::types::TokenResponse;
use crate::error::{SearchError, SearchResult};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Memoized access token with a fixed time-to-live.
///
/// A token the endpoint says expires sooner than the TTL is kept only for
/// the shorter window.
#[derive(Debug, Clone)]
pub struct TokenCache {
    ttl: Duration,
    entry: Option<CachedToken>,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Cached token, if one is still valid at `now`.
    pub fn get(&self, now: Instant) -> Option<&str> {
        self.entry
            .as_ref()
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.value.as_str())
    }

    pub fn store(&mut self, value: String, now: Instant, expires_in: Option<Duration>) -> &str {
        let lifetime = expires_in.map_or(self.ttl, |e| e.min(self.ttl));
        let entry = self.entry.insert(CachedToken {
            value,
            expires_at: now + lifetime,
        });
        entry.value.as_str()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// OAuth2 client-credentials flow against the identity endpoint
pub struct Authenticator {
    http: Client,
    token_url: String,
    scope: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    cache: Mutex<TokenCache>,
}

impl Authenticator {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            scope: config.oauth_scope.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cache: Mutex::new(TokenCache::new(config.token_ttl)),
        }
    }

    /// Bearer token for the next request, fetching a fresh one when the cached
    /// token has expired.
    pub async fn access_token(&self) -> SearchResult<String> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.get(Instant::now()) {
            debug!("Reusing cached access token");
            return Ok(token.to_string());
        }

        let (token, expires_in) = self.fetch_token().await?;
        Ok(cache.store(token, Instant::now(), expires_in).to_string())
    }

    /// Drop the cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
    }

    async fn fetch_token(&self) -> SearchResult<(String, Option<Duration>)> {
        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(SearchError::AuthFailure(
                "missing access token: EBAY_CLIENT_ID and EBAY_CLIENT_SECRET must be set"
                    .to_string(),
            ));
        };

        info!("Requesting access token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Token endpoint returned status: {}", status);
            return Err(SearchError::AuthFailure(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let raw = response.text().await?;
        let body: TokenResponse = serde_json::from_str(&raw).unwrap_or_default();
        match body.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok((token, body.expires_in.map(Duration::from_secs))),
            None => {
                warn!("Token endpoint response carried no access_token");
                Err(SearchError::AuthFailure(
                    "token endpoint returned no access token".to_string(),
                ))
            }
        }
    }
}
