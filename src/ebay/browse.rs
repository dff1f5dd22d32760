use crate::config::AppConfig;
use crate::ebay::auth::Authenticator;
use crate::ebay::traits::ListingSource;
use crate::ebay::types::{ItemSummary, SearchResponse};
use crate::error::{SearchError, SearchResult};
use crate::search::BuiltQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Live client for the Browse `item_summary/search` endpoint
pub struct BrowseClient {
    client: Client,
    search_url: String,
    auth: Authenticator,
}

impl BrowseClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, config))
    }

    /// Use an already configured HTTP client for both token and search calls.
    pub fn with_client(client: Client, config: &AppConfig) -> Self {
        let auth = Authenticator::new(client.clone(), config);

        Self {
            client,
            search_url: config.search_url.clone(),
            auth,
        }
    }
}

#[async_trait]
impl ListingSource for BrowseClient {
    async fn search(&self, query: &BuiltQuery) -> SearchResult<Vec<ItemSummary>> {
        let token = self.auth.access_token().await?;
        let params = query.to_query_pairs();

        debug!("Query: {}", query.query);
        debug!("Filters: {:?}", query.filters);
        debug!("Params: {:?}", params);

        let response = self
            .client
            .get(&self.search_url)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Browse API returned status: {}", status);
            if status == StatusCode::UNAUTHORIZED {
                self.auth.invalidate().await;
            }
            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json().await?;
        info!(
            "Browse API returned {} item(s) (total matches: {})",
            body.item_summaries.len(),
            body.total.map_or_else(|| "unknown".to_string(), |t| t.to_string())
        );

        Ok(body.item_summaries)
    }

    fn source_name(&self) -> &'static str {
        "eBay Browse API"
    }
}
