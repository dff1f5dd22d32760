use crate::ebay::traits::ListingSource;
use crate::ebay::types::{ItemSummary, SearchResponse};
use crate::error::{SearchError, SearchResult};
use crate::search::BuiltQuery;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Replays a saved search response from disk.
///
/// Only the result limit of the query is honoured; everything else was
/// decided when the response was captured.
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for FixtureSource {
    async fn search(&self, query: &BuiltQuery) -> SearchResult<Vec<ItemSummary>> {
        info!("Loading saved search response from {}", self.path.display());
        debug!("Query (not sent): {}", query.query);

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))
            .map_err(SearchError::Fixture)?;
        let response: SearchResponse = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))
            .map_err(SearchError::Fixture)?;

        let mut items = response.item_summaries;
        items.truncate(query.limit as usize);
        Ok(items)
    }

    fn source_name(&self) -> &'static str {
        "saved response"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{AuctionEnd, SearchParameters, SellerTier, SellerType};
    use crate::search::{QueryBuilder, SearchService};

    fn query_with_limit(limit: u32) -> BuiltQuery {
        let mut params = SearchParameters::new("walkman");
        params.limit = limit;
        QueryBuilder::new("USD").build(&params)
    }

    #[tokio::test]
    async fn loads_items_and_applies_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("response.json");
        std::fs::write(
            &path,
            r#"{"itemSummaries":[{"title":"a"},{"title":"b"},{"title":"c"}]}"#,
        )
        .expect("write fixture");

        let items = FixtureSource::new(&path)
            .search(&query_with_limit(2))
            .await
            .expect("fixture loads");
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    fn sample_service() -> SearchService {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/sample_search.json");
        SearchService::new(Box::new(FixtureSource::new(path)), &AppConfig::default())
    }

    #[tokio::test]
    async fn sample_response_through_the_whole_pipeline() {
        let report = sample_service()
            .run(&SearchParameters::new("walkman"))
            .await
            .expect("sample search runs");

        let prices: Vec<f64> = report.records.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![12.0, 44.99, 61.5, 89.0]);
        assert_eq!(report.records[0].auction_end_time, AuctionEnd::Invalid);
        assert_eq!(report.records[0].bid_count, Some(2));
        assert_eq!(report.records[3].seller_rating, SellerTier::VeryGood);
        assert_eq!(report.outcome.message(), "Found 4 listings");
    }

    #[tokio::test]
    async fn sample_response_with_charity_and_rating_filters() {
        let service = sample_service();

        let mut params = SearchParameters::new("walkman");
        params.seller_type = SellerType::Charity;
        let charity = service.run(&params).await.unwrap();
        let sellers: Vec<_> = charity.records.iter().map(|r| r.seller.as_str()).collect();
        assert_eq!(
            sellers,
            vec!["salvationarmy_thrift_tx", "GoodwillSoCal", "mycharitystore123"]
        );

        params.seller_ratings = [SellerTier::Elite].into_iter().collect();
        let elite = service.run(&params).await.unwrap();
        assert_eq!(elite.records.len(), 1);
        assert_eq!(elite.records[0].seller, "GoodwillSoCal");
    }

    #[tokio::test]
    async fn missing_file_is_a_fixture_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FixtureSource::new(dir.path().join("nope.json"))
            .search(&query_with_limit(10))
            .await
            .expect_err("file does not exist");
        assert!(matches!(err, SearchError::Fixture(_)));
    }
}
