use crate::ebay::types::ItemSummary;
use crate::error::SearchResult;
use crate::search::BuiltQuery;
use async_trait::async_trait;

/// Anything that can answer a built query with raw listings.
/// The live Browse API and saved response fixtures both implement this.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one bounded page of listings for the query
    async fn search(&self, query: &BuiltQuery) -> SearchResult<Vec<ItemSummary>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
