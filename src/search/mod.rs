pub mod charity;
pub mod classifier;
pub mod numeric;
pub mod pipeline;
pub mod query;

pub use pipeline::ResultFilterPipeline;
pub use query::{BuiltQuery, QueryBuilder};

use crate::config::AppConfig;
use crate::ebay::ListingSource;
use crate::error::SearchResult;
use crate::models::SearchParameters;
use crate::report::SearchReport;
use tracing::info;

/// Build → fetch → filter → summarize, one search at a time
pub struct SearchService {
    source: Box<dyn ListingSource>,
    builder: QueryBuilder,
    pipeline: ResultFilterPipeline,
}

impl SearchService {
    pub fn new(source: Box<dyn ListingSource>, config: &AppConfig) -> Self {
        Self {
            source,
            builder: QueryBuilder::new(config.currency.clone()),
            pipeline: ResultFilterPipeline::new(config.zone),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    pub async fn run(&self, params: &SearchParameters) -> SearchResult<SearchReport> {
        params.validate()?;

        let query = self.builder.build(params);
        info!("Searching {} for {}", self.source.source_name(), params.label());

        let items = self.source.search(&query).await?;
        let records = self.pipeline.run(&items, params);
        info!("{} of {} listing(s) passed filters", records.len(), items.len());

        Ok(SearchReport::build(records, params))
    }
}
