pub mod analytics;
pub mod export;
pub mod render;

pub use analytics::{Deal, PriceAnalytics};

use crate::models::{ListingType, ResultRecord, SearchParameters};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Sorted by price, with analytics
    Price,
    /// Sorted by auction end, soonest first
    Auction,
}

/// What to tell the user about the search as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(String),
    /// Nothing passed the filters; informational, not an error
    Empty(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Found(message) | Outcome::Empty(message) => message,
        }
    }
}

/// Sorted, summarized result of one search
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub params: SearchParameters,
    pub mode: ViewMode,
    pub records: Vec<ResultRecord>,
    pub analytics: Option<PriceAnalytics>,
    pub outcome: Outcome,
}

impl SearchReport {
    pub fn build(mut records: Vec<ResultRecord>, params: &SearchParameters) -> Self {
        let mode = if params.listing_type == ListingType::Auction {
            ViewMode::Auction
        } else {
            ViewMode::Price
        };

        let analytics = match mode {
            ViewMode::Price => {
                records.sort_by(|a, b| a.price.total_cmp(&b.price));
                PriceAnalytics::compute(&records)
            }
            ViewMode::Auction => {
                records.sort_by(by_auction_end);
                None
            }
        };

        let charity = if params.is_charity_only() {
            " from charity stores"
        } else {
            ""
        };
        let outcome = if records.is_empty() {
            Outcome::Empty(format!(
                "No listings found{charity} matching your criteria."
            ))
        } else {
            let kind = match mode {
                ViewMode::Price => "listings",
                ViewMode::Auction => "auction listings",
            };
            Outcome::Found(format!("Found {} {kind}{charity}", records.len()))
        };

        Self {
            params: params.clone(),
            mode,
            records,
            analytics,
            outcome,
        }
    }
}

/// Known end times ascending; "N/A" and "Invalid date" after them.
fn by_auction_end(a: &ResultRecord, b: &ResultRecord) -> Ordering {
    match (a.auction_end_time.instant(), b.auction_end_time.instant()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
