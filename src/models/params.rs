use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::{Category, SellerTier};
use crate::error::{SearchError, SearchResult};

pub const MAX_PRICE_RANGE: RangeInclusive<u32> = 1..=10_000;
pub const LIMIT_RANGE: RangeInclusive<u32> = 1..=100;

/// Lowercases and drops separators so "Fixed Price", "fixed-price" and
/// "FIXED_PRICE" all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Listing mechanism the user wants to restrict to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ListingType {
    #[default]
    All,
    Auction,
    FixedPrice,
    BestOffer,
}

impl ListingType {
    pub fn label(self) -> &'static str {
        match self {
            ListingType::All => "All",
            ListingType::Auction => "Auction",
            ListingType::FixedPrice => "Fixed Price",
            ListingType::BestOffer => "Best Offer",
        }
    }

    /// Buying option value the API filters on; `None` for `All`.
    pub fn buying_option(self) -> Option<&'static str> {
        match self {
            ListingType::All => None,
            ListingType::Auction => Some("AUCTION"),
            ListingType::FixedPrice => Some("FIXED_PRICE"),
            ListingType::BestOffer => Some("BEST_OFFER"),
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ListingType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" => Ok(ListingType::All),
            "auction" => Ok(ListingType::Auction),
            "fixedprice" => Ok(ListingType::FixedPrice),
            "bestoffer" => Ok(ListingType::BestOffer),
            _ => Err(SearchError::InvalidParameters(format!(
                "unknown listing type '{}'",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SellerType {
    #[default]
    All,
    Charity,
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SellerType::All => "All",
            SellerType::Charity => "Charity",
        })
    }
}

impl FromStr for SellerType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" => Ok(SellerType::All),
            "charity" => Ok(SellerType::Charity),
            _ => Err(SearchError::InvalidParameters(format!(
                "unknown seller type '{}'",
                s.trim()
            ))),
        }
    }
}

/// Everything one search needs from the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Free-text term, quoted verbatim into the query
    pub search_term: String,
    pub category: Category,
    pub listing_type: ListingType,
    pub seller_type: SellerType,
    /// Accepted seller tiers; empty means any tier
    pub seller_ratings: BTreeSet<SellerTier>,
    /// Ceiling on price plus first shipping option, whole currency units
    pub max_price: u32,
    /// Page size requested from the API
    pub limit: u32,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: Category::AllCategories,
            listing_type: ListingType::All,
            seller_type: SellerType::All,
            seller_ratings: BTreeSet::new(),
            max_price: 150,
            limit: 25,
        }
    }
}

impl SearchParameters {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SearchResult<()> {
        if !MAX_PRICE_RANGE.contains(&self.max_price) {
            return Err(SearchError::InvalidParameters(format!(
                "max price {} outside {}..={}",
                self.max_price,
                MAX_PRICE_RANGE.start(),
                MAX_PRICE_RANGE.end()
            )));
        }
        if !LIMIT_RANGE.contains(&self.limit) {
            return Err(SearchError::InvalidParameters(format!(
                "limit {} outside {}..={}",
                self.limit,
                LIMIT_RANGE.start(),
                LIMIT_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Human-readable key used to deduplicate saved searches.
    pub fn label(&self) -> String {
        format!(
            "{} in {} (${})",
            self.search_term, self.category, self.max_price
        )
    }

    pub fn is_charity_only(&self) -> bool {
        self.seller_type == SellerType::Charity
    }
}
