mod category;
mod params;

pub use category::{AspectRule, Category, ExclusionFamily};
pub use params::{ListingType, SearchParameters, SellerType, LIMIT_RANGE, MAX_PRICE_RANGE};

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Seller reputation bucket, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SellerTier {
    Elite,
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Average,
    Inexperienced,
    #[serde(rename = "Low Rated")]
    LowRated,
    Uncategorized,
}

impl SellerTier {
    /// Tiers a search can be restricted to
    pub const SELECTABLE: [SellerTier; 4] = [
        SellerTier::Elite,
        SellerTier::Excellent,
        SellerTier::VeryGood,
        SellerTier::Good,
    ];

    /// Parse a rating filter choice; only the selectable tiers are accepted.
    pub fn parse_selectable(s: &str) -> Result<Self, SearchError> {
        let tier: SellerTier = s.parse()?;
        if Self::SELECTABLE.contains(&tier) {
            Ok(tier)
        } else {
            Err(SearchError::InvalidParameters(format!(
                "seller rating filter must be one of Elite, Excellent, Very Good, Good; got '{}'",
                s.trim()
            )))
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SellerTier::Elite => "Elite",
            SellerTier::Excellent => "Excellent",
            SellerTier::VeryGood => "Very Good",
            SellerTier::Good => "Good",
            SellerTier::Average => "Average",
            SellerTier::Inexperienced => "Inexperienced",
            SellerTier::LowRated => "Low Rated",
            SellerTier::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for SellerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SellerTier {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let tier = match key.as_str() {
            "elite" => SellerTier::Elite,
            "excellent" => SellerTier::Excellent,
            "verygood" => SellerTier::VeryGood,
            "good" => SellerTier::Good,
            "average" => SellerTier::Average,
            "inexperienced" => SellerTier::Inexperienced,
            "lowrated" => SellerTier::LowRated,
            "uncategorized" => SellerTier::Uncategorized,
            _ => {
                return Err(SearchError::InvalidParameters(format!(
                    "unknown seller rating '{}'",
                    s.trim()
                )))
            }
        };
        Ok(tier)
    }
}

/// Display format for auction end times in the local reference zone.
pub const END_TIME_FORMAT: &str = "%Y-%m-%d %I:%M %p %Z";

/// Resolved auction end time of a listing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuctionEnd {
    /// Not an auction, or no end date was supplied
    NotApplicable,
    /// An end date was supplied but could not be read
    Invalid,
    At(DateTime<Tz>),
}

impl AuctionEnd {
    pub fn instant(&self) -> Option<DateTime<Tz>> {
        match self {
            AuctionEnd::At(at) => Some(*at),
            _ => None,
        }
    }
}

impl fmt::Display for AuctionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionEnd::NotApplicable => f.write_str("N/A"),
            AuctionEnd::Invalid => f.write_str("Invalid date"),
            AuctionEnd::At(at) => write!(f, "{}", at.format(END_TIME_FORMAT)),
        }
    }
}

impl Serialize for AuctionEnd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One accepted listing, in the column order used for export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub listing: String,
    pub condition: Option<String>,
    pub price: f64,
    pub current_bid_price: Option<f64>,
    pub listing_type: String,
    pub bid_count: Option<i64>,
    pub auction_end_time: AuctionEnd,
    pub seller: String,
    pub seller_rating: SellerTier,
    pub seller_feedback: f64,
    pub seller_feedback_score: i64,
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tier_parses_display_names() {
        assert_eq!("Very Good".parse::<SellerTier>().unwrap(), SellerTier::VeryGood);
        assert_eq!("low_rated".parse::<SellerTier>().unwrap(), SellerTier::LowRated);
        assert!("Legendary".parse::<SellerTier>().is_err());
    }

    #[test]
    fn only_top_four_tiers_are_selectable() {
        assert_eq!(SellerTier::parse_selectable("very good").unwrap(), SellerTier::VeryGood);
        assert_eq!(SellerTier::parse_selectable(" Good ").unwrap(), SellerTier::Good);
        for rejected in ["Average", "Low Rated", "Inexperienced", "Uncategorized", "Legendary"] {
            assert!(matches!(
                SellerTier::parse_selectable(rejected),
                Err(SearchError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn auction_end_renders_sentinels_and_local_time() {
        assert_eq!(AuctionEnd::NotApplicable.to_string(), "N/A");
        assert_eq!(AuctionEnd::Invalid.to_string(), "Invalid date");

        let at = chrono_tz::US::Central
            .with_ymd_and_hms(2025, 1, 15, 14, 5, 0)
            .unwrap();
        assert_eq!(AuctionEnd::At(at).to_string(), "2025-01-15 02:05 PM CST");
    }
}
