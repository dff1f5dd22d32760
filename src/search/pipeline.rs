use crate::ebay::types::ItemSummary;
use crate::models::{AuctionEnd, ResultRecord, SearchParameters, SellerTier, SellerType};
use crate::search::charity::is_charity;
use crate::search::classifier::classify_raw;
use crate::search::numeric::{amount_or_zero, f64_or_zero, i64_or_zero, to_cents};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use tracing::debug;

/// Condition id of "for parts or not working" listings.
pub const FOR_PARTS_CONDITION: &str = "7000";

/// Why an item was left out of the results
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    ForParts,
    NotCharity,
    RatingExcluded(SellerTier),
    OverBudget { total: f64 },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::ForParts => f.write_str("for parts / not working"),
            DropReason::NotCharity => f.write_str("seller is not a charity store"),
            DropReason::RatingExcluded(tier) => write!(f, "seller rating {tier} not selected"),
            DropReason::OverBudget { total } => write!(f, "total cost {total:.2} over budget"),
        }
    }
}

/// Turns raw listings into accepted result records.
#[derive(Debug, Clone)]
pub struct ResultFilterPipeline {
    zone: Tz,
}

impl ResultFilterPipeline {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Filter and convert items, keeping input order.
    pub fn run(&self, items: &[ItemSummary], params: &SearchParameters) -> Vec<ResultRecord> {
        items
            .iter()
            .filter_map(|item| match self.evaluate(item, params) {
                Ok(record) => Some(record),
                Err(reason) => {
                    debug!("Dropped '{}': {}", item.title, reason);
                    None
                }
            })
            .collect()
    }

    /// Apply the exclusion checks in order; the first failing check decides.
    pub fn evaluate(
        &self,
        item: &ItemSummary,
        params: &SearchParameters,
    ) -> Result<ResultRecord, DropReason> {
        if item.condition_id.as_deref() == Some(FOR_PARTS_CONDITION) {
            return Err(DropReason::ForParts);
        }

        let seller = item.seller.clone().unwrap_or_default();
        let username = seller.username.unwrap_or_default();
        if params.seller_type == SellerType::Charity && !is_charity(&username) {
            return Err(DropReason::NotCharity);
        }

        let tier = classify_raw(
            seller.feedback_score.as_ref(),
            seller.feedback_percentage.as_ref(),
        );
        if !params.seller_ratings.is_empty() && !params.seller_ratings.contains(&tier) {
            return Err(DropReason::RatingExcluded(tier));
        }

        let price = amount_or_zero(item.price.as_ref());
        let shipping = amount_or_zero(
            item.shipping_options
                .first()
                .and_then(|option| option.shipping_cost.as_ref()),
        );
        let total = price + shipping;
        if to_cents(total) > i64::from(params.max_price) * 100 {
            return Err(DropReason::OverBudget { total });
        }

        let auction = item.is_auction();
        let auction_end_time = if auction {
            resolve_end_time(item.item_end_date.as_deref(), self.zone)
        } else {
            AuctionEnd::NotApplicable
        };

        Ok(ResultRecord {
            listing: item.title.clone(),
            condition: item.condition.clone(),
            price,
            current_bid_price: auction.then(|| amount_or_zero(item.current_bid_price.as_ref())),
            listing_type: item.buying_options_label(),
            bid_count: if auction {
                item.bid_count.as_ref().map(|count| i64_or_zero(Some(count)))
            } else {
                None
            },
            auction_end_time,
            seller: username,
            seller_rating: tier,
            seller_feedback: f64_or_zero(seller.feedback_percentage.as_ref()),
            seller_feedback_score: i64_or_zero(seller.feedback_score.as_ref()),
            link: item.item_web_url.clone(),
        })
    }
}

/// Convert an ISO 8601 end date to the display zone.
///
/// Timestamps without an offset are taken as UTC.
pub fn resolve_end_time(raw: Option<&str>, zone: Tz) -> AuctionEnd {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return AuctionEnd::NotApplicable;
    };

    let utc = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Utc.from_utc_datetime(&naive))
        });

    match utc {
        Ok(at) => AuctionEnd::At(at.with_timezone(&zone)),
        Err(err) => {
            debug!("Unparseable end date '{}': {}", raw, err);
            AuctionEnd::Invalid
        }
    }
}
