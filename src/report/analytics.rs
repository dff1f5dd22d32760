use crate::models::ResultRecord;
use statrs::statistics::{Data, Median, Statistics};

/// Items priced below this share of the mean count as deals.
pub const DEAL_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub record: ResultRecord,
    /// Mean price minus this item's price
    pub savings: f64,
}

/// Price summary over one result set
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAnalytics {
    pub mean: f64,
    pub median: f64,
    pub deals: Vec<Deal>,
}

impl PriceAnalytics {
    /// `None` for an empty result set.
    pub fn compute(records: &[ResultRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        let mean = prices.iter().mean();
        let median = Data::new(prices).median();

        let cutoff = mean * DEAL_THRESHOLD;
        let deals = records
            .iter()
            .filter(|r| r.price < cutoff)
            .map(|r| Deal {
                record: r.clone(),
                savings: mean - r.price,
            })
            .collect();

        Some(Self {
            mean,
            median,
            deals,
        })
    }

    pub fn deal_count(&self) -> usize {
        self.deals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuctionEnd, SellerTier};

    fn record(price: f64) -> ResultRecord {
        ResultRecord {
            listing: format!("item {price}"),
            condition: Some("Used".to_string()),
            price,
            current_bid_price: None,
            listing_type: "FIXED_PRICE".to_string(),
            bid_count: None,
            auction_end_time: AuctionEnd::NotApplicable,
            seller: "shop".to_string(),
            seller_rating: SellerTier::Good,
            seller_feedback: 99.0,
            seller_feedback_score: 250,
            link: None,
        }
    }

    #[test]
    fn mean_median_and_deals() {
        let records: Vec<_> = [10.0, 20.0, 30.0, 40.0, 50.0].into_iter().map(record).collect();
        let analytics = PriceAnalytics::compute(&records).expect("non-empty");

        assert!((analytics.mean - 30.0).abs() < 1e-9);
        assert!((analytics.median - 30.0).abs() < 1e-9);
        // cutoff is 25.5
        let deal_prices: Vec<f64> = analytics.deals.iter().map(|d| d.record.price).collect();
        assert_eq!(deal_prices, vec![10.0, 20.0]);
        assert!((analytics.deals[0].savings - 20.0).abs() < 1e-9);
        assert_eq!(analytics.deal_count(), 2);
    }

    #[test]
    fn even_count_median_averages_middle_pair() {
        let records: Vec<_> = [5.0, 1.0, 3.0, 100.0].into_iter().map(record).collect();
        let analytics = PriceAnalytics::compute(&records).unwrap();
        assert!((analytics.median - 4.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_prices_have_no_deals() {
        let records: Vec<_> = [20.0, 20.0, 20.0].into_iter().map(record).collect();
        assert!(PriceAnalytics::compute(&records).unwrap().deals.is_empty());
    }

    #[test]
    fn empty_set_has_no_analytics() {
        assert_eq!(PriceAnalytics::compute(&[]), None);
    }
}
