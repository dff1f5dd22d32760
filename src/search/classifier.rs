use crate::models::SellerTier;
use crate::search::numeric::{f64_or_zero, i64_or_zero};
use serde_json::Value;

/// Map feedback metrics to a reputation tier.
///
/// Rules are checked top to bottom and the first match wins:
///
/// | tier          | score   | percentage |
/// |---------------|---------|------------|
/// | Elite         | ≥ 5000  | ≥ 99       |
/// | Excellent     | ≥ 1000  | ≥ 98       |
/// | Very Good     | ≥ 500   | ≥ 97       |
/// | Good          | ≥ 100   | ≥ 95       |
/// | Average       | ≥ 100   | ≥ 90       |
/// | Inexperienced | < 100   | ≥ 90       |
/// | Low Rated     | any     | < 90       |
///
/// A percentage that compares false against everything (NaN) lands in
/// `Uncategorized`.
pub fn classify(score: i64, percentage: f64) -> SellerTier {
    if score >= 5000 && percentage >= 99.0 {
        SellerTier::Elite
    } else if score >= 1000 && percentage >= 98.0 {
        SellerTier::Excellent
    } else if score >= 500 && percentage >= 97.0 {
        SellerTier::VeryGood
    } else if score >= 100 && percentage >= 95.0 {
        SellerTier::Good
    } else if score >= 100 && percentage >= 90.0 {
        SellerTier::Average
    } else if score < 100 && percentage >= 90.0 {
        SellerTier::Inexperienced
    } else if percentage < 90.0 {
        SellerTier::LowRated
    } else {
        SellerTier::Uncategorized
    }
}

/// `classify` over raw API values; missing or malformed inputs count as 0.
pub fn classify_raw(score: Option<&Value>, percentage: Option<&Value>) -> SellerTier {
    classify(i64_or_zero(score), f64_or_zero(percentage))
}
