use crate::models::ResultRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header row, in the field order of `ResultRecord`.
pub const COLUMNS: [&str; 12] = [
    "listing",
    "condition",
    "price",
    "current_bid_price",
    "listing_type",
    "bid_count",
    "auction_end_time",
    "seller",
    "seller_rating",
    "seller_feedback",
    "seller_feedback_score",
    "link",
];

pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("ebay_search_{}.csv", now.format("%Y%m%d_%H%M"))
}

/// Write the header and one row per record. The header is written even for
/// an empty result set.
pub fn write_csv<W: Write>(records: &[ResultRecord], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(COLUMNS).context("writing CSV header")?;
    for record in records {
        csv.serialize(record)
            .with_context(|| format!("writing CSV row for '{}'", record.listing))?;
    }
    csv.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn export_to_path(records: &[ResultRecord], path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(records, file)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuctionEnd, SellerTier};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<ResultRecord> {
        vec![
            ResultRecord {
                listing: "Sony Walkman, WM-10".to_string(),
                condition: Some("Used".to_string()),
                price: 24.99,
                current_bid_price: None,
                listing_type: "FIXED_PRICE, BEST_OFFER".to_string(),
                bid_count: None,
                auction_end_time: AuctionEnd::NotApplicable,
                seller: "goodwill_sf".to_string(),
                seller_rating: SellerTier::VeryGood,
                seller_feedback: 97.5,
                seller_feedback_score: 812,
                link: Some("https://www.ebay.com/itm/1".to_string()),
            },
            ResultRecord {
                listing: "Casio F-91W".to_string(),
                condition: None,
                price: 8.0,
                current_bid_price: Some(6.5),
                listing_type: "AUCTION".to_string(),
                bid_count: Some(3),
                auction_end_time: AuctionEnd::Invalid,
                seller: "watchguy".to_string(),
                seller_rating: SellerTier::LowRated,
                seller_feedback: 85.0,
                seller_feedback_score: 40,
                link: None,
            },
        ]
    }

    #[test]
    fn writes_fixed_columns_and_quotes_commas() {
        let mut out = Vec::new();
        write_csv(&records(), &mut out).expect("csv written");
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "\"Sony Walkman, WM-10\",Used,24.99,,\"FIXED_PRICE, BEST_OFFER\",,N/A,goodwill_sf,Very Good,97.5,812,https://www.ebay.com/itm/1"
        );
        assert_eq!(
            lines[2],
            "Casio F-91W,,8.0,6.5,AUCTION,3,Invalid date,watchguy,Low Rated,85.0,40,"
        );
    }

    #[test]
    fn empty_result_still_has_header() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn exports_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = export_to_path(&records(), dir.path().join("out.csv")).expect("exported");
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn default_name_carries_timestamp() {
        let now = Local.with_ymd_and_hms(2025, 3, 9, 14, 7, 0).unwrap();
        assert_eq!(default_file_name(now), "ebay_search_20250309_1407.csv");
    }
}
