use crate::report::{Outcome, SearchReport, ViewMode};
use std::io::{self, Write};

/// `$1,234.56` style, negative amounts as `-$3.00`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

pub fn render_report<W: Write>(report: &SearchReport, out: &mut W) -> io::Result<()> {
    if let Outcome::Empty(message) = &report.outcome {
        writeln!(out, "ℹ️  {message}")?;
        return Ok(());
    }

    if let Some(analytics) = &report.analytics {
        writeln!(out, "📊 Price Analytics")?;
        writeln!(out, "   Average price:   {}", format_money(analytics.mean))?;
        writeln!(out, "   Median price:    {}", format_money(analytics.median))?;
        writeln!(
            out,
            "   Potential deals: {} item(s) priced 15% below average",
            analytics.deal_count()
        )?;
        for deal in &analytics.deals {
            writeln!(
                out,
                "   🎯 {} at {} (saves {}) from {} [{}]",
                deal.record.listing,
                format_money(deal.record.price),
                format_money(deal.savings),
                deal.record.seller,
                deal.record.seller_rating
            )?;
        }
        writeln!(out)?;
    }

    let heading = match report.mode {
        ViewMode::Price => "📋 Search Results",
        ViewMode::Auction => "📋 Auction Listings",
    };
    writeln!(out, "{heading}")?;

    for (i, record) in report.records.iter().enumerate() {
        match report.mode {
            ViewMode::Price => writeln!(
                out,
                "{}. {} ({})",
                i + 1,
                record.listing,
                format_money(record.price)
            )?,
            ViewMode::Auction => writeln!(
                out,
                "{}. {} (bid {}, {} bid(s), ends {})",
                i + 1,
                record.listing,
                format_money(record.current_bid_price.unwrap_or_default()),
                record.bid_count.unwrap_or_default(),
                record.auction_end_time
            )?,
        }
        writeln!(
            out,
            "   {} · {}",
            record.condition.as_deref().unwrap_or("Unknown condition"),
            record.listing_type
        )?;
        writeln!(
            out,
            "   Seller: {} ({}, {}% / {})",
            record.seller,
            record.seller_rating,
            record.seller_feedback,
            record.seller_feedback_score
        )?;
        if let Some(link) = &record.link {
            writeln!(out, "   URL: {link}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "✅ {}", report.outcome.message())?;
    Ok(())
}
