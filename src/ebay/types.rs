use crate::search::numeric::text_or_none;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

// Per-field recovery: a field of the wrong shape reads as absent instead of
// failing the whole response.

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_or_none(Some(&value)))
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Items that are not objects at all are skipped; the rest of the page survives.
fn lenient_items<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ItemSummary>, D::Error> {
    let Value::Array(raw) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(raw
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(err) => {
                debug!("Skipping unreadable item summary: {}", err);
                None
            }
        })
        .collect())
}

/// Listing mechanism as reported by the Browse API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuyingOption {
    Auction,
    FixedPrice,
    BestOffer,
    /// Any value the API adds later, kept verbatim
    Other(String),
}

impl BuyingOption {
    pub fn as_str(&self) -> &str {
        match self {
            BuyingOption::Auction => "AUCTION",
            BuyingOption::FixedPrice => "FIXED_PRICE",
            BuyingOption::BestOffer => "BEST_OFFER",
            BuyingOption::Other(raw) => raw,
        }
    }
}

impl From<String> for BuyingOption {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "AUCTION" => BuyingOption::Auction,
            "FIXED_PRICE" => BuyingOption::FixedPrice,
            "BEST_OFFER" => BuyingOption::BestOffer,
            _ => BuyingOption::Other(raw),
        }
    }
}

impl From<BuyingOption> for String {
    fn from(option: BuyingOption) -> Self {
        option.as_str().to_string()
    }
}

impl fmt::Display for BuyingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Money amount; `value` is usually a decimal string but numbers show up too
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Amount {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    #[serde(default, deserialize_with = "lenient")]
    pub shipping_cost: Option<Amount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(default)]
    pub feedback_score: Option<Value>,
    #[serde(default)]
    pub feedback_percentage: Option<Value>,
}

/// One entry of `itemSummaries`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Amount>,
    #[serde(default, deserialize_with = "lenient")]
    pub shipping_options: Vec<ShippingOption>,
    /// Sent as a string, but numeric ids are read as their decimal text
    #[serde(default, deserialize_with = "lenient_text")]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub buying_options: Vec<BuyingOption>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub item_end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_bid_price: Option<Amount>,
    #[serde(default)]
    pub bid_count: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub seller: Option<Seller>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub item_web_url: Option<String>,
}

impl ItemSummary {
    pub fn is_auction(&self) -> bool {
        self.buying_options.contains(&BuyingOption::Auction)
    }

    pub fn buying_options_label(&self) -> String {
        self.buying_options
            .iter()
            .map(BuyingOption::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Body of `GET /buy/browse/v1/item_summary/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_items")]
    pub item_summaries: Vec<ItemSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
}

/// Body of the client-credentials token endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub expires_in: Option<u64>,
}
