use crate::models::SearchParameters;

/// Condition ids the search asks for: new, open box, refurbished, used.
pub const CONDITION_ALLOW_LIST: [&str; 5] = ["1000", "1500", "2000", "2500", "3000"];

/// Query text plus structured clauses for one Browse search
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub query: String,
    pub filters: Vec<String>,
    pub category_ids: Option<String>,
    pub limit: u32,
}

impl BuiltQuery {
    /// Request parameters in the order they are sent.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("filter", self.filters.join(",")),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ids) = &self.category_ids {
            pairs.push(("category_ids", ids.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    currency: String,
}

impl QueryBuilder {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn build(&self, params: &SearchParameters) -> BuiltQuery {
        let mut query = format!("\"{}\"", params.search_term.trim());
        if let Some(family) = params.category.exclusion_family() {
            query.push_str(&format!(" -({})", family.keywords().join(",")));
        }

        let mut filters = vec![
            format!("price:[1..{}]", params.max_price),
            format!("priceCurrency:{}", self.currency),
            format!("conditions:{{{}}}", CONDITION_ALLOW_LIST.join("|")),
        ];

        if let Some(option) = params.listing_type.buying_option() {
            filters.push(format!("buyingOptions:{{{option}}}"));
        }

        if let Some(aspect) = params.category.aspect() {
            filters.push(format!("aspect_filter={}:{{{}}}", aspect.name, aspect.value));
            query.push_str(&format!(" \"{}\"", aspect.keyword));
        }

        BuiltQuery {
            query,
            filters,
            category_ids: params.category.id().map(str::to_string),
            limit: params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ListingType};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_search_quotes_term_and_sets_base_filters() {
        let params = SearchParameters::new("nintendo switch");
        let built = QueryBuilder::new("USD").build(&params);

        assert_eq!(built.query, "\"nintendo switch\"");
        assert_eq!(
            built.filters,
            vec![
                "price:[1..150]".to_string(),
                "priceCurrency:USD".to_string(),
                "conditions:{1000|1500|2000|2500|3000}".to_string(),
            ]
        );
        assert_eq!(built.category_ids, None);
        assert_eq!(built.limit, 25);
    }

    #[test]
    fn phone_family_appends_accessory_exclusions() {
        let mut params = SearchParameters::new("iphone 13");
        params.category = Category::CellPhones;
        let built = QueryBuilder::new("USD").build(&params);

        assert!(built.query.starts_with("\"iphone 13\" -(case,cover,keyboard,"));
        assert!(built.query.ends_with("for parts,not working,empty box)"));
        assert_eq!(built.category_ids.as_deref(), Some("9355"));
    }

    #[test]
    fn tech_family_excludes_broken_goods_without_category_id() {
        let mut params = SearchParameters::new("usb hub");
        params.category = Category::TechAccessories;
        let built = QueryBuilder::new("USD").build(&params);

        assert_eq!(
            built.query,
            "\"usb hub\" -(broken,defective,not working,for parts,empty box)"
        );
        assert_eq!(built.category_ids, None);
    }

    #[test]
    fn listing_type_clause_only_when_specific() {
        let builder = QueryBuilder::new("USD");
        let mut params = SearchParameters::new("lego");

        assert!(!builder
            .build(&params)
            .filters
            .iter()
            .any(|f| f.starts_with("buyingOptions")));

        params.listing_type = ListingType::BestOffer;
        assert_eq!(
            builder.build(&params).filters.last().map(String::as_str),
            Some("buyingOptions:{BEST_OFFER}")
        );
    }

    #[test]
    fn shoe_category_adds_aspect_and_keyword_fallback() {
        let mut params = SearchParameters::new("jordan 1");
        params.category = Category::MensShoes;
        params.listing_type = ListingType::Auction;
        params.max_price = 300;
        params.limit = 50;
        let built = QueryBuilder::new("USD").build(&params);

        assert_eq!(built.query, "\"jordan 1\" \"11\"");
        assert_eq!(
            built.filters[3..].to_vec(),
            vec![
                "buyingOptions:{AUCTION}".to_string(),
                "aspect_filter=US Shoe Size:{11}".to_string(),
            ]
        );
        assert_eq!(
            built.to_query_pairs(),
            vec![
                ("q", "\"jordan 1\" \"11\"".to_string()),
                (
                    "filter",
                    "price:[1..300],priceCurrency:USD,conditions:{1000|1500|2000|2500|3000},buyingOptions:{AUCTION},aspect_filter=US Shoe Size:{11}"
                        .to_string()
                ),
                ("limit", "50".to_string()),
                ("category_ids", "93427".to_string()),
            ]
        );
    }

    #[test]
    fn currency_comes_from_builder() {
        let built = QueryBuilder::new("GBP").build(&SearchParameters::new("kettle"));
        assert_eq!(built.filters[1], "priceCurrency:GBP");
    }
}
