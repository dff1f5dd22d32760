use crate::models::SearchParameters;
use crate::report::SearchReport;
use chrono::{DateTime, Local};

/// A stored parameter set, keyed by its generated label
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSearch {
    pub name: String,
    pub params: SearchParameters,
    pub saved_at: String,
}

/// State of one interactive session. Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct Session {
    /// Parameters the next search will use
    pub current: SearchParameters,
    saved: Vec<SavedSearch>,
    last_report: Option<SearchReport>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `params` unless a search with the same label exists.
    pub fn save(&mut self, params: SearchParameters) -> bool {
        self.save_at(params, Local::now())
    }

    pub fn save_at(&mut self, params: SearchParameters, now: DateTime<Local>) -> bool {
        let name = params.label();
        if self.saved.iter().any(|s| s.name == name) {
            return false;
        }
        self.saved.push(SavedSearch {
            name,
            params,
            saved_at: now.format("%Y-%m-%d %H:%M").to_string(),
        });
        true
    }

    pub fn save_current(&mut self) -> bool {
        self.save(self.current.clone())
    }

    pub fn saved(&self) -> &[SavedSearch] {
        &self.saved
    }

    /// Make a saved search the current parameters.
    pub fn load(&mut self, index: usize) -> Option<&SearchParameters> {
        let params = self.saved.get(index)?.params.clone();
        self.current = params;
        Some(&self.current)
    }

    pub fn delete(&mut self, index: usize) -> bool {
        if index < self.saved.len() {
            self.saved.remove(index);
            true
        } else {
            false
        }
    }

    pub fn record_report(&mut self, report: SearchReport) {
        self.last_report = Some(report);
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ListingType};
    use chrono::TimeZone;

    fn params(term: &str, max_price: u32) -> SearchParameters {
        let mut params = SearchParameters::new(term);
        params.max_price = max_price;
        params
    }

    #[test]
    fn saving_deduplicates_by_label() {
        let mut session = Session::new();
        let now = Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();

        assert!(session.save_at(params("lego", 100), now));
        let mut same_label = params("lego", 100);
        same_label.listing_type = ListingType::Auction;
        assert!(!session.save_at(same_label, now));
        assert!(session.save_at(params("lego", 200), now));

        let names: Vec<_> = session.saved().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["lego in All Categories ($100)", "lego in All Categories ($200)"]);
        assert_eq!(session.saved()[0].saved_at, "2025-06-01 09:30");
    }

    #[test]
    fn load_replaces_current_parameters() {
        let mut session = Session::new();
        let mut shoes = params("jordan", 250);
        shoes.category = Category::MensShoes;
        session.save(shoes.clone());

        assert_eq!(session.load(0), Some(&shoes));
        assert_eq!(session.current, shoes);
        assert_eq!(session.load(5), None);
        assert_eq!(session.current, shoes);
    }

    #[test]
    fn delete_removes_by_index() {
        let mut session = Session::new();
        session.save(params("a", 10));
        session.save(params("b", 10));

        assert!(!session.delete(2));
        assert!(session.delete(0));
        assert_eq!(session.saved().len(), 1);
        assert_eq!(session.saved()[0].params.search_term, "b");
    }

    #[test]
    fn save_current_uses_current_parameters() {
        let mut session = Session::new();
        session.current = params("kettle", 40);
        assert!(session.save_current());
        assert!(!session.save_current());
        assert_eq!(session.saved()[0].name, "kettle in All Categories ($40)");
    }
}
