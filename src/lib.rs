//! Search eBay listings and keep the ones worth looking at.
//!
//! Raw Browse API results go through a filter pipeline that classifies
//! sellers by feedback, optionally keeps only charity thrift stores, and
//! enforces a ceiling on price plus shipping.

pub mod config;
pub mod ebay;
pub mod error;
pub mod models;
pub mod report;
pub mod search;
pub mod session;
pub mod shell;

pub use error::{SearchError, SearchResult};
