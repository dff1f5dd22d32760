pub mod auth;
pub mod browse;
pub mod fixture;
pub mod traits;
pub mod types;

#[cfg(test)]
mod canned;

pub use browse::BrowseClient;
pub use fixture::FixtureSource;
pub use traits::ListingSource;
