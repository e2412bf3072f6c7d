mod aggregate;
mod fetcher;
mod request;
mod search;

pub use aggregate::Aggregation;
pub use fetcher::ListingFetcher;
pub use request::{SearchRequest, DEFAULT_AGES, DEFAULT_PAGE_SIZE, DEFAULT_RADIUS};
pub use search::{SearchService, RECENCY_WINDOW};
