pub mod filters;
pub mod guidance;
pub mod listing;
pub mod organization;

pub use filters::{
    breed_excluded, paginate, sort_listings, ListingFilter, SearchPage, SortMode,
    DEFAULT_EXCLUDED_BREEDS,
};
pub use guidance::size_intent;
pub use organization::OrganizationResolver;
