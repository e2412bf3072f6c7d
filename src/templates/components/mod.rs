pub mod error;
pub mod listing_table;

pub use error::html_error_response;
pub use listing_table::{listing_table, tidy_description};
