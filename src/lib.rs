//! Adoptable-dog aggregator: a JSON search API, an HTML digest page and an
//! emailed digest over the Petfinder v2 API.

pub mod cache;
pub mod config;
pub mod domain;
pub mod errors;
pub mod mailer;
pub mod petfinder;
pub mod pipeline;
pub mod responses;
pub mod router;
pub mod state;
pub mod templates;

#[cfg(test)]
mod tests;

pub use router::{handle, respond};
pub use state::AppState;
