mod client;
pub mod models;
mod petfinder_error;
mod source;
mod token;

pub use client::PetfinderClient;
pub use models::{parse_timestamp, Animal, AnimalQuery, AnimalsPage, Organization, OrganizationInfo};
pub use petfinder_error::PetfinderError;
pub use source::{AccessToken, AnimalSource};
pub use token::{TokenProvider, EXPIRY_MARGIN};
