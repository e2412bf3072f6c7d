use crate::petfinder::models::{Animal, AnimalQuery, AnimalsPage, Organization};
use crate::petfinder::PetfinderError;
use std::time::Duration;

/// A freshly issued bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: Duration,
}

/// The four upstream calls the pipeline needs. `PetfinderClient` talks to the
/// real API; tests plug in canned pages.
pub trait AnimalSource: Send + Sync {
    fn access_token(&self) -> Result<AccessToken, PetfinderError>;

    fn search_animals(
        &self,
        token: &str,
        query: &AnimalQuery,
        page: u32,
    ) -> Result<AnimalsPage, PetfinderError>;

    /// `Ok(None)` when the listing does not exist.
    fn animal(&self, token: &str, id: &str) -> Result<Option<Animal>, PetfinderError>;

    /// `Ok(None)` when the organization does not exist.
    fn organization(&self, token: &str, id: &str) -> Result<Option<Organization>, PetfinderError>;
}
