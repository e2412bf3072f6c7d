// src/pipeline/aggregate.rs
use crate::domain::{breed_excluded, OrganizationResolver};
use crate::petfinder::{Animal, AnimalQuery, AnimalSource, PetfinderError};
use crate::pipeline::fetcher::ListingFetcher;
use chrono::{DateTime, Utc};
use log::info;
use std::collections::HashSet;

/// Everything one aggregation pass needs besides the ZIP list.
pub struct Aggregation<'a> {
    pub source: &'a dyn AnimalSource,
    pub organizations: &'a OrganizationResolver,
    pub token: &'a str,
    pub fetcher: ListingFetcher<'a>,
    pub excluded_breeds: &'a [String],
    pub cutoff: DateTime<Utc>,
}

impl Aggregation<'_> {
    /// Fetches every ZIP in turn and keeps each eligible dog once, in fetch
    /// order. Any ZIP failing aborts the whole pass.
    pub fn collect(
        &self,
        zips: &[String],
        distance: u32,
        ages: &str,
    ) -> Result<Vec<Animal>, PetfinderError> {
        let mut kept = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_fingerprints = HashSet::new();

        for zip in zips {
            let query = AnimalQuery {
                location: zip.clone(),
                distance,
                age: ages.to_string(),
            };

            let fetched = self.fetcher.fetch_zip(self.token, &query, self.cutoff)?;
            let fetched_count = fetched.len();
            let before = kept.len();

            for mut animal in fetched {
                if !animal.published_since(self.cutoff) {
                    continue;
                }
                if breed_excluded(&animal, self.excluded_breeds) {
                    continue;
                }

                let fingerprint = animal.fingerprint();
                if seen_fingerprints.contains(&fingerprint) {
                    continue;
                }

                let Some(id) = animal.id else {
                    continue;
                };
                if !seen_ids.insert(id) {
                    continue;
                }

                animal.organization =
                    Some(self.organizations.resolve(self.source, self.token, &animal));
                seen_fingerprints.insert(fingerprint);
                kept.push(animal);
            }

            info!(
                "zip {zip}: kept {} of {fetched_count} fetched",
                kept.len() - before
            );
        }

        Ok(kept)
    }
}
