// src/pipeline/fetcher.rs
use crate::petfinder::{Animal, AnimalQuery, AnimalSource, PetfinderError};
use chrono::{DateTime, Utc};
use log::info;
use std::time::Duration;

/// Pages through `GET /animals` for one ZIP code.
pub struct ListingFetcher<'a> {
    source: &'a dyn AnimalSource,
    page_delay: Duration,
}

impl<'a> ListingFetcher<'a> {
    pub fn new(source: &'a dyn AnimalSource, page_delay: Duration) -> Self {
        Self { source, page_delay }
    }

    /// Stops on an empty page, on the last reported page, or once the last
    /// listing on a page is older than `cutoff`.
    ///
    /// The cutoff exit assumes upstream returns newest first. If it does not,
    /// fresh listings on later pages are lost; that is accepted.
    ///
    /// Listings are returned unfiltered: the caller still drops stale ones
    /// from the final page.
    pub fn fetch_zip(
        &self,
        token: &str,
        query: &AnimalQuery,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Animal>, PetfinderError> {
        let mut results = Vec::new();
        let mut page = 1;

        loop {
            let payload = self.source.search_animals(token, query, page)?;
            let total_pages = payload.total_pages().unwrap_or(page);
            let animals = payload.animals.unwrap_or_default();

            if animals.is_empty() {
                break;
            }

            let last_published = animals.last().and_then(Animal::published);
            info!(
                "zip {} page {page}/{total_pages}: {} listings",
                query.location,
                animals.len()
            );
            results.extend(animals);

            if page >= total_pages {
                break;
            }
            if last_published.is_some_and(|at| at < cutoff) {
                break;
            }

            page += 1;
            if !self.page_delay.is_zero() {
                std::thread::sleep(self.page_delay);
            }
        }

        Ok(results)
    }
}
