// src/pipeline/search.rs
use crate::cache::clock::sub_duration;
use crate::cache::{Clock, RateLimiter, TtlCache};
use crate::config::Config;
use crate::domain::{paginate, sort_listings, OrganizationResolver, SearchPage, SortMode};
use crate::errors::ServerError;
use crate::petfinder::{Animal, AnimalSource, PetfinderError, TokenProvider};
use crate::pipeline::aggregate::Aggregation;
use crate::pipeline::fetcher::ListingFetcher;
use crate::pipeline::request::{SearchRequest, DEFAULT_AGES};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Only listings published this recently are ever returned.
pub const RECENCY_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

struct SearchSettings {
    zip_codes: Vec<String>,
    distance_miles: u32,
    excluded_breeds: Vec<String>,
    page_delay: Duration,
    search_ttl: Duration,
    detail_ttl: Duration,
}

/// The search, detail and digest use cases over one upstream source.
/// Owns the process-local caches and the rate limiter.
pub struct SearchService {
    source: Box<dyn AnimalSource>,
    clock: Arc<dyn Clock>,
    tokens: TokenProvider,
    organizations: OrganizationResolver,
    results: TtlCache<SearchPage>,
    details: TtlCache<Animal>,
    limiter: RateLimiter,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(config: &Config, source: Box<dyn AnimalSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            tokens: TokenProvider::new(clock.clone()),
            organizations: OrganizationResolver::new(clock.clone(), config.cache.organization_ttl),
            results: TtlCache::new(clock.clone()),
            details: TtlCache::new(clock.clone()),
            limiter: RateLimiter::new(
                config.rate_limit.max_requests,
                config.rate_limit.window,
                clock.clone(),
            ),
            settings: SearchSettings {
                zip_codes: config.zip_codes.clone(),
                distance_miles: config.distance_miles,
                excluded_breeds: config.excluded_breeds.clone(),
                page_delay: config.page_delay,
                search_ttl: config.cache.search_ttl,
                detail_ttl: config.cache.detail_ttl,
            },
            clock,
        }
    }

    pub fn default_zips(&self) -> &[String] {
        &self.settings.zip_codes
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Rate-limited search. Identical requests inside the cache TTL are
    /// replayed without touching upstream.
    pub fn search(&self, client: &str, request: &SearchRequest) -> Result<SearchPage, ServerError> {
        if !self.limiter.allow(client) {
            warn!("rate limit hit for {client}");
            return Err(ServerError::RateLimited);
        }

        let key = request.cache_key();
        if let Some(page) = self.results.get(&key) {
            debug!("cache hit {key}");
            return Ok(page);
        }

        let page = self.fresh_page(request)?;
        info!(
            "search {key}: {} of {} listings on page",
            page.items.len(),
            page.total
        );
        self.results.set(key, page.clone(), self.settings.search_ttl);
        Ok(page)
    }

    fn fresh_page(&self, request: &SearchRequest) -> Result<SearchPage, PetfinderError> {
        let token = self.tokens.bearer(self.source.as_ref())?;
        let collected = self
            .aggregation(&token)
            .collect(&request.zips, request.radius, &request.ages)?;

        let filter = request.effective_filter();
        let mut matching: Vec<Animal> = collected
            .into_iter()
            .filter(|animal| filter.matches(animal))
            .collect();
        sort_listings(&mut matching, request.sort);

        Ok(paginate(matching, request.page, request.page_size))
    }

    /// Single listing by id, cached. Not rate-limited.
    pub fn animal(&self, id: &str) -> Result<Animal, ServerError> {
        let key = format!("dog:{id}");
        if let Some(animal) = self.details.get(&key) {
            return Ok(animal);
        }

        let token = self.tokens.bearer(self.source.as_ref())?;
        let animal = self
            .source
            .animal(&token, id)?
            .ok_or_else(|| ServerError::NotFound("Dog not found".into()))?;

        self.details.set(key, animal.clone(), self.settings.detail_ttl);
        Ok(animal)
    }

    /// Every eligible listing for the configured ZIP codes, newest first.
    pub fn digest(&self) -> Result<Vec<Animal>, PetfinderError> {
        let token = self.tokens.bearer(self.source.as_ref())?;
        let mut animals = self.aggregation(&token).collect(
            &self.settings.zip_codes,
            self.settings.distance_miles,
            DEFAULT_AGES,
        )?;
        sort_listings(&mut animals, SortMode::Freshness);

        info!("digest: {} listings", animals.len());
        Ok(animals)
    }

    fn aggregation<'a>(&'a self, token: &'a str) -> Aggregation<'a> {
        Aggregation {
            source: self.source.as_ref(),
            organizations: &self.organizations,
            token,
            fetcher: ListingFetcher::new(self.source.as_ref(), self.settings.page_delay),
            excluded_breeds: &self.settings.excluded_breeds,
            cutoff: sub_duration(self.clock.now(), RECENCY_WINDOW),
        }
    }
}
