// src/pipeline/request.rs
use crate::config::split_csv;
use crate::domain::{size_intent, ListingFilter, SortMode};
use crate::errors::ServerError;
use std::str::FromStr;

pub const DEFAULT_AGES: &str = "baby,young";
pub const DEFAULT_RADIUS: u32 = 100;
pub const MAX_RADIUS: u32 = 250;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// A parsed `GET /api/dogs` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub zips: Vec<String>,
    pub radius: u32,
    pub ages: String,
    pub filter: ListingFilter,
    pub guidance: Option<String>,
    pub sort: SortMode,
    pub page: usize,
    pub page_size: usize,
}

impl SearchRequest {
    /// A first page with default parameters over `zips`.
    pub fn for_zips(zips: Vec<String>) -> Self {
        Self {
            zips,
            radius: DEFAULT_RADIUS,
            ages: DEFAULT_AGES.to_string(),
            filter: ListingFilter::default(),
            guidance: None,
            sort: SortMode::Freshness,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Builds a request from query parameters. Missing values take their
    /// defaults; out-of-range values are a bad request.
    pub fn from_params<'p, F>(param: F, default_zips: &[String]) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<&'p str>,
    {
        let csv = |name: &str| param(name).map(split_csv).unwrap_or_default();

        let mut zips = csv("zip");
        if zips.is_empty() {
            zips = default_zips.to_vec();
        }

        let ages = param("age")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AGES)
            .to_string();

        let sort = match param("sort") {
            Some(raw) => raw.parse::<SortMode>().map_err(ServerError::BadRequest)?,
            None => SortMode::Freshness,
        };

        let guidance = param("guidance")
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);

        Ok(Self {
            zips,
            radius: bounded(param("radius"), "radius", DEFAULT_RADIUS, 1, MAX_RADIUS)?,
            ages,
            filter: ListingFilter {
                sizes: csv("size"),
                include_breeds: csv("includeBreeds"),
                exclude_breeds: csv("excludeBreeds"),
            },
            guidance,
            sort,
            page: bounded(param("page"), "page", 1, 1, usize::MAX)?,
            page_size: bounded(param("limit"), "limit", DEFAULT_PAGE_SIZE, 1, MAX_PAGE_SIZE)?,
        })
    }

    /// The caller's filter with guidance folded into the size list. An explicit
    /// `size` wins; guidance only fills in when none was given.
    pub fn effective_filter(&self) -> ListingFilter {
        let mut filter = self.filter.clone();
        if filter.sizes.is_empty() {
            if let Some(sizes) = self.guidance.as_deref().and_then(size_intent) {
                filter.sizes = sizes.iter().map(|s| s.to_string()).collect();
            }
        }
        filter
    }

    /// Every parameter that changes the upstream fetch or the page. Guidance
    /// only shows up through the sizes it resolves to.
    pub fn cache_key(&self) -> String {
        let filter = self.effective_filter();
        format!(
            "dogs:{}:{}:{}:{}:{}:{}:{}:{}:{}",
            self.zips.join(","),
            self.radius,
            self.ages,
            filter.include_breeds.join(","),
            filter.exclude_breeds.join(","),
            filter.sizes.join(","),
            self.sort.as_str(),
            self.page,
            self.page_size,
        )
    }
}

fn bounded<T>(raw: Option<&str>, name: &str, default: T, min: T, max: T) -> Result<T, ServerError>
where
    T: FromStr + PartialOrd + std::fmt::Display,
{
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };

    let value: T = raw
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("{name} must be a whole number, got '{raw}'")))?;

    if value < min || value > max {
        return Err(ServerError::BadRequest(format!(
            "{name} must be between {min} and {max}"
        )));
    }

    Ok(value)
}
