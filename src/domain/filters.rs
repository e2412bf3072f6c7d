// src/domain/filters.rs

use crate::petfinder::Animal;
use serde::Serialize;
use std::str::FromStr;

/// Breeds dropped from every result, matched as case-insensitive substrings.
pub const DEFAULT_EXCLUDED_BREEDS: &[&str] = &[
    "Husky",
    "Coonhound",
    "Pit Bull",
    "Jack Russell Terrier",
    "German Shepherd",
    "Carolina Dog Mix",
    "Bull Terrier",
    "Chihuahua",
    "Rhodesian Ridgeback",
    "Rottweiler",
    "English Bulldog",
    "American Staffordshire Terrier",
];

/// Substring test, not token-aware: "bull" matches "Bulldog".
fn mentions_any(breed_text: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| breed_text.contains(&needle.to_lowercase()))
}

/// True if the primary or secondary breed contains any excluded substring.
pub fn breed_excluded(animal: &Animal, excluded: &[String]) -> bool {
    mentions_any(&animal.breed_text(), excluded)
}

/// Caller-supplied filters applied after aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub sizes: Vec<String>,
    pub include_breeds: Vec<String>,
    pub exclude_breeds: Vec<String>,
}

impl ListingFilter {
    pub fn matches(&self, animal: &Animal) -> bool {
        if !self.sizes.is_empty() && !size_in(animal, &self.sizes) {
            return false;
        }

        let breeds = animal.breed_text();
        if !self.include_breeds.is_empty() && !mentions_any(&breeds, &self.include_breeds) {
            return false;
        }

        !mentions_any(&breeds, &self.exclude_breeds)
    }
}

/// Exact, case-insensitive size match against any of `sizes`.
fn size_in<S: AsRef<str>>(animal: &Animal, sizes: &[S]) -> bool {
    let size = animal.size();
    sizes.iter().any(|s| s.as_ref().eq_ignore_ascii_case(size))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Freshness,
    Distance,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Freshness => "freshness",
            SortMode::Distance => "distance",
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freshness" => Ok(SortMode::Freshness),
            "distance" => Ok(SortMode::Distance),
            other => Err(format!("sort must be 'freshness' or 'distance', got '{other}'")),
        }
    }
}

/// Stable sort. Distance ascending (missing = 0), otherwise newest first.
pub fn sort_listings(animals: &mut [Animal], mode: SortMode) {
    match mode {
        SortMode::Distance => animals.sort_by(|a, b| {
            a.distance
                .unwrap_or(0.0)
                .total_cmp(&b.distance.unwrap_or(0.0))
        }),
        SortMode::Freshness => {
            animals.sort_by(|a, b| b.published_or_epoch().cmp(&a.published_or_epoch()))
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<Animal>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

/// Slices `[(page-1)*page_size, page*page_size)`; `total` is the full count.
pub fn paginate(animals: Vec<Animal>, page: usize, page_size: usize) -> SearchPage {
    let total = animals.len();
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items = animals.into_iter().skip(start).take(page_size).collect();

    SearchPage {
        items,
        page,
        page_size,
        total,
    }
}
