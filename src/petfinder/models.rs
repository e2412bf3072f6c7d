use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// animal
//  ├── id
//  ├── organization_id
//  ├── url
//  ├── name / age / size / gender / description
//  ├── breeds
//  │    ├── primary
//  │    ├── secondary
//  │    ├── mixed
//  │    └── unknown
//  ├── videos[]            (string, or { url | embed })
//  ├── contact
//  │    ├── email
//  │    ├── phone
//  │    └── address
//  │         ├── city
//  │         └── state ...
//  ├── published_at
//  └── distance
//
// Anything else the API sends is kept in `extra` and written back out as-is.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: Option<u64>,
    pub organization_id: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub breeds: Option<Breeds>,
    pub videos: Option<Vec<Video>>,
    pub contact: Option<Contact>,
    pub published_at: Option<String>,
    pub distance: Option<f64>,

    /// Attached during aggregation; never sent by the upstream API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationInfo>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breeds {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub mixed: Option<bool>,
    pub unknown: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Video {
    Link(String),
    Embedded {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        embed: Option<String>,
    },
}

impl Video {
    /// The url if there is one, the embed snippet otherwise.
    pub fn href(&self) -> Option<&str> {
        let href = match self {
            Video::Link(url) => Some(url.as_str()),
            Video::Embedded { url, embed } => url.as_deref().or(embed.as_deref()),
        };
        href.filter(|h| !h.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

/// Shelter details attached to every aggregated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Organization {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pagination {
    pub count_per_page: Option<u32>,
    pub total_count: Option<u32>,
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
}

/// One page of `GET /animals`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnimalsPage {
    #[serde(default)]
    pub animals: Option<Vec<Animal>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl AnimalsPage {
    pub fn new(animals: Vec<Animal>, total_pages: u32) -> Self {
        Self {
            animals: Some(animals),
            pagination: Some(Pagination {
                total_pages: Some(total_pages),
                ..Pagination::default()
            }),
        }
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.pagination.as_ref().and_then(|p| p.total_pages)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnimalEnvelope {
    pub animal: Option<Animal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationEnvelope {
    pub organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Search parameters sent to `GET /animals` for one ZIP code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalQuery {
    pub location: String,
    pub distance: u32,
    pub age: String,
}

impl AnimalQuery {
    pub const PAGE_LIMIT: u32 = 100;

    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("type", "dog".to_string()),
            ("status", "adoptable".to_string()),
            ("location", self.location.clone()),
            ("distance", self.distance.to_string()),
            ("age", self.age.clone()),
            ("sort", "recent".to_string()),
            ("limit", Self::PAGE_LIMIT.to_string()),
            ("page", page.to_string()),
        ]
    }
}

/// Parses upstream ISO-8601 timestamps ("2025-09-18T04:25:04+0000",
/// "2025-09-18T04:25:04+00:00" or with a trailing Z).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
