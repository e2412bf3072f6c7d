// src/domain/listing.rs

use crate::petfinder::models::{Contact, Video};
use crate::petfinder::{parse_timestamp, Animal};
use chrono::{DateTime, Utc};

const FINGERPRINT_SEPARATOR: &str = "|||";

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

fn normalized(field: &Option<String>) -> String {
    text(field).trim().to_lowercase()
}

impl Animal {
    pub fn name(&self) -> &str {
        text(&self.name)
    }

    pub fn size(&self) -> &str {
        text(&self.size)
    }

    pub fn primary_breed(&self) -> &str {
        self.breeds
            .as_ref()
            .and_then(|b| b.primary.as_deref())
            .unwrap_or("")
    }

    pub fn secondary_breed(&self) -> &str {
        self.breeds
            .as_ref()
            .and_then(|b| b.secondary.as_deref())
            .unwrap_or("")
    }

    /// Non-blank primary and secondary breed names, trimmed.
    pub fn breed_names(&self) -> Vec<&str> {
        [self.primary_breed(), self.secondary_breed()]
            .into_iter()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect()
    }

    /// Lowercased breed names joined with a space; what breed filters match against.
    pub fn breed_text(&self) -> String {
        self.breed_names().join(" ").to_lowercase()
    }

    pub fn contact(&self) -> Contact {
        self.contact.clone().unwrap_or_default()
    }

    pub fn videos(&self) -> &[Video] {
        self.videos.as_deref().unwrap_or(&[])
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }

    /// Unparseable or missing timestamps count as the oldest possible.
    pub fn published_or_epoch(&self) -> DateTime<Utc> {
        self.published().unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn published_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.published().is_some_and(|at| at >= cutoff)
    }

    /// Dedup key for the same dog re-posted under a different id.
    pub fn fingerprint(&self) -> String {
        let breeds = self.breeds.clone().unwrap_or_default();
        [
            normalized(&self.name),
            normalized(&breeds.primary),
            normalized(&breeds.secondary),
            normalized(&self.age),
            normalized(&self.size),
            normalized(&self.gender),
        ]
        .join(FINGERPRINT_SEPARATOR)
    }
}
