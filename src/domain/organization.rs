// src/domain/organization.rs

use crate::cache::{Clock, TtlCache};
use crate::petfinder::models::Contact;
use crate::petfinder::{Animal, AnimalSource, Organization, OrganizationInfo};
use log::warn;
use std::sync::Arc;
use std::time::Duration;

pub const UNKNOWN_SHELTER: &str = "Unknown Shelter";

/// Looks up shelter details for listings, caching successful lookups by id.
pub struct OrganizationResolver {
    cache: TtlCache<Organization>,
    ttl: Duration,
}

impl OrganizationResolver {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(clock),
            ttl,
        }
    }

    /// Never fails: a missing or broken lookup falls back to what the
    /// listing's own contact block says.
    pub fn resolve(&self, source: &dyn AnimalSource, token: &str, animal: &Animal) -> OrganizationInfo {
        let contact = animal.contact();

        let org_id = animal
            .organization_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        match org_id.and_then(|id| self.lookup(source, token, id)) {
            Some(org) => from_organization(&org, &contact),
            None => derive_from_contact(&contact),
        }
    }

    fn lookup(&self, source: &dyn AnimalSource, token: &str, org_id: &str) -> Option<Organization> {
        let key = format!("org:{org_id}");
        if let Some(org) = self.cache.get(&key) {
            return Some(org);
        }

        match source.organization(token, org_id) {
            Ok(Some(org)) => {
                self.cache.set(key, org.clone(), self.ttl);
                Some(org)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("organization {org_id} lookup failed, deriving name from contact: {e}");
                None
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn from_organization(org: &Organization, contact: &Contact) -> OrganizationInfo {
    OrganizationInfo {
        name: org.name.clone().unwrap_or_else(|| UNKNOWN_SHELTER.to_string()),
        email: org
            .email
            .clone()
            .or_else(|| contact.email.clone())
            .unwrap_or_default(),
        phone: org
            .phone
            .clone()
            .or_else(|| contact.phone.clone())
            .unwrap_or_default(),
    }
}

/// "info@happy-tails.org" -> "Happy Tails". Only the part between the first
/// and second `@` counts as the domain.
pub fn name_from_email(email: &str) -> Option<String> {
    let domain = email.split('@').nth(1)?;
    let stripped = domain
        .replace(".org", "")
        .replace(".com", "")
        .replace(".net", "");

    let name = stripped
        .replace(['.', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    (!name.is_empty()).then_some(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Fallback shelter info built from the listing itself.
pub fn derive_from_contact(contact: &Contact) -> OrganizationInfo {
    let address = contact.address.clone().unwrap_or_default();
    let email = non_empty(&contact.email).filter(|e| e.contains('@'));

    let location = match (non_empty(&address.city), non_empty(&address.state)) {
        (Some(city), Some(state)) => Some(format!("Shelter in {city}, {state}")),
        _ => None,
    };

    let name = email
        .and_then(name_from_email)
        .or(location)
        .unwrap_or_else(|| UNKNOWN_SHELTER.to_string());

    OrganizationInfo {
        name,
        email: contact.email.clone().unwrap_or_default(),
        phone: contact.phone.clone().unwrap_or_default(),
    }
}
