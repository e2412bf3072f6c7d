// src/config.rs

//! Environment-driven settings for the server and the digest job.

use crate::domain::DEFAULT_EXCLUDED_BREEDS;
use figment::providers::{Env, Serialized};
use figment::value::{Dict, Value};
use figment::Figment;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ZIPS: &[&str] = &["08401", "11211", "19003"];
pub const DEFAULT_BASE_URL: &str = "https://api.petfinder.com/v2";

/// Every environment variable the service reads.
pub const ENV_KEYS: &[&str] = &[
    "PETFINDER_CLIENT_ID",
    "PETFINDER_CLIENT_SECRET",
    "PETFINDER_BASE_URL",
    "REQUEST_TIMEOUT_SECS",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_USER",
    "SMTP_PASS",
    "SENDER_EMAIL",
    "SENDER_NAME",
    "RECIPIENTS",
    "HOST",
    "PORT",
    "SERVER_MAX_WORKERS",
    "SEARCH_CACHE_TTL_SECS",
    "DETAIL_CACHE_TTL_SECS",
    "ORG_CACHE_TTL_SECS",
    "RATE_LIMIT_MAX_REQUESTS",
    "RATE_LIMIT_WINDOW_SECS",
    "ZIP_CODES",
    "DISTANCE_MILES",
    "EXCLUDED_BREEDS",
    "PAGE_DELAY_MS",
    "CUSTOM_DOMAIN",
    "CORS_ALLOWED_ORIGINS",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] figment::Error),

    #[error("Missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

#[derive(Debug, Clone)]
pub struct PetfinderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub sender_email: String,
    pub sender_name: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub max_workers: usize,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub search_ttl: Duration,
    pub detail_ttl: Duration,
    pub organization_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub max_requests: usize,
    pub window: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub petfinder: PetfinderSettings,
    pub smtp: SmtpSettings,
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub rate_limit: RateLimitSettings,
    pub zip_codes: Vec<String>,
    pub distance_miles: u32,
    pub excluded_breeds: Vec<String>,
    pub page_delay: Duration,
    pub custom_domain: Option<String>,
    pub extra_origins: Vec<String>,
}

/// Raw settings, one field per environment variable (lowercased).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct EnvSettings {
    #[serde(deserialize_with = "text")]
    petfinder_client_id: String,
    #[serde(deserialize_with = "text")]
    petfinder_client_secret: String,
    #[serde(deserialize_with = "text")]
    petfinder_base_url: String,
    request_timeout_secs: u64,
    #[serde(deserialize_with = "text")]
    smtp_host: String,
    smtp_port: u16,
    #[serde(deserialize_with = "text")]
    smtp_user: String,
    #[serde(deserialize_with = "text")]
    smtp_pass: String,
    #[serde(deserialize_with = "text")]
    sender_email: String,
    #[serde(deserialize_with = "text")]
    sender_name: String,
    #[serde(deserialize_with = "csv_list")]
    recipients: Vec<String>,
    host: IpAddr,
    port: u16,
    server_max_workers: usize,
    search_cache_ttl_secs: u64,
    detail_cache_ttl_secs: u64,
    org_cache_ttl_secs: u64,
    rate_limit_max_requests: usize,
    rate_limit_window_secs: u64,
    #[serde(deserialize_with = "csv_list")]
    zip_codes: Vec<String>,
    distance_miles: u32,
    #[serde(deserialize_with = "csv_list")]
    excluded_breeds: Vec<String>,
    page_delay_ms: u64,
    #[serde(deserialize_with = "text")]
    custom_domain: String,
    #[serde(deserialize_with = "csv_list")]
    cors_allowed_origins: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            petfinder_client_id: String::new(),
            petfinder_client_secret: String::new(),
            petfinder_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_pass: String::new(),
            sender_email: String::new(),
            sender_name: "Dog Digest".to_string(),
            recipients: Vec::new(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            server_max_workers: 8,
            search_cache_ttl_secs: 120,
            detail_cache_ttl_secs: 300,
            org_cache_ttl_secs: 3600,
            rate_limit_max_requests: 5,
            rate_limit_window_secs: 60,
            zip_codes: owned(DEFAULT_ZIPS),
            distance_miles: 100,
            excluded_breeds: owned(DEFAULT_EXCLUDED_BREEDS),
            page_delay_ms: 300,
            custom_domain: String::new(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Splits a comma-separated value, trimming and dropping blanks.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Env values arrive typed ("12345" is a number, "x" a char); string
/// settings take any scalar back as trimmed text.
struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or scalar")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.trim().to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        text(deserializer).map(Text)
    }
}

/// A comma-separated string, a lone scalar, or an array.
struct CsvVisitor;

impl<'de> Visitor<'de> for CsvVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a comma-separated list")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Vec<String>, E> {
        Ok(split_csv(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Vec<String>, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Vec<String>, E> {
        Ok(vec![v.to_string()])
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
        let mut items = Vec::new();
        while let Some(Text(item)) = seq.next_element()? {
            if !item.is_empty() {
                items.push(item);
            }
        }
        Ok(items)
    }
}

fn csv_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    deserializer.deserialize_any(CsvVisitor)
}

/// US ZIP codes are five digits. One that was read as a number has lost its
/// leading zeros.
fn pad_zip(zip: String) -> String {
    if zip.len() < 5 && zip.chars().all(|c| c.is_ascii_digit()) {
        format!("{zip:0>5}")
    } else {
        zip
    }
}

fn or_default(list: Vec<String>, default: &[&str]) -> Vec<String> {
    if list.is_empty() {
        owned(default)
    } else {
        list
    }
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(Figment::new().merge(Env::raw().only(ENV_KEYS)))
    }

    /// Reads settings through `lookup`, so tests can pass a map instead of
    /// touching the process environment. Values are typed the same way the
    /// environment provider types them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values: Dict = ENV_KEYS
            .iter()
            .filter_map(|key| {
                let raw = lookup(key)?;
                let value = raw.parse::<Value>().unwrap_or_else(|never| match never {});
                Some((key.to_lowercase(), value))
            })
            .collect();

        Self::from_figment(Figment::new().merge(Serialized::defaults(values)))
    }

    /// Defaults first, then whatever `overrides` provides.
    fn from_figment(overrides: Figment) -> Result<Self, ConfigError> {
        let env: EnvSettings = Figment::new()
            .merge(Serialized::defaults(EnvSettings::default()))
            .merge(overrides)
            .extract()?;

        let sender_email = if env.sender_email.is_empty() {
            env.smtp_user.clone()
        } else {
            env.sender_email
        };

        Ok(Self {
            petfinder: PetfinderSettings {
                client_id: env.petfinder_client_id,
                client_secret: env.petfinder_client_secret,
                base_url: env.petfinder_base_url,
                timeout: Duration::from_secs(env.request_timeout_secs),
            },
            smtp: SmtpSettings {
                host: env.smtp_host,
                port: env.smtp_port,
                user: env.smtp_user,
                pass: env.smtp_pass,
                sender_email,
                sender_name: env.sender_name,
                recipients: env.recipients,
            },
            server: ServerSettings {
                host: env.host,
                port: env.port,
                max_workers: env.server_max_workers,
            },
            cache: CacheSettings {
                search_ttl: Duration::from_secs(env.search_cache_ttl_secs),
                detail_ttl: Duration::from_secs(env.detail_cache_ttl_secs),
                organization_ttl: Duration::from_secs(env.org_cache_ttl_secs),
            },
            rate_limit: RateLimitSettings {
                max_requests: env.rate_limit_max_requests,
                window: Duration::from_secs(env.rate_limit_window_secs),
            },
            zip_codes: or_default(env.zip_codes, DEFAULT_ZIPS)
                .into_iter()
                .map(pad_zip)
                .collect(),
            distance_miles: env.distance_miles,
            excluded_breeds: or_default(env.excluded_breeds, DEFAULT_EXCLUDED_BREEDS),
            page_delay: Duration::from_millis(env.page_delay_ms),
            custom_domain: Some(env.custom_domain).filter(|d| !d.is_empty()),
            extra_origins: env.cors_allowed_origins,
        })
    }

    /// The digest job cannot run without upstream and SMTP credentials.
    pub fn require_digest_settings(&self) -> Result<(), ConfigError> {
        let required = [
            ("PETFINDER_CLIENT_ID", &self.petfinder.client_id),
            ("PETFINDER_CLIENT_SECRET", &self.petfinder.client_secret),
            ("SMTP_HOST", &self.smtp.host),
            ("SMTP_USER", &self.smtp.user),
            ("SMTP_PASS", &self.smtp.pass),
            ("SENDER_EMAIL", &self.smtp.sender_email),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(key, _)| *key)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}
