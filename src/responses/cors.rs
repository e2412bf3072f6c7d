// responses/cors.rs
use crate::config::Config;
use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, VARY,
};
use http::{HeaderMap, HeaderValue};

const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "https://dogfinder-web.vercel.app",
    "https://www.dogfinder-web.vercel.app",
];

/// Which browser origins may read API responses.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<String>,
    allow_any: bool,
}

impl CorsPolicy {
    pub fn from_config(config: &Config) -> Self {
        let mut origins: Vec<String> = DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect();

        if let Some(domain) = &config.custom_domain {
            origins.push(format!("https://{domain}"));
            origins.push(format!("https://www.{domain}"));
        }

        let allow_any = config.extra_origins.iter().any(|o| o == "*");
        origins.extend(config.extra_origins.iter().filter(|o| *o != "*").cloned());

        Self { origins, allow_any }
    }

    /// Exact match against the list, or any https Vercel preview deployment.
    pub fn allows(&self, origin: &str) -> bool {
        if self.allow_any || self.origins.iter().any(|o| o == origin) {
            return true;
        }

        origin
            .strip_prefix("https://")
            .and_then(|host| host.strip_suffix(".vercel.app"))
            .is_some_and(|sub| !sub.is_empty() && !sub.contains('/'))
    }

    /// Adds CORS headers for an allowed `origin`; leaves the response alone otherwise.
    pub fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        let Some(origin) = origin.filter(|o| self.allows(o)) else {
            return;
        };
        let Ok(value) = HeaderValue::from_str(origin) else {
            return;
        };

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        );
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }
}
