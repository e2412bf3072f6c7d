// src/petfinder/token.rs
use crate::cache::{Clock, TtlCache};
use crate::petfinder::source::AnimalSource;
use crate::petfinder::PetfinderError;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Tokens are dropped this long before the upstream says they expire.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

const TOKEN_KEY: &str = "petfinder:token";

/// Holds the client-credentials bearer token. One request per issue, no retry.
pub struct TokenProvider {
    held: TtlCache<String>,
}

impl TokenProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            held: TtlCache::new(clock),
        }
    }

    pub fn bearer(&self, source: &dyn AnimalSource) -> Result<String, PetfinderError> {
        if let Some(token) = self.held.get(TOKEN_KEY) {
            return Ok(token);
        }

        let issued = source.access_token()?;
        let ttl = issued.expires_in.saturating_sub(EXPIRY_MARGIN);
        if !ttl.is_zero() {
            self.held.set(TOKEN_KEY, issued.token.clone(), ttl);
        }

        debug!("issued new upstream token (held for {}s)", ttl.as_secs());
        Ok(issued.token)
    }
}
