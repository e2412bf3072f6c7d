// client.rs
use crate::config::PetfinderSettings;
use crate::petfinder::models::{
    Animal, AnimalEnvelope, AnimalQuery, AnimalsPage, Organization, OrganizationEnvelope,
    TokenResponse,
};
use crate::petfinder::source::{AccessToken, AnimalSource};
use crate::petfinder::PetfinderError;
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("dogfinder/", env!("CARGO_PKG_VERSION"));

/// Organization lookups are per listing, so they get a tighter budget.
const ORGANIZATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Tokens without a stated lifetime are treated as short-lived.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

pub struct PetfinderClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl PetfinderClient {
    pub fn new(settings: &PetfinderSettings) -> Result<Self, PetfinderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| PetfinderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fails on any non-2xx, then decodes the body.
    fn read_json<T: DeserializeOwned>(
        endpoint: &'static str,
        resp: Response,
    ) -> Result<T, PetfinderError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(PetfinderError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        resp.json::<T>()
            .map_err(|e| PetfinderError::decode(endpoint, e))
    }
}

impl AnimalSource for PetfinderClient {
    fn access_token(&self) -> Result<AccessToken, PetfinderError> {
        const ENDPOINT: &str = "oauth2/token";

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let resp = self
            .client
            .post(self.url(ENDPOINT))
            .form(&form)
            .send()
            .map_err(|e| PetfinderError::network(ENDPOINT, e))?;

        let body: TokenResponse = Self::read_json(ENDPOINT, resp)?;
        Ok(AccessToken {
            token: body.access_token,
            expires_in: body
                .expires_in
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TOKEN_LIFETIME),
        })
    }

    fn search_animals(
        &self,
        token: &str,
        query: &AnimalQuery,
        page: u32,
    ) -> Result<AnimalsPage, PetfinderError> {
        const ENDPOINT: &str = "animals";

        debug!("GET animals location={} page={page}", query.location);

        let resp = self
            .client
            .get(self.url(ENDPOINT))
            .bearer_auth(token)
            .query(&query.params(page))
            .send()
            .map_err(|e| PetfinderError::network(ENDPOINT, e))?;

        Self::read_json(ENDPOINT, resp)
    }

    fn animal(&self, token: &str, id: &str) -> Result<Option<Animal>, PetfinderError> {
        const ENDPOINT: &str = "animals/{id}";

        let resp = self
            .client
            .get(self.url(&format!("animals/{id}")))
            .bearer_auth(token)
            .send()
            .map_err(|e| PetfinderError::network(ENDPOINT, e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: AnimalEnvelope = Self::read_json(ENDPOINT, resp)?;
        Ok(body.animal)
    }

    fn organization(&self, token: &str, id: &str) -> Result<Option<Organization>, PetfinderError> {
        const ENDPOINT: &str = "organizations/{id}";

        let resp = self
            .client
            .get(self.url(&format!("organizations/{id}")))
            .bearer_auth(token)
            .timeout(ORGANIZATION_TIMEOUT)
            .send()
            .map_err(|e| PetfinderError::network(ENDPOINT, e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: OrganizationEnvelope = Self::read_json(ENDPOINT, resp)?;
        Ok(body.organization)
    }
}
