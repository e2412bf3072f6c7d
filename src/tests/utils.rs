// src/tests/utils.rs
use crate::cache::{Clock, ManualClock};
use crate::config::Config;
use crate::petfinder::{
    AccessToken, Animal, AnimalQuery, AnimalSource, AnimalsPage, Organization, PetfinderError,
};
use crate::state::AppState;
use astra::{Body, Request, Response};
use chrono::{DateTime, TimeZone, Utc};
use http::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// "Now" for every test: 2026-10-18T12:00:00Z.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(test_now()))
}

pub fn animal_json(value: Value) -> Animal {
    serde_json::from_value(value).unwrap_or_else(|e| panic!("bad animal fixture: {e}"))
}

/// Upstream timestamp format, `minutes` before `test_now()`.
pub fn published_minutes_ago(minutes: i64) -> String {
    (test_now() - chrono::Duration::minutes(minutes))
        .format("%Y-%m-%dT%H:%M:%S+0000")
        .to_string()
}

/// A plausible listing published `minutes` ago.
pub fn dog(id: u64, name: &str, minutes: i64) -> Animal {
    animal_json(json!({
        "id": id,
        "organization_id": "NJ33",
        "url": format!("https://www.petfinder.com/dog/{id}"),
        "name": name,
        "age": "Young",
        "size": "Medium",
        "gender": "Female",
        "description": format!("{name} is a sweet pup."),
        "breeds": {"primary": "Labrador Retriever", "secondary": null},
        "contact": {"email": "adopt@atlantic-paws.org", "phone": "555-0100"},
        "published_at": published_minutes_ago(minutes),
    }))
}

/// Canned upstream. Pages are keyed by ZIP code; page `n` of a ZIP is the
/// `n`-th entry of its list.
pub struct FakeSource {
    token_lifetime: Duration,
    fail_token: bool,
    pages: HashMap<String, Vec<Vec<Animal>>>,
    failing_zips: Vec<String>,
    animals: HashMap<String, Animal>,
    fail_animals: bool,
    organizations: HashMap<String, Organization>,
    fail_organizations: bool,

    token_requests: AtomicUsize,
    search_requests: Mutex<Vec<(String, u32)>>,
    animal_requests: AtomicUsize,
    organization_requests: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            token_lifetime: Duration::from_secs(3600),
            fail_token: false,
            pages: HashMap::new(),
            failing_zips: Vec::new(),
            animals: HashMap::new(),
            fail_animals: false,
            organizations: HashMap::new(),
            fail_organizations: false,
            token_requests: AtomicUsize::new(0),
            search_requests: Mutex::new(Vec::new()),
            animal_requests: AtomicUsize::new(0),
            organization_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn failing_token(mut self) -> Self {
        self.fail_token = true;
        self
    }

    pub fn with_pages(mut self, zip: &str, pages: Vec<Vec<Animal>>) -> Self {
        self.pages.insert(zip.to_string(), pages);
        self
    }

    pub fn failing_zip(mut self, zip: &str) -> Self {
        self.failing_zips.push(zip.to_string());
        self
    }

    pub fn with_animal(mut self, animal: Animal) -> Self {
        let id = animal.id.map(|id| id.to_string()).unwrap_or_default();
        self.animals.insert(id, animal);
        self
    }

    pub fn failing_animals(mut self) -> Self {
        self.fail_animals = true;
        self
    }

    pub fn with_organization(mut self, id: &str, name: &str, email: Option<&str>) -> Self {
        self.organizations.insert(
            id.to_string(),
            Organization {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                email: email.map(str::to_string),
                phone: None,
            },
        );
        self
    }

    pub fn failing_organizations(mut self) -> Self {
        self.fail_organizations = true;
        self
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    /// `(zip, page)` for every search call, in order.
    pub fn search_requests(&self) -> Vec<(String, u32)> {
        self.search_requests.lock().unwrap().clone()
    }

    pub fn animal_requests(&self) -> usize {
        self.animal_requests.load(Ordering::SeqCst)
    }

    pub fn organization_requests(&self) -> usize {
        self.organization_requests.load(Ordering::SeqCst)
    }
}

impl AnimalSource for FakeSource {
    fn access_token(&self) -> Result<AccessToken, PetfinderError> {
        self.token_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_token {
            return Err(PetfinderError::Status {
                endpoint: "oauth2/token",
                status: 401,
            });
        }
        Ok(AccessToken {
            token: format!("token-{}", self.token_requests()),
            expires_in: self.token_lifetime,
        })
    }

    fn search_animals(
        &self,
        _token: &str,
        query: &AnimalQuery,
        page: u32,
    ) -> Result<AnimalsPage, PetfinderError> {
        self.search_requests
            .lock()
            .unwrap()
            .push((query.location.clone(), page));

        if self.failing_zips.contains(&query.location) {
            return Err(PetfinderError::Status {
                endpoint: "animals",
                status: 503,
            });
        }

        let pages = self.pages.get(&query.location).cloned().unwrap_or_default();
        let total = pages.len() as u32;
        let animals = pages
            .into_iter()
            .nth(page as usize - 1)
            .unwrap_or_default();
        Ok(AnimalsPage::new(animals, total))
    }

    fn animal(&self, _token: &str, id: &str) -> Result<Option<Animal>, PetfinderError> {
        self.animal_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_animals {
            return Err(PetfinderError::Status {
                endpoint: "animals",
                status: 500,
            });
        }
        Ok(self.animals.get(id).cloned())
    }

    fn organization(&self, _token: &str, id: &str) -> Result<Option<Organization>, PetfinderError> {
        self.organization_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_organizations {
            return Err(PetfinderError::network("organizations", "connection reset"));
        }
        Ok(self.organizations.get(id).cloned())
    }
}

/// Lets a test keep a handle on the fake after the service takes ownership.
impl AnimalSource for Arc<FakeSource> {
    fn access_token(&self) -> Result<AccessToken, PetfinderError> {
        self.as_ref().access_token()
    }

    fn search_animals(
        &self,
        token: &str,
        query: &AnimalQuery,
        page: u32,
    ) -> Result<AnimalsPage, PetfinderError> {
        self.as_ref().search_animals(token, query, page)
    }

    fn animal(&self, token: &str, id: &str) -> Result<Option<Animal>, PetfinderError> {
        self.as_ref().animal(token, id)
    }

    fn organization(&self, token: &str, id: &str) -> Result<Option<Organization>, PetfinderError> {
        self.as_ref().organization(token, id)
    }
}

/// Config from the given pairs on top of test defaults (single ZIP, no page
/// delay).
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::from([
        ("ZIP_CODES".to_string(), "08401".to_string()),
        ("PAGE_DELAY_MS".to_string(), "0".to_string()),
    ]);
    for (k, v) in pairs {
        map.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| map.get(key).cloned()).unwrap()
}

pub struct TestApp {
    pub state: AppState,
    pub source: Arc<FakeSource>,
    pub clock: Arc<ManualClock>,
}

pub fn test_app(source: FakeSource) -> TestApp {
    test_app_with(source, &[])
}

pub fn test_app_with(source: FakeSource, pairs: &[(&str, &str)]) -> TestApp {
    let source = Arc::new(source);
    let clock = fixed_clock();
    let dyn_clock: Arc<dyn Clock> = clock.clone();

    let state = AppState::with_source(test_config(pairs), Box::new(source.clone()), dyn_clock);
    TestApp {
        state,
        source,
        clock,
    }
}

pub fn request(method: Method, uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn get(uri: &str) -> Request {
    request(Method::GET, uri)
}

pub fn get_with(uri: &str, headers: &[(&'static str, &str)]) -> Request {
    let mut req = get(uri);
    for (name, value) in headers {
        req.headers_mut().insert(*name, value.parse().unwrap());
    }
    req
}

pub fn read_body(mut resp: Response) -> String {
    let mut body = String::new();
    resp.body_mut().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn read_json(resp: Response) -> Value {
    serde_json::from_str(&read_body(resp)).unwrap()
}
