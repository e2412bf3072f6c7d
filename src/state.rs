// src/state.rs
use crate::cache::{Clock, SystemClock};
use crate::config::Config;
use crate::petfinder::{AnimalSource, PetfinderClient, PetfinderError};
use crate::pipeline::SearchService;
use crate::responses::CorsPolicy;
use std::sync::Arc;

/// Everything a request handler needs, shared by all server workers.
pub struct AppState {
    pub config: Config,
    pub cors: CorsPolicy,
    pub search: SearchService,
}

impl AppState {
    /// Production wiring: the real upstream client and the system clock.
    pub fn new(config: Config) -> Result<Self, PetfinderError> {
        let client = PetfinderClient::new(&config.petfinder)?;
        Ok(Self::with_source(
            config,
            Box::new(client),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_source(config: Config, source: Box<dyn AnimalSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cors: CorsPolicy::from_config(&config),
            search: SearchService::new(&config, source, clock),
            config,
        }
    }
}
