// errors.rs
use crate::petfinder::PetfinderError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad parameters, rate limiting) or the upstream API.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Rate limit exceeded. Please try again in a minute.")]
    RateLimited,

    #[error(transparent)]
    Upstream(#[from] PetfinderError),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::RateLimited => 429,
            ServerError::Upstream(_) | ServerError::InternalError => 500,
        }
    }

    /// Upstream failures on the search path are reported as a bad request
    /// carrying the upstream message.
    pub fn for_search(self) -> Self {
        match self {
            ServerError::Upstream(e) => ServerError::BadRequest(e.to_string()),
            other => other,
        }
    }

    /// Upstream failures on the detail path look like a missing dog.
    pub fn for_detail(self) -> Self {
        match self {
            ServerError::Upstream(_) => ServerError::NotFound("Dog not found".into()),
            other => other,
        }
    }
}
