use thiserror::Error;

#[derive(Debug, Error)]
pub enum PetfinderError {
    #[error("Network error calling {endpoint}: {message}")]
    Network {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Unexpected response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl PetfinderError {
    pub fn network(endpoint: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            endpoint,
            message: err.to_string(),
        }
    }

    pub fn decode(endpoint: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint,
            message: err.to_string(),
        }
    }
}
