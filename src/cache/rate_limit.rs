// src/cache/rate_limit.rs
use crate::cache::clock::{sub_duration, Clock};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Sliding-window request counter keyed by caller identifier.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Records the request and returns true if fewer than `max_requests` were
    /// seen for `identifier` in the trailing window. Rejected requests are not
    /// recorded.
    pub fn allow(&self, identifier: &str) -> bool {
        let now = self.clock.now();
        let cutoff = sub_duration(now, self.window);
        let mut hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);

        // Sweep every identifier, not just this one.
        hits.retain(|_, times| {
            while times.front().is_some_and(|t| *t <= cutoff) {
                times.pop_front();
            }
            !times.is_empty()
        });

        let times = hits.entry(identifier.to_string()).or_default();
        if times.len() >= self.max_requests {
            return false;
        }

        times.push_back(now);
        true
    }

    /// Identifiers with at least one request still inside the window as of the
    /// last check.
    pub fn tracked(&self) -> usize {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
