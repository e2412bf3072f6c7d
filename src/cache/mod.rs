pub mod clock;
pub mod rate_limit;
pub mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use rate_limit::RateLimiter;
pub use ttl::TtlCache;
