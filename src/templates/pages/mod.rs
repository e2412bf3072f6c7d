pub mod digest;

pub use digest::{digest_page, DigestMeta, DIGEST_HEADING};
