pub mod cors;
pub mod html;
pub mod json;

pub use crate::errors::ResultResp;

pub use cors::CorsPolicy;
pub use html::{empty_response, html_response, text_response};
pub use json::{json_error_response, json_response};
