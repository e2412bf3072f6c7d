// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

/// Serialize `value` as a JSON response.
pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// `{"detail": "..."}` with the error's status.
pub fn json_error_response(err: ServerError) -> Response {
    let status = err.status();
    let detail = json!({ "detail": err.to_string() });

    json_response(status, &detail).unwrap_or_else(|_| {
        let mut resp = Response::new(Body::from("Internal Server Error"));
        *resp.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
        resp
    })
}
