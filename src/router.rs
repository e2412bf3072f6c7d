use crate::errors::ServerError;
use crate::pipeline::SearchRequest;
use crate::responses::{
    empty_response, html_response, json_error_response, json_response, text_response, ResultResp,
};
use crate::state::AppState;
use crate::templates::{self, DigestMeta};
use astra::{Request, Response};
use http::header::ORIGIN;
use http::HeaderMap;
use log::info;
use std::collections::HashMap;
use std::time::Instant;

const ANONYMOUS: &str = "anonymous";

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/healthz") => text_response("ok"),

        ("OPTIONS", "/api/dogs") => empty_response(),

        ("GET", "/api/dogs") => search(&req, state).map_err(ServerError::for_search),

        ("GET", "/") => digest(state),

        ("GET", _) if path.starts_with("/api/dogs/") => {
            let id = &path["/api/dogs/".len()..];
            dog(id, state).map_err(ServerError::for_detail)
        }

        _ => Err(ServerError::NotFound("Not Found".into())),
    }
}

/// Runs `handle`, renders errors (JSON under `/api/`, HTML elsewhere) and
/// adds CORS headers for allowed origins.
pub fn respond(req: Request, state: &AppState) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let origin = header(req.headers(), ORIGIN.as_str()).map(str::to_string);

    let mut resp = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) if path.starts_with("/api/") => json_error_response(err),
        Err(err) => templates::html_error_response(err),
    };

    state.cors.apply(origin.as_deref(), resp.headers_mut());

    info!(
        "{method} {path} -> {} ({} ms)",
        resp.status().as_u16(),
        started.elapsed().as_millis()
    );
    resp
}

fn search(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let request = SearchRequest::from_params(
        |name| params.get(name).map(String::as_str),
        state.search.default_zips(),
    )?;

    let page = state.search.search(&client_id(req.headers()), &request)?;
    json_response(200, &page)
}

fn dog(id: &str, state: &AppState) -> ResultResp {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ServerError::NotFound("Dog not found".into()));
    }

    let animal = state.search.animal(id)?;
    json_response(200, &animal)
}

fn digest(state: &AppState) -> ResultResp {
    let animals = state.search.digest()?;
    let meta = DigestMeta {
        zip_codes: &state.config.zip_codes,
        distance_miles: state.config.distance_miles,
        generated_at: state.search.now(),
    };

    html_response(templates::digest_page(&animals, &meta))
}

fn header<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Who the rate limiter counts a request against: the first forwarded
/// address, then the proxy's real-ip header.
pub fn client_id(headers: &HeaderMap) -> String {
    header(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header(headers, "x-real-ip"))
        .unwrap_or(ANONYMOUS)
        .to_string()
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
