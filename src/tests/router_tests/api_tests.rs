// src/tests/router_tests/api_tests.rs
use crate::router::{handle, respond};
use crate::tests::utils::{
    dog, get, get_with, read_body, read_json, request, test_app, FakeSource,
};
use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, VARY};
use http::Method;
use std::time::Duration;

fn one_dog_source() -> FakeSource {
    FakeSource::new().with_pages("08401", vec![vec![dog(1, "Biscuit", 10), dog(2, "Pepper", 20)]])
}

#[test]
fn healthz_is_plain_ok() {
    let app = test_app(FakeSource::new());

    let resp = handle(get("/healthz"), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    assert_eq!(read_body(resp), "ok");
}

#[test]
fn allowed_origin_is_echoed() {
    let app = test_app(FakeSource::new());

    let resp = respond(
        get_with("/healthz", &[("origin", "http://localhost:3000")]),
        &app.state,
    );
    assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(resp.headers()[VARY], "Origin");
}

#[test]
fn unknown_origin_gets_no_cors_headers() {
    let app = test_app(FakeSource::new());

    let resp = respond(
        get_with("/healthz", &[("origin", "https://evil.example")]),
        &app.state,
    );
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[test]
fn preflight_is_answered() {
    let app = test_app_custom_domain();

    let mut req = request(Method::OPTIONS, "/api/dogs");
    req.headers_mut()
        .insert("origin", "https://www.dogyenta.com".parse().unwrap());

    let resp = respond(req, &app.state);
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://www.dogyenta.com");
    assert_eq!(
        resp.headers()["access-control-allow-methods"],
        "GET, OPTIONS"
    );
}

fn test_app_custom_domain() -> crate::tests::utils::TestApp {
    crate::tests::utils::test_app_with(FakeSource::new(), &[("CUSTOM_DOMAIN", "dogyenta.com")])
}

#[test]
fn search_returns_a_page_object() {
    let app = test_app(one_dog_source());

    let resp = respond(get("/api/dogs?zip=08401&limit=1"), &app.state);
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));

    let body = read_json(resp);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "Biscuit");
    assert_eq!(body["items"][0]["organization"]["email"], "adopt@atlantic-paws.org");
}

#[test]
fn search_without_zip_uses_configured_ones() {
    let app = test_app(one_dog_source());

    let resp = respond(get("/api/dogs"), &app.state);
    assert_eq!(resp.status(), 200);
    assert_eq!(app.source.search_requests()[0].0, "08401");
}

#[test]
fn encoded_guidance_is_decoded() {
    let mut small = dog(1, "Pip", 5);
    small.size = Some("Small".into());
    let app = test_app(FakeSource::new().with_pages("08401", vec![vec![small, dog(2, "Lab", 6)]]));

    let body = read_json(respond(get("/api/dogs?guidance=a%20small+dog"), &app.state));
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["size"], "Small");
}

#[test]
fn bad_parameters_are_400() {
    let app = test_app(one_dog_source());

    for uri in [
        "/api/dogs?radius=999",
        "/api/dogs?radius=ten",
        "/api/dogs?limit=0",
        "/api/dogs?page=0",
        "/api/dogs?sort=random",
    ] {
        let resp = respond(get_with(uri, &[("x-real-ip", uri)]), &app.state);
        assert_eq!(resp.status(), 400, "{uri}");
        assert!(read_json(resp)["detail"].is_string(), "{uri}");
    }
    assert!(app.source.search_requests().is_empty());
}

#[test]
fn upstream_failure_is_400_with_message() {
    let app = test_app(FakeSource::new().failing_zip("08401"));

    let resp = respond(get("/api/dogs"), &app.state);
    assert_eq!(resp.status(), 400);
    assert_eq!(read_json(resp)["detail"], "animals returned HTTP 503");
}

#[test]
fn sixth_call_is_429_until_window_passes() {
    let app = test_app(one_dog_source());
    let call = || {
        respond(
            get_with("/api/dogs", &[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]),
            &app.state,
        )
    };

    for _ in 0..5 {
        assert_eq!(call().status(), 200);
    }

    let limited = call();
    assert_eq!(limited.status(), 429);
    assert_eq!(
        read_json(limited)["detail"],
        "Rate limit exceeded. Please try again in a minute."
    );

    app.clock.advance(Duration::from_secs(60));
    assert_eq!(call().status(), 200);
}

#[test]
fn detail_returns_upstream_animal() {
    let app = test_app(FakeSource::new().with_animal(dog(42, "Biscuit", 10)));

    let resp = respond(get("/api/dogs/42"), &app.state);
    assert_eq!(resp.status(), 200);

    let body = read_json(resp);
    assert_eq!(body["id"], 42);
    assert_eq!(body["breeds"]["primary"], "Labrador Retriever");
}

#[test]
fn missing_dog_is_404() {
    let app = test_app(FakeSource::new());

    let resp = respond(get("/api/dogs/7"), &app.state);
    assert_eq!(resp.status(), 404);
    assert_eq!(read_json(resp)["detail"], "Dog not found");
}

#[test]
fn detail_upstream_failure_looks_like_404() {
    let app = test_app(FakeSource::new().failing_animals());

    let resp = respond(get("/api/dogs/7"), &app.state);
    assert_eq!(resp.status(), 404);
    assert_eq!(read_json(resp)["detail"], "Dog not found");
}

#[test]
fn malformed_id_never_reaches_upstream() {
    let app = test_app(FakeSource::new());

    let resp = respond(get("/api/dogs/..%2Fsecrets"), &app.state);
    assert_eq!(resp.status(), 404);
    assert_eq!(app.source.animal_requests(), 0);
}

#[test]
fn unknown_api_route_is_json_404() {
    let app = test_app(FakeSource::new());

    let resp = respond(get("/api/cats"), &app.state);
    assert_eq!(resp.status(), 404);
    assert_eq!(read_json(resp)["detail"], "Not Found");
}
