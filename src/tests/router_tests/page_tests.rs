// src/tests/router_tests/page_tests.rs
use crate::router::respond;
use crate::tests::utils::{animal_json, dog, get, published_minutes_ago, read_body, test_app, FakeSource};
use scraper::{Html, Selector};
use serde_json::json;

fn select<'a>(doc: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    doc.select(&selector).collect()
}

fn text(el: &scraper::ElementRef) -> String {
    el.text().collect::<String>()
}

#[test]
fn root_page_renders_digest_table() {
    let mut detailed = animal_json(json!({
        "id": 9,
        "url": "https://www.petfinder.com/dog/9",
        "name": "<script>alert('x')</script>",
        "age": "Baby",
        "size": "Small",
        "gender": "Male",
        "description": "Loves\n\n  belly   rubs",
        "breeds": {"primary": "Beagle", "secondary": "Poodle"},
        "videos": [{"embed": "<iframe src=\"https://youtu.be/a\">", "url": "https://youtu.be/a"}, "https://vimeo.com/b"],
        "contact": {"email": "adopt@atlantic-paws.org", "phone": "555-0100"},
        "published_at": published_minutes_ago(90),
    }));
    detailed.distance = Some(3.2);

    let app = test_app(FakeSource::new().with_pages("08401", vec![vec![detailed, dog(2, "Pepper", 30)]]));

    let resp = respond(get("/"), &app.state);
    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(!body.contains("<script>alert"));

    let doc = Html::parse_document(&body);
    assert_eq!(text(&select(&doc, "h1")[0]), "Recently listed dogs (last 24 hours)");
    assert!(text(&select(&doc, ".meta")[0]).contains("08401"));
    assert_eq!(select(&doc, "thead th").len(), 11);

    let rows = select(&doc, "tbody tr");
    assert_eq!(rows.len(), 2);

    // Newest first: Pepper (30 min) before the detailed listing (90 min).
    let cells: Vec<String> = select(&doc, "tbody tr:nth-child(2) td")
        .iter()
        .map(text)
        .collect();
    assert_eq!(cells.len(), 11);
    assert_eq!(cells[0], "<script>alert('x')</script>");
    assert_eq!(cells[2], "Beagle, Poodle");
    assert_eq!(cells[5], "Loves belly rubs");
    assert_eq!(cells[6], "video, video");
    assert_eq!(cells[9], "2026-10-18T10:30:00+00:00");
    assert_eq!(cells[10], "Link");

    let hrefs: Vec<&str> = select(&doc, "tbody tr:nth-child(2) td a")
        .iter()
        .filter_map(|a| a.value().attr("href"))
        .collect();
    assert_eq!(
        hrefs,
        vec!["https://youtu.be/a", "https://vimeo.com/b", "https://www.petfinder.com/dog/9"]
    );
}

#[test]
fn empty_digest_shows_placeholder_row() {
    let app = test_app(FakeSource::new());

    let doc = Html::parse_document(&read_body(respond(get("/"), &app.state)));
    let cells = select(&doc, "tbody td");

    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].value().attr("colspan"), Some("11"));
    assert_eq!(text(&cells[0]), "No matching dogs in the last 24 hours.");
}

#[test]
fn upstream_failure_renders_html_error() {
    let app = test_app(FakeSource::new().failing_token());

    let resp = respond(get("/"), &app.state);
    assert_eq!(resp.status(), 500);
    assert!(read_body(resp).contains("Error 500"));
}

#[test]
fn unknown_page_is_html_404() {
    let app = test_app(FakeSource::new());

    let resp = respond(get("/nope"), &app.state);
    assert_eq!(resp.status(), 404);
    let body = read_body(resp);
    assert!(body.contains("Error 404"));
}
