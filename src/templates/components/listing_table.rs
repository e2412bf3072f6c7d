// templates/components/listing_table.rs
use crate::petfinder::Animal;
use maud::{html, Markup};

pub const DESCRIPTION_BUDGET: usize = 600;

pub const COLUMNS: [&str; 11] = [
    "Name",
    "Size",
    "Breeds",
    "Age",
    "Gender",
    "Description",
    "Videos",
    "Contact Email",
    "Contact Phone",
    "Published At",
    "URL",
];

const TABLE_STYLE: &str = "border-collapse:collapse;font-family:Arial,Helvetica,sans-serif;font-size:14px;line-height:1.3; width:100%;";

/// Collapses whitespace and cuts to `DESCRIPTION_BUDGET` characters.
pub fn tidy_description(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(DESCRIPTION_BUDGET)
        .collect()
}

/// RFC 3339 in UTC when parseable, the raw upstream value otherwise.
fn published_label(animal: &Animal) -> String {
    match animal.published() {
        Some(at) => at.to_rfc3339(),
        None => animal.published_at.clone().unwrap_or_default(),
    }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

/// Digest table. The markup is self-contained (inline styles) so it can be
/// dropped into an email body as-is.
pub fn listing_table(animals: &[Animal]) -> Markup {
    html! {
        table border="1" cellpadding="6" cellspacing="0" style=(TABLE_STYLE) {
            thead style="background:#f5f5f5;" {
                tr {
                    @for column in COLUMNS {
                        th style="text-align:left;" { (column) }
                    }
                }
            }
            tbody {
                @if animals.is_empty() {
                    tr {
                        td colspan=(COLUMNS.len()) { "No matching dogs in the last 24 hours." }
                    }
                }
                @for animal in animals {
                    (listing_row(animal))
                }
            }
        }
    }
}

fn listing_row(animal: &Animal) -> Markup {
    let contact = animal.contact();
    let videos: Vec<&str> = animal.videos().iter().filter_map(|v| v.href()).collect();
    let url = text(&animal.url);

    html! {
        tr {
            td { (animal.name()) }
            td { (animal.size()) }
            td { (animal.breed_names().join(", ")) }
            td { (text(&animal.age)) }
            td { (text(&animal.gender)) }
            td { (tidy_description(text(&animal.description))) }
            td {
                @for (i, href) in videos.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(href) { "video" }
                }
            }
            td { (text(&contact.email)) }
            td { (text(&contact.phone)) }
            td { (published_label(animal)) }
            td {
                @if !url.is_empty() {
                    a href=(url) { "Link" }
                }
            }
        }
    }
}
