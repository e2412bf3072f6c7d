// templates/pages/digest.rs

use crate::petfinder::Animal;
use crate::templates::{desktop_layout, listing_table};
use chrono::{DateTime, SecondsFormat, Utc};
use maud::{html, Markup};

pub const DIGEST_HEADING: &str = "Recently listed dogs (last 24 hours)";

/// What the root page says about the pass that produced it.
#[derive(Debug, Clone)]
pub struct DigestMeta<'a> {
    pub zip_codes: &'a [String],
    pub distance_miles: u32,
    pub generated_at: DateTime<Utc>,
}

pub fn digest_page(animals: &[Animal], meta: &DigestMeta) -> Markup {
    desktop_layout(
        DIGEST_HEADING,
        html! {
            h1 { (DIGEST_HEADING) }

            div class="meta" {
                "ZIPs: " (meta.zip_codes.join(", "))
                " • Radius: " (meta.distance_miles) " mi"
                " • Matches: " (animals.len())
                " • Generated: " (meta.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true))
            }

            (listing_table(animals))
        },
    )
}
