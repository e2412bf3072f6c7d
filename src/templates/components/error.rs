use crate::errors::ServerError;
use crate::templates::desktop_layout;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, Markup};

/// Convert a ServerError into an HTML error page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let page = error_page(status, &err.to_string()).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

fn error_page(status: u16, message: &str) -> Markup {
    let title = format!("Error {status}");

    desktop_layout(
        &title,
        html! {
            h1 { (title) }
            p { (message) }
            p { a href="/" { "← Back to the digest" } }
        },
    )
}
