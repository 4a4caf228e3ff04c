//! Splices a rendered page into the HTML shell

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::backend::render::renderer::RenderedPage;

pub const APP_HTML_MARKER: &str = "<!--app-html-->";
pub const HEAD_MARKER: &str = "<!--helmet-meta-->";

/// Replace the first occurrence of each marker
///
/// A marker missing from the template drops that section silently.
pub fn compose(template: &str, page: &RenderedPage) -> String {
    template
        .replacen(APP_HTML_MARKER, &page.html, 1)
        .replacen(HEAD_MARKER, &page.head.to_html(), 1)
}

pub fn html_response(document: String) -> Response {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], document).into_response()
}
