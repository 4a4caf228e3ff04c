/**
 * SSR Handler
 *
 * Fallback handler for every GET that no API, sitemap or static asset route
 * claimed. For each request it:
 * 1. Removes the configured base path from the URL
 * 2. Loads the HTML shell from the template resolver
 * 3. Renders the page for the remaining URL
 * 4. Splices markup and head tags into the shell
 *
 * # Failures
 *
 * A missing template or a failed render answers 500 with a plain-text
 * body: the error text when `expose_internal_errors` is set, otherwise
 * `Internal Server Error`. The failure is logged either way.
 */

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::render::compose::{compose, html_response};
use crate::backend::render::renderer::{PageRenderer, RenderError};
use crate::backend::render::template::{TemplateError, TemplateResolver};
use crate::backend::server::state::AppState;

#[derive(Debug, Error)]
pub enum SsrError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl SsrError {
    fn into_plain_response(self, expose: bool) -> Response {
        let body = if expose { self.to_string() } else { "Internal Server Error".to_string() };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// Remove `base` from the front of `url`, keeping a leading `/`
///
/// `base` is normalized to start and end with `/`. The bare base without
/// its trailing slash (`/shop`) also counts as the site root.
pub fn strip_base(url: &str, base: &str) -> String {
    let bare = base.trim_end_matches('/');
    let rest = match url.strip_prefix(base) {
        Some(rest) => rest,
        None => match url.strip_prefix(bare) {
            Some(rest) if rest.is_empty() || rest.starts_with('?') => rest,
            _ => url,
        },
    };
    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{rest}")
    }
}

/// Template, render, compose
pub async fn render_document(
    templates: &TemplateResolver,
    renderer: &dyn PageRenderer,
    url: &str,
) -> Result<String, SsrError> {
    let template = templates.template().await?;
    let page = renderer.render(url).await?;
    Ok(compose(&template, &page))
}

pub async fn ssr(State(state): State<AppState>, uri: Uri) -> Response {
    let raw = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let url = strip_base(raw, &state.config.base);

    match render_document(&state.templates, state.renderer.as_ref(), &url).await {
        Ok(document) => html_response(document),
        Err(e) => {
            tracing::error!("SSR failed for {}: {}", url, e);
            e.into_plain_response(state.config.expose_internal_errors)
        }
    }
}
