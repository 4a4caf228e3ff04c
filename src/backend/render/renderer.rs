/**
 * Page Renderer Capability
 *
 * A renderer turns a request URL (path plus query string, base path already
 * removed) into the page markup and the head tags for that page. Everything
 * the page needs is returned by value; nothing is written through shared
 * state.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::db::StoreError;
use crate::backend::render::head::HeadMetadata;

/// Output of a single render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub html: String,
    #[serde(default)]
    pub head: HeadMetadata,
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// Catalog data could not be loaded
    #[error("Failed to load page data: {0}")]
    Store(#[from] StoreError),

    /// The remote renderer answered with an error; `body` carries its stack trace
    #[error("Remote renderer returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Remote renderer request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError>;
}
