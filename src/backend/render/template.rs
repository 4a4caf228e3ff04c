/**
 * Template Resolution
 *
 * The HTML shell every page is spliced into comes from the front-end build.
 * Where it lives depends on how the site was deployed, so production probes
 * a fixed list of locations under the root directory and keeps the first
 * one found for the lifetime of the process. Development reads the source
 * template on every request so edits show up without a restart.
 *
 * # Caching
 *
 * The production cache is a `tokio::sync::OnceCell` filled by
 * `get_or_try_init`: a successful read is stored forever, a failed one is
 * not stored, so every request retries the probe until a template appears.
 */

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::backend::server::config::{RunMode, ServerConfig};

/// Template produced for deployments with a serverless entry point
pub const PRIMARY_TEMPLATE: &str = "api/index.template.html";

/// Probed in order when the primary template is absent
pub const FALLBACK_TEMPLATES: [&str; 3] = [
    "dist/client/src/index.html",
    "dist/client/index.html",
    "index.template.html",
];

/// Source template read per request in development
pub const DEVELOPMENT_TEMPLATE: &str = "src/index.html";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found. Checked: {}", display_paths(.checked))]
    NotFound { checked: Vec<PathBuf> },

    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

enum Strategy {
    PerRequest,
    Cached(OnceCell<Arc<str>>),
}

/// Loads the HTML shell for the configured run mode
pub struct TemplateResolver {
    root: PathBuf,
    strategy: Strategy,
}

impl TemplateResolver {
    /// Probe [`PRIMARY_TEMPLATE`] then [`FALLBACK_TEMPLATES`], caching the result
    pub fn production(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), strategy: Strategy::Cached(OnceCell::new()) }
    }

    /// Read [`DEVELOPMENT_TEMPLATE`] on every call
    pub fn development(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), strategy: Strategy::PerRequest }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        match config.mode {
            RunMode::Production => Self::production(&config.root_dir),
            RunMode::Development => Self::development(&config.root_dir),
        }
    }

    /// Paths consulted, in order
    pub fn candidates(&self) -> Vec<PathBuf> {
        match self.strategy {
            Strategy::PerRequest => vec![self.root.join(DEVELOPMENT_TEMPLATE)],
            Strategy::Cached(_) => std::iter::once(PRIMARY_TEMPLATE)
                .chain(FALLBACK_TEMPLATES)
                .map(|relative| self.root.join(relative))
                .collect(),
        }
    }

    pub async fn template(&self) -> Result<Arc<str>, TemplateError> {
        match &self.strategy {
            Strategy::PerRequest => self.probe().await,
            Strategy::Cached(cell) => cell.get_or_try_init(|| self.probe()).await.cloned(),
        }
    }

    async fn probe(&self) -> Result<Arc<str>, TemplateError> {
        let candidates = self.candidates();
        for (index, path) in candidates.iter().enumerate() {
            match read(path).await? {
                Some(template) => {
                    if index == 0 {
                        tracing::debug!("Using template: {}", path.display());
                    } else {
                        tracing::warn!("Falling back to template: {}", path.display());
                    }
                    return Ok(template);
                }
                None if index == 0 && matches!(self.strategy, Strategy::Cached(_)) => {
                    tracing::warn!("Primary template not found at {}", path.display());
                }
                None => {}
            }
        }
        Err(TemplateError::NotFound { checked: candidates })
    }
}

/// `Ok(None)` when the file does not exist
async fn read(path: &Path) -> Result<Option<Arc<str>>, TemplateError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(Arc::from(contents))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(TemplateError::Read { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_primary_template_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), PRIMARY_TEMPLATE, "primary");
        for fallback in FALLBACK_TEMPLATES {
            write(dir.path(), fallback, fallback);
        }
        let resolver = TemplateResolver::production(dir.path());
        assert_eq!(&*resolver.template().await.unwrap(), "primary");
    }

    #[tokio::test]
    async fn test_fallbacks_in_declared_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.template.html", "last");
        write(dir.path(), "dist/client/index.html", "second");
        let resolver = TemplateResolver::production(dir.path());
        assert_eq!(&*resolver.template().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_missing_template_lists_every_candidate() {
        let dir = TempDir::new().unwrap();
        let resolver = TemplateResolver::production(dir.path());
        match resolver.template().await {
            Err(TemplateError::NotFound { checked }) => {
                assert_eq!(checked.len(), 4);
                assert!(checked[0].ends_with(PRIMARY_TEMPLATE));
                assert!(checked[3].ends_with("index.template.html"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_production_caches_success_but_not_failure() {
        let dir = TempDir::new().unwrap();
        let resolver = TemplateResolver::production(dir.path());
        assert!(resolver.template().await.is_err());

        write(dir.path(), "index.template.html", "v1");
        assert_eq!(&*resolver.template().await.unwrap(), "v1");

        write(dir.path(), "index.template.html", "v2");
        assert_eq!(&*resolver.template().await.unwrap(), "v1");
    }

    #[tokio::test]
    async fn test_development_rereads_every_call() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), PRIMARY_TEMPLATE, "ignored in development");
        write(dir.path(), DEVELOPMENT_TEMPLATE, "v1");
        let resolver = TemplateResolver::development(dir.path());
        assert_eq!(&*resolver.template().await.unwrap(), "v1");
        write(dir.path(), DEVELOPMENT_TEMPLATE, "v2");
        assert_eq!(&*resolver.template().await.unwrap(), "v2");
    }
}
