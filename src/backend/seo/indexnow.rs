/**
 * IndexNow Submission
 *
 * Notifies participating search engines that pages changed. URLs are sent
 * as absolute URLs on the site's origin together with the site's key; the
 * engines confirm ownership by fetching `{site}/{key}.txt`, which the
 * router serves from configuration.
 */

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

#[derive(Debug, Error)]
pub enum IndexNowError {
    #[error("No URLs provided")]
    NoUrls,

    #[error("IndexNow request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<IndexNowError> for BackendError {
    fn from(err: IndexNowError) -> Self {
        match err {
            IndexNowError::NoUrls => BackendError::bad_request(err.to_string()),
            IndexNowError::Transport(_) => {
                BackendError::handler(axum::http::StatusCode::BAD_GATEWAY, err.to_string())
            }
        }
    }
}

/// What triggered a submission; echoed back in the result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Vehicle,
    Page,
    #[default]
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub status: u16,
    pub message: String,
    pub urls: Vec<String>,
    #[serde(rename = "type")]
    pub kind: SubmissionKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: String,
    url_list: &'a [String],
}

#[derive(Clone)]
pub struct IndexNowClient {
    http: reqwest::Client,
    endpoint: String,
    key: String,
    site_url: String,
    host: String,
}

impl IndexNowClient {
    pub fn new(endpoint: &str, key: &str, site_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        let host = url::Url::parse(site_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| site_url.to_string());
        Self {
            http,
            endpoint: endpoint.to_string(),
            key: key.to_string(),
            site_url: site_url.trim_end_matches('/').to_string(),
            host,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.indexnow_endpoint, &config.indexnow_key, &config.site_url)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn key_location(&self) -> String {
        format!("{}/{}.txt", self.site_url, self.key)
    }

    /// Make relative URLs absolute on the site origin
    fn absolutize(&self, urls: &[String]) -> Vec<String> {
        urls.iter()
            .map(|url| {
                if url.starts_with("http") {
                    url.clone()
                } else if url.starts_with('/') {
                    format!("{}{url}", self.site_url)
                } else {
                    format!("{}/{url}", self.site_url)
                }
            })
            .collect()
    }

    pub async fn submit(
        &self,
        urls: &[String],
        kind: SubmissionKind,
    ) -> Result<SubmissionResult, IndexNowError> {
        if urls.is_empty() {
            return Err(IndexNowError::NoUrls);
        }
        let urls = self.absolutize(urls);
        tracing::info!("Submitting {} URLs to IndexNow: {:?}", urls.len(), urls);

        let payload = Payload {
            host: &self.host,
            key: &self.key,
            key_location: self.key_location(),
            url_list: &urls,
        };
        let response = self.http.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::info!("IndexNow response: {} {}", status, body);

        Ok(SubmissionResult {
            success: status.is_success(),
            status: status.as_u16(),
            message: format!("Submitted {} URLs to IndexNow", urls.len()),
            urls,
            kind,
        })
    }

    /// Submit without waiting; failures are only logged
    pub fn submit_in_background(&self, urls: Vec<String>, kind: SubmissionKind) {
        let client = self.clone();
        tokio::spawn(async move {
            match client.submit(&urls, kind).await {
                Ok(result) if result.success => {}
                Ok(result) => tracing::warn!("IndexNow rejected submission with {}", result.status),
                Err(e) => tracing::warn!("IndexNow submission failed: {}", e),
            }
        });
    }
}
