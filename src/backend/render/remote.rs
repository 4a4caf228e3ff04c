/**
 * Remote Renderer
 *
 * Development-mode renderer that delegates to the front-end's dev SSR
 * endpoint. The endpoint receives `{"url": ...}` and answers with
 * `{"html": ..., "head": {...}}`. Error responses already carry a
 * source-mapped stack trace, which is passed through verbatim.
 *
 * Requests carry no client timeout; a slow dev render is waited for.
 */

use async_trait::async_trait;
use serde::Serialize;

use crate::backend::render::renderer::{PageRenderer, RenderError, RenderedPage};

#[derive(Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
}

pub struct RemoteRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteRenderer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self { client, endpoint: endpoint.into() }
    }
}

#[async_trait]
impl PageRenderer for RemoteRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        tracing::debug!(url, endpoint = %self.endpoint, "Delegating render");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RenderRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::Remote { status: status.as_u16(), body });
        }
        Ok(response.json::<RenderedPage>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_decodes_html_and_head() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/render"))
            .and(body_json(serde_json::json!({ "url": "/inventory?make=Honda" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "html": "<main>dev</main>",
                "head": { "title": "<title>Dev</title>", "meta": "<meta name=\"x\" content=\"y\" />" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let renderer = RemoteRenderer::new(format!("{}/render", server.uri()));
        let page = renderer.render("/inventory?make=Honda").await.unwrap();
        assert_eq!(page.html, "<main>dev</main>");
        assert_eq!(page.head.title, "<title>Dev</title>");
        assert!(page.head.script.is_empty());
    }

    #[tokio::test]
    async fn test_slow_render_is_awaited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_millis(1500))
                    .set_body_json(serde_json::json!({ "html": "<main>slow</main>", "head": {} })),
            )
            .mount(&server)
            .await;

        let page = RemoteRenderer::new(server.uri()).render("/").await.unwrap();
        assert_eq!(page.html, "<main>slow</main>");
    }

    #[tokio::test]
    async fn test_error_status_carries_stack_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("TypeError: x is undefined\n    at Inventory.tsx:42:7"))
            .mount(&server)
            .await;

        let renderer = RemoteRenderer::new(server.uri());
        match renderer.render("/").await {
            Err(RenderError::Remote { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("Inventory.tsx:42:7"));
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }
}
