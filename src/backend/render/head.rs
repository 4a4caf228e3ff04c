/**
 * Head Metadata
 *
 * Tags destined for the document `<head>`, grouped the way the front-end's
 * head manager groups them. The composer writes the groups in a fixed
 * order: title, priority, meta, link, script.
 */

use serde::{Deserialize, Serialize};

use crate::backend::render::html::escape_html;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadMetadata {
    pub title: String,
    /// Tags that must precede everything but the title (preloads)
    pub priority: String,
    pub meta: String,
    pub link: String,
    pub script: String,
}

impl HeadMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every group in composition order, one group per line
    pub fn to_html(&self) -> String {
        [&self.title, &self.priority, &self.meta, &self.link, &self.script]
            .into_iter()
            .filter(|fragment| !fragment.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = format!("<title>{}</title>", escape_html(title));
        self
    }

    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.push_str(&format!(
            r#"<meta name="{}" content="{}" />"#,
            escape_html(name),
            escape_html(content)
        ));
        self
    }

    /// Open Graph style `property` meta tag
    pub fn with_property(mut self, property: &str, content: &str) -> Self {
        self.meta.push_str(&format!(
            r#"<meta property="{}" content="{}" />"#,
            escape_html(property),
            escape_html(content)
        ));
        self
    }

    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.link.push_str(&format!(
            r#"<link rel="{}" href="{}" />"#,
            escape_html(rel),
            escape_html(href)
        ));
        self
    }

    pub fn with_image_preload(mut self, href: &str) -> Self {
        self.priority.push_str(&format!(
            r#"<link rel="preload" as="image" href="{}" />"#,
            escape_html(href)
        ));
        self
    }

    /// Append a JSON-LD block; `json` must already be safe for a script element
    pub fn with_json_ld(mut self, json: &str) -> Self {
        self.script.push_str(&format!(r#"<script type="application/ld+json">{json}</script>"#));
        self
    }

    pub fn noindex(self) -> Self {
        self.with_meta("robots", "noindex, nofollow")
    }
}
