//! Render Module
//!
//! Server-side rendering pipeline: resolve the HTML shell, render the page
//! for the request URL, splice both together.
//!
//! # Module Structure
//!
//! ```text
//! render/
//! ├── mod.rs        - Module exports
//! ├── template.rs   - TemplateResolver (production cache, development re-read)
//! ├── renderer.rs   - PageRenderer trait, RenderedPage, RenderError
//! ├── head.rs       - HeadMetadata, the per-page head tags
//! ├── html.rs       - Escaping and number formatting for markup
//! ├── compose.rs    - Marker substitution
//! ├── remote.rs     - RemoteRenderer, delegates to a dev SSR endpoint
//! ├── pages/        - SiteRenderer, the native page set
//! └── handler.rs    - The SSR fallback handler
//! ```

pub mod template;
pub mod renderer;
pub mod head;
pub mod html;
pub mod compose;
pub mod remote;
pub mod pages;
pub mod handler;

pub use head::HeadMetadata;
pub use pages::SiteRenderer;
pub use remote::RemoteRenderer;
pub use renderer::{PageRenderer, RenderError, RenderedPage};
pub use template::{TemplateError, TemplateResolver};
