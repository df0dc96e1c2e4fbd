//! Markdown body renderer for the PRAXIS site builder.
//!
//! This crate turns the Markdown body of one document into an HTML fragment.
//! Page chrome (sidebar, navigation, template) is not its concern.
//!
//! # Architecture
//!
//! - [`BodyRenderer`]: the narrow contract the site builder depends on
//! - [`MarkdownRenderer`]: `pulldown-cmark` based implementation that assigns
//!   heading anchors and delegates fenced code to the [`Highlighter`]
//! - [`Highlighter`]: class-based `syntect` highlighting plus the matching stylesheet
//!
//! The renderer is stateful: heading anchors are deduplicated per document, so
//! callers must invoke [`BodyRenderer::begin_document`] before each new document.
//!
//! # Example
//!
//! ```
//! use praxis_renderer::{BodyRenderer, Highlighter, MarkdownRenderer};
//!
//! let highlighter = Highlighter::new("InspiredGitHub").unwrap();
//! let mut renderer = MarkdownRenderer::new(&highlighter);
//!
//! renderer.begin_document();
//! let html = renderer.render_body("## Usage\n\nSome **bold** text").unwrap();
//! assert!(html.contains(r#"<h2 id="usage">"#));
//! ```

mod anchors;
mod highlight;
mod markdown;
mod util;

pub use anchors::{AnchorIds, slugify};
pub use highlight::{CLASS_PREFIX, Highlighter};
pub use markdown::MarkdownRenderer;
pub use util::escape_html;

/// Error returned by body rendering and highlighting.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The configured theme is not bundled with syntect.
    #[error("Unknown highlight theme '{name}' (available: {available})")]
    UnknownTheme {
        /// Requested theme name.
        name: String,
        /// Comma-separated list of bundled theme names.
        available: String,
    },
    /// Syntect failed while generating HTML or CSS.
    #[error("Syntax highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
}

/// Converts a document body into an HTML fragment.
///
/// Implementations may keep per-document state (such as assigned heading ids).
/// That state must be discarded by [`begin_document`](Self::begin_document).
pub trait BodyRenderer {
    /// Start a new, independent document.
    fn begin_document(&mut self);

    /// Render Markdown text into an HTML fragment.
    fn render_body(&mut self, text: &str) -> Result<String, RenderError>;
}
