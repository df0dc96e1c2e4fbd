//! Static site generation for the PRAXIS specification.
//!
//! Turns the chapter sources of the specification into a flat directory of
//! HTML pages sharing one layout, a grouped sidebar and previous/next links.
//!
//! # Architecture
//!
//! - [`Registry`]: ordered chapter table plus the overview and white paper pages
//! - [`rewrite_links`]: points cross-chapter `.md` links at the generated pages
//! - [`Navigator`]: sidebar and previous/next links over the chapters present
//! - [`PageTemplate`]: the shared `minijinja` page layout
//! - [`SiteBuilder`]: drives one build and reports what it wrote or skipped
//!
//! Body rendering is delegated to [`praxis_renderer`].

mod builder;
mod links;
mod navigation;
mod registry;
mod template;

pub use builder::{
    BuildConfig, BuildError, BuildEvent, BuildReport, PAPER_OUTPUT, SiteBuilder, SkipReason,
};
pub use links::rewrite_links;
pub use navigation::{NavLinks, Navigator, PagePosition, SidebarItem};
pub use registry::{
    CONTENTS_MARKER, ChapterEntry, GROUP_COUNT, GROUP_LABELS, OUTPUT_EXTENSION, OVERVIEW,
    Registry, SOURCE_EXTENSION, StandalonePage, WHITE_PAPER,
};
pub use template::{PageData, PageTemplate, SiteInfo};
