//! Static site builder.
//!
//! Produces the complete site in one pass: the two standalone pages, the
//! optional white paper PDF, then every chapter in registry order. Missing
//! chapter sources and a missing PDF are reported and skipped; everything
//! else that goes wrong aborts the build.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use praxis_config::is_within;
use praxis_renderer::{BodyRenderer, Highlighter, MarkdownRenderer, RenderError};

use crate::links::rewrite_links;
use crate::navigation::{Navigator, PagePosition};
use crate::registry::{CONTENTS_MARKER, Registry, StandalonePage};
use crate::template::{PageData, PageTemplate, SiteInfo};

/// Output name of the copied white paper.
pub const PAPER_OUTPUT: &str = "whitepaper.pdf";

/// Configuration for one site build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding `{source_id}.md` chapter files.
    pub source_dir: PathBuf,
    /// Optional PDF copied next to the white paper page.
    pub paper_pdf: PathBuf,
    /// Directory that is wiped and regenerated.
    pub output_dir: PathBuf,
    pub site: SiteInfo,
    /// Bundled syntect theme for code highlighting.
    pub theme: String,
}

/// Why an artifact was not produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Chapter source file does not exist.
    SourceNotFound,
    /// Optional asset does not exist.
    AssetNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound | Self::AssetNotFound => f.write_str("not found"),
        }
    }
}

/// Something the build did, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// An HTML page was written.
    Written { name: String },
    /// An asset was copied into the output directory.
    Copied { name: String },
    /// An artifact was left out.
    Skipped { name: String, reason: SkipReason },
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub events: Vec<BuildEvent>,
    /// Number of HTML pages written.
    pub pages_written: usize,
}

impl BuildReport {
    /// Names of the artifacts that were skipped.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            BuildEvent::Skipped { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Report under construction plus the caller's event callback.
struct Progress<'o> {
    report: BuildReport,
    on_event: &'o mut dyn FnMut(&BuildEvent),
}

impl Progress<'_> {
    /// Log an event, hand it to the callback and keep it for the report.
    fn record(&mut self, event: BuildEvent) {
        match &event {
            BuildEvent::Written { name } => {
                self.report.pages_written += 1;
                tracing::info!(page = %name, "Wrote page");
            }
            BuildEvent::Copied { name } => tracing::info!(asset = %name, "Copied asset"),
            BuildEvent::Skipped { name, reason } => {
                tracing::warn!(file = %name, %reason, "Skipped");
            }
        }
        (self.on_event)(&event);
        self.report.events.push(event);
    }
}

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The output directory would swallow an input on cleanup.
    #[error(
        "Refusing to use {} as output directory: it contains {}",
        .path.display(),
        .input.display()
    )]
    UnsafeOutputDir { path: PathBuf, input: PathBuf },
    /// The output directory could not be removed or recreated.
    #[error("Cannot prepare output directory {}: {source}", .path.display())]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Cannot set up highlighter: {0}")]
    Highlighter(#[source] RenderError),
    #[error("Failed to render {page}: {source}")]
    Render { page: String, source: RenderError },
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Builds the static site for a registry.
pub struct SiteBuilder<'r> {
    registry: &'r Registry,
    config: BuildConfig,
}

/// Values shared by every page of one build.
struct PageContext<'a> {
    template: &'a PageTemplate,
    navigator: &'a Navigator<'a>,
}

impl<'r> SiteBuilder<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry, config: BuildConfig) -> Self {
        Self { registry, config }
    }

    /// Build the site from scratch.
    ///
    /// # Errors
    ///
    /// See [`build_with_progress`](Self::build_with_progress).
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        self.build_with_progress(&mut |_| {})
    }

    /// Build the site from scratch, calling `on_event` as each page is
    /// written, copied or skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsafeOutputDir`] without touching the disk if
    /// the output directory contains the sources or the PDF, and
    /// [`BuildError::OutputDir`] if it cannot be recreated. I/O, highlighting
    /// and template failures are returned as they occur; events already
    /// reported stay reported. Missing chapter sources are not errors.
    pub fn build_with_progress(
        &self,
        on_event: &mut dyn FnMut(&BuildEvent),
    ) -> Result<BuildReport, BuildError> {
        let output_dir = &self.config.output_dir;
        tracing::info!(output_dir = %output_dir.display(), "Building site");

        self.check_output_dir()?;
        prepare_output_dir(output_dir)?;

        let highlighter = Highlighter::new(&self.config.theme).map_err(BuildError::Highlighter)?;
        let stylesheet = highlighter
            .stylesheet()
            .map_err(BuildError::Highlighter)?;
        let template = PageTemplate::new(&self.config.site, stylesheet)?;
        let mut renderer = MarkdownRenderer::new(&highlighter);

        let available = self.available_chapters();
        let navigator = Navigator::new(self.registry, &available);
        let ctx = PageContext {
            template: &template,
            navigator: &navigator,
        };
        let mut progress = Progress {
            report: BuildReport {
                output_dir: output_dir.clone(),
                events: Vec::new(),
                pages_written: 0,
            },
            on_event,
        };

        self.write_standalone(
            &ctx,
            &mut renderer,
            self.registry.overview(),
            PagePosition::Overview,
            &mut progress,
        )?;
        self.write_standalone(
            &ctx,
            &mut renderer,
            self.registry.whitepaper(),
            PagePosition::WhitePaper,
            &mut progress,
        )?;
        self.copy_paper(&mut progress)?;

        for (index, chapter) in self.registry.chapters().iter().enumerate() {
            let source_file = chapter.source_file();
            if !available.contains(&index) {
                progress.record(BuildEvent::Skipped {
                    name: source_file,
                    reason: SkipReason::SourceNotFound,
                });
                continue;
            }

            let source_path = self.config.source_dir.join(&source_file);
            let text = fs::read_to_string(&source_path).map_err(|source| BuildError::Io {
                path: source_path.clone(),
                source,
            })?;
            let text = rewrite_links(&text);

            let html = render_page(
                &ctx,
                &mut renderer,
                PagePosition::Chapter(index),
                &chapter.page_title(),
                chapter.source_id,
                &text,
            )?;
            self.write_output(&chapter.output_file(), &html, &mut progress)?;
        }

        let report = progress.report;
        tracing::info!(pages = report.pages_written, "Site built");
        Ok(report)
    }

    /// Reject an output directory that would take inputs down with it.
    fn check_output_dir(&self) -> Result<(), BuildError> {
        let output_dir = &self.config.output_dir;
        for input in [&self.config.source_dir, &self.config.paper_pdf] {
            if is_within(input, output_dir) {
                return Err(BuildError::UnsafeOutputDir {
                    path: output_dir.clone(),
                    input: input.clone(),
                });
            }
        }
        Ok(())
    }

    /// Registry indices of chapters whose source file exists.
    fn available_chapters(&self) -> Vec<usize> {
        self.registry
            .chapters()
            .iter()
            .enumerate()
            .filter(|(_, chapter)| self.config.source_dir.join(chapter.source_file()).is_file())
            .map(|(index, _)| index)
            .collect()
    }

    fn write_standalone(
        &self,
        ctx: &PageContext<'_>,
        renderer: &mut dyn BodyRenderer,
        page: &StandalonePage,
        position: PagePosition,
        progress: &mut Progress<'_>,
    ) -> Result<(), BuildError> {
        let body = expand_contents(page.body, ctx.navigator);
        let html = render_page(ctx, renderer, position, page.title, page.page_id, &body)?;
        self.write_output(&page.output_file(), &html, progress)
    }

    fn copy_paper(&self, progress: &mut Progress<'_>) -> Result<(), BuildError> {
        let source = &self.config.paper_pdf;
        if !source.is_file() {
            progress.record(BuildEvent::Skipped {
                name: PAPER_OUTPUT.to_owned(),
                reason: SkipReason::AssetNotFound,
            });
            return Ok(());
        }

        let target = self.config.output_dir.join(PAPER_OUTPUT);
        fs::copy(source, &target).map_err(|source| BuildError::Io {
            path: target.clone(),
            source,
        })?;
        progress.record(BuildEvent::Copied {
            name: PAPER_OUTPUT.to_owned(),
        });
        Ok(())
    }

    fn write_output(
        &self,
        name: &str,
        html: &str,
        progress: &mut Progress<'_>,
    ) -> Result<(), BuildError> {
        let path = self.config.output_dir.join(name);
        fs::write(&path, html).map_err(|source| BuildError::Io { path, source })?;
        progress.record(BuildEvent::Written {
            name: name.to_owned(),
        });
        Ok(())
    }
}

/// Replace the contents marker of a standalone page with the chapter list.
fn expand_contents<'a>(body: &'a str, navigator: &Navigator<'_>) -> Cow<'a, str> {
    if body.contains(CONTENTS_MARKER) {
        Cow::Owned(body.replace(CONTENTS_MARKER, &navigator.contents()))
    } else {
        Cow::Borrowed(body)
    }
}

/// Remove the output directory if present, then create it empty.
fn prepare_output_dir(dir: &Path) -> Result<(), BuildError> {
    let fail = |source| BuildError::OutputDir {
        path: dir.to_path_buf(),
        source,
    };

    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(fail(e)),
    }
    fs::create_dir_all(dir).map_err(fail)
}

/// Render one document into a complete HTML page.
fn render_page(
    ctx: &PageContext<'_>,
    renderer: &mut dyn BodyRenderer,
    position: PagePosition,
    title: &str,
    page_id: &str,
    text: &str,
) -> Result<String, BuildError> {
    renderer.begin_document();
    let body_html = renderer
        .render_body(text)
        .map_err(|source| BuildError::Render {
            page: page_id.to_owned(),
            source,
        })?;

    let nav = ctx.navigator.nav_links(position);
    let sidebar = ctx.navigator.sidebar(position);
    Ok(ctx.template.render(&PageData {
        title,
        page_id,
        body_html: &body_html,
        nav: &nav,
        sidebar: &sidebar,
    })?)
}
