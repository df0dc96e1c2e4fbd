//! HTML page template.
//!
//! Every page shares one layout: sidebar, body, optional previous/next block
//! and footer. The layout is a `minijinja` template compiled once per build;
//! the highlight stylesheet is embedded in each page's `<head>`.

use minijinja::Environment;
use serde::Serialize;

use crate::navigation::{NavLinks, SidebarItem};

const PAGE_TEMPLATE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

/// Site-wide strings shown in every page's chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Everything that differs between two pages.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageData<'a> {
    pub title: &'a str,
    pub page_id: &'a str,
    /// Rendered body, inserted without escaping.
    pub body_html: &'a str,
    pub nav: &'a NavLinks,
    pub sidebar: &'a [SidebarItem],
}

#[derive(Serialize)]
struct PageContext<'a> {
    site: &'a SiteInfo,
    stylesheet: &'a str,
    #[serde(flatten)]
    page: &'a PageData<'a>,
}

/// Compiled page layout plus the values shared by every page.
pub struct PageTemplate {
    env: Environment<'static>,
    site: SiteInfo,
    stylesheet: String,
}

impl PageTemplate {
    /// Compile the page layout.
    ///
    /// # Errors
    ///
    /// Returns a template error if the embedded layout fails to compile.
    pub fn new(site: &SiteInfo, stylesheet: String) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;

        Ok(Self {
            env,
            site: site.clone(),
            stylesheet,
        })
    }

    /// Render one complete HTML document.
    ///
    /// Title and sidebar labels are HTML-escaped. The body and the stylesheet
    /// are trusted and inserted verbatim.
    ///
    /// # Errors
    ///
    /// Returns a template error if rendering fails.
    pub fn render(&self, page: &PageData<'_>) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(PAGE_TEMPLATE_NAME)?;
        template.render(PageContext {
            site: &self.site,
            stylesheet: &self.stylesheet,
            page,
        })
    }
}
