//! Sidebar and previous/next links.
//!
//! Navigation only knows about chapters that will actually be written: a
//! chapter whose source is missing is dropped from the traversal and from the
//! sidebar, and its neighbours link past it.

use std::fmt::Write;

use serde::Serialize;

use crate::registry::{ChapterEntry, GROUP_LABELS, Registry};

/// Which page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePosition {
    Overview,
    WhitePaper,
    /// Registry index of a chapter.
    Chapter(usize),
}

/// Previous/next page URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl NavLinks {
    /// Whether neither link is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// One sidebar line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarItem {
    GroupHeader {
        label: String,
    },
    Link {
        url: String,
        label: String,
        is_active: bool,
    },
}

impl SidebarItem {
    fn link(url: String, label: String, active_url: &str) -> Self {
        let is_active = url == active_url;
        Self::Link {
            url,
            label,
            is_active,
        }
    }
}

/// Computes navigation for every page of one build.
#[derive(Debug)]
pub struct Navigator<'r> {
    registry: &'r Registry,
    available: Vec<usize>,
}

impl<'r> Navigator<'r> {
    /// Create a navigator over the chapters listed in `available`.
    ///
    /// Indices outside the registry are ignored; order and duplicates in the
    /// input do not matter.
    #[must_use]
    pub fn new(registry: &'r Registry, available: &[usize]) -> Self {
        let mut available: Vec<usize> = available
            .iter()
            .copied()
            .filter(|&i| i < registry.len())
            .collect();
        available.sort_unstable();
        available.dedup();
        Self {
            registry,
            available,
        }
    }

    /// Navigator for a build where every chapter source exists.
    #[must_use]
    pub fn complete(registry: &'r Registry) -> Self {
        let all: Vec<usize> = (0..registry.len()).collect();
        Self::new(registry, &all)
    }

    /// Registry indices of the chapters that will be written.
    #[must_use]
    pub fn available(&self) -> &[usize] {
        &self.available
    }

    /// Output file of the page at `position`.
    #[must_use]
    pub fn page_url(&self, position: PagePosition) -> String {
        match position {
            PagePosition::Overview => self.registry.overview().output_file(),
            PagePosition::WhitePaper => self.registry.whitepaper().output_file(),
            PagePosition::Chapter(i) => self
                .registry
                .chapter(i)
                .map(|c| c.output_file())
                .unwrap_or_default(),
        }
    }

    fn chapter_url(&self, index: usize) -> Option<String> {
        self.registry.chapter(index).map(|c| c.output_file())
    }

    /// Previous/next links for the page at `position`.
    ///
    /// The overview leads into the first chapter, the white paper stands
    /// alone, and the first chapter leads back to the overview.
    #[must_use]
    pub fn nav_links(&self, position: PagePosition) -> NavLinks {
        match position {
            PagePosition::Overview => NavLinks {
                prev: None,
                next: self.available.first().and_then(|&i| self.chapter_url(i)),
            },
            PagePosition::WhitePaper => NavLinks::default(),
            PagePosition::Chapter(index) => {
                let prev = match self.available.iter().rev().find(|&&i| i < index) {
                    Some(&i) => self.chapter_url(i),
                    None => Some(self.registry.overview().output_file()),
                };
                let next = self
                    .available
                    .iter()
                    .find(|&&i| i > index)
                    .and_then(|&i| self.chapter_url(i));
                NavLinks { prev, next }
            }
        }
    }

    /// Sidebar entries for the page at `position`.
    ///
    /// The standalone pages come first, then one header per non-empty group
    /// followed by its chapters. The entry for the current page is active.
    #[must_use]
    pub fn sidebar(&self, position: PagePosition) -> Vec<SidebarItem> {
        let active_url = self.page_url(position);
        let overview = self.registry.overview();
        let whitepaper = self.registry.whitepaper();

        let mut items = vec![
            SidebarItem::link(
                overview.output_file(),
                overview.nav_label.to_owned(),
                &active_url,
            ),
            SidebarItem::link(
                whitepaper.output_file(),
                whitepaper.nav_label.to_owned(),
                &active_url,
            ),
        ];

        for (label, chapters) in self.groups() {
            items.push(SidebarItem::GroupHeader {
                label: label.to_owned(),
            });
            items.extend(
                chapters
                    .into_iter()
                    .map(|c| SidebarItem::link(c.output_file(), c.nav_label(), &active_url)),
            );
        }

        items
    }

    /// Markdown list of the available chapters under their group headings.
    ///
    /// Empty when no chapter is available.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut markdown = String::new();
        for (label, chapters) in self.groups() {
            let _ = writeln!(markdown, "### {label}\n");
            for chapter in chapters {
                let _ = write!(
                    markdown,
                    "- [{}]({})",
                    chapter.nav_label(),
                    chapter.output_file()
                );
                if !chapter.summary.is_empty() {
                    let _ = write!(markdown, " &mdash; {}", chapter.summary);
                }
                markdown.push('\n');
            }
            markdown.push('\n');
        }
        markdown
    }

    /// Available chapters per group, skipping groups with none.
    fn groups(&self) -> impl Iterator<Item = (&'static str, Vec<&ChapterEntry>)> + '_ {
        GROUP_LABELS
            .iter()
            .zip(self.registry.group_ranges())
            .filter_map(move |(label, range)| {
                let chapters: Vec<&ChapterEntry> = self
                    .available
                    .iter()
                    .filter(|&&i| range.contains(&i))
                    .filter_map(|&i| self.registry.chapter(i))
                    .collect();
                (!chapters.is_empty()).then_some((*label, chapters))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn links(prev: Option<&str>, next: Option<&str>) -> NavLinks {
        NavLinks {
            prev: prev.map(str::to_owned),
            next: next.map(str::to_owned),
        }
    }

    fn active_urls(items: &[SidebarItem]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|item| match item {
                SidebarItem::Link {
                    url,
                    is_active: true,
                    ..
                } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    fn link_urls(items: &[SidebarItem]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|item| match item {
                SidebarItem::Link { url, .. } => Some(url.as_str()),
                SidebarItem::GroupHeader { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_overview_links_to_first_chapter() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);
        assert_eq!(
            nav.nav_links(PagePosition::Overview),
            links(None, Some("01-introduction.html"))
        );
    }

    #[test]
    fn test_white_paper_has_no_links() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);
        assert!(nav.nav_links(PagePosition::WhitePaper).is_empty());
    }

    #[test]
    fn test_first_chapter_links_back_to_overview() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);
        assert_eq!(
            nav.nav_links(PagePosition::Chapter(0)),
            links(Some("index.html"), Some("02-notation.html"))
        );
    }

    #[test]
    fn test_last_chapter_has_no_next() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);
        assert_eq!(
            nav.nav_links(PagePosition::Chapter(11)),
            links(Some("appendix-a-proofs.html"), None)
        );
    }

    #[test]
    fn test_complete_traversal_follows_registry_order() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);
        let chapters = registry.chapters();

        for i in 1..chapters.len() - 1 {
            let expected = links(
                Some(&chapters[i - 1].output_file()),
                Some(&chapters[i + 1].output_file()),
            );
            assert_eq!(nav.nav_links(PagePosition::Chapter(i)), expected);
        }
    }

    #[test]
    fn test_missing_chapter_is_skipped_in_traversal() {
        let registry = Registry::praxis();
        let available: Vec<usize> = (0..registry.len()).filter(|&i| i != 4).collect();
        let nav = Navigator::new(&registry, &available);

        assert_eq!(
            nav.nav_links(PagePosition::Chapter(3)).next.as_deref(),
            Some("06-petri-net-semantics.html")
        );
        assert_eq!(
            nav.nav_links(PagePosition::Chapter(5)).prev.as_deref(),
            Some("04-type-system.html")
        );
        let sidebar = nav.sidebar(PagePosition::Chapter(3));
        assert!(!link_urls(&sidebar).contains(&"05-operational-semantics.html"));
    }

    #[test]
    fn test_missing_first_chapter() {
        let registry = Registry::praxis();
        let available: Vec<usize> = (1..registry.len()).collect();
        let nav = Navigator::new(&registry, &available);

        assert_eq!(
            nav.nav_links(PagePosition::Overview).next.as_deref(),
            Some("02-notation.html")
        );
        assert_eq!(
            nav.nav_links(PagePosition::Chapter(1)).prev.as_deref(),
            Some("index.html")
        );
    }

    #[test]
    fn test_no_chapters_available() {
        let registry = Registry::praxis();
        let nav = Navigator::new(&registry, &[]);

        assert!(nav.nav_links(PagePosition::Overview).is_empty());
        assert_eq!(
            nav.sidebar(PagePosition::Overview),
            vec![
                SidebarItem::Link {
                    url: "index.html".to_owned(),
                    label: "Overview".to_owned(),
                    is_active: true,
                },
                SidebarItem::Link {
                    url: "whitepaper.html".to_owned(),
                    label: "White Paper".to_owned(),
                    is_active: false,
                },
            ]
        );
    }

    #[test]
    fn test_available_is_normalised() {
        let registry = Registry::praxis();
        let nav = Navigator::new(&registry, &[5, 2, 2, 99, 0]);
        assert_eq!(nav.available(), &[0, 2, 5]);
    }

    #[test]
    fn test_sidebar_layout() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);
        let sidebar = nav.sidebar(PagePosition::Overview);

        // 2 standalone links, 4 headers, 12 chapters
        assert_eq!(sidebar.len(), 18);
        assert_eq!(
            sidebar[2],
            SidebarItem::GroupHeader {
                label: "Part I: Foundations".to_owned()
            }
        );
        assert_eq!(
            sidebar[3],
            SidebarItem::Link {
                url: "01-introduction.html".to_owned(),
                label: "1. Introduction".to_owned(),
                is_active: false,
            }
        );
        assert_eq!(
            sidebar[15],
            SidebarItem::GroupHeader {
                label: "Appendices".to_owned()
            }
        );
    }

    #[test]
    fn test_empty_group_is_omitted() {
        let registry = Registry::praxis();
        let available: Vec<usize> = (0..registry.len()).filter(|i| !(7..10).contains(i)).collect();
        let nav = Navigator::new(&registry, &available);

        let headers: Vec<_> = nav
            .sidebar(PagePosition::Overview)
            .into_iter()
            .filter_map(|item| match item {
                SidebarItem::GroupHeader { label } => Some(label),
                SidebarItem::Link { .. } => None,
            })
            .collect();
        assert_eq!(
            headers,
            ["Part I: Foundations", "Part II: Semantics", "Appendices"]
        );
    }

    #[test]
    fn test_exactly_one_active_link() {
        let registry = Registry::praxis();
        let nav = Navigator::complete(&registry);

        let mut positions = vec![PagePosition::Overview, PagePosition::WhitePaper];
        positions.extend((0..registry.len()).map(PagePosition::Chapter));

        for position in positions {
            let sidebar = nav.sidebar(position);
            assert_eq!(active_urls(&sidebar), [nav.page_url(position).as_str()]);
        }
    }

    #[test]
    fn test_contents_lists_available_chapters() {
        let registry = Registry::praxis();
        let available: Vec<usize> = vec![0, 10];
        let nav = Navigator::new(&registry, &available);

        assert_eq!(
            nav.contents(),
            "### Part I: Foundations\n\n\
             - [1. Introduction](01-introduction.html) &mdash; Motivation and design philosophy\n\n\
             ### Appendices\n\n\
             - [A. Appendix A: Proofs](appendix-a-proofs.html) &mdash; Proof sketches\n\n"
        );
    }

    #[test]
    fn test_contents_empty_without_chapters() {
        let registry = Registry::praxis();
        assert_eq!(Navigator::new(&registry, &[]).contents(), "");
    }

    #[test]
    fn test_sidebar_item_serialization() {
        let header = serde_json::to_value(SidebarItem::GroupHeader {
            label: "Appendices".to_owned(),
        })
        .unwrap();
        assert_eq!(header["kind"], "group_header");

        let link = serde_json::to_value(SidebarItem::Link {
            url: "index.html".to_owned(),
            label: "Overview".to_owned(),
            is_active: true,
        })
        .unwrap();
        assert_eq!(link["kind"], "link");
        assert_eq!(link["is_active"], true);
    }
}
