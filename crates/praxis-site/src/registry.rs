//! Document registry.
//!
//! The fixed, ordered list of specification chapters plus the two standalone
//! pages. Registry order is the canonical reading order: it drives the sidebar
//! and the previous/next traversal.

use std::ops::Range;

/// Extension of chapter sources.
pub const SOURCE_EXTENSION: &str = "md";

/// Extension of generated pages.
pub const OUTPUT_EXTENSION: &str = "html";

/// Number of sidebar groups.
pub const GROUP_COUNT: usize = 4;

/// Line in a standalone page body replaced by the list of written chapters.
pub const CONTENTS_MARKER: &str = "<!-- chapter-contents -->";

/// Sidebar group labels, indexed by [`ChapterEntry::group`].
pub const GROUP_LABELS: [&str; GROUP_COUNT] = [
    "Part I: Foundations",
    "Part II: Semantics",
    "Part III: Verification & Library",
    "Appendices",
];

/// One chapter of the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterEntry {
    /// File stem shared by the source and the generated page.
    pub source_id: &'static str,
    /// Human-readable chapter title.
    pub title: &'static str,
    /// Number shown in the sidebar and page title (`"4"`, `"A"`).
    pub display_number: &'static str,
    /// Index into [`GROUP_LABELS`].
    pub group: usize,
    /// One-line description for the overview's chapter list; may be empty.
    pub summary: &'static str,
}

impl ChapterEntry {
    #[must_use]
    pub const fn new(
        source_id: &'static str,
        title: &'static str,
        display_number: &'static str,
        group: usize,
    ) -> Self {
        Self {
            source_id,
            title,
            display_number,
            group,
            summary: "",
        }
    }

    #[must_use]
    pub const fn with_summary(self, summary: &'static str) -> Self {
        Self { summary, ..self }
    }

    /// Source file name, e.g. `04-type-system.md`.
    #[must_use]
    pub fn source_file(&self) -> String {
        format!("{}.{SOURCE_EXTENSION}", self.source_id)
    }

    /// Generated page name, e.g. `04-type-system.html`.
    #[must_use]
    pub fn output_file(&self) -> String {
        format!("{}.{OUTPUT_EXTENSION}", self.source_id)
    }

    /// Sidebar label, e.g. `4. Type System`.
    #[must_use]
    pub fn nav_label(&self) -> String {
        format!("{}. {}", self.display_number, self.title)
    }

    /// Page title, e.g. `Ch. 4: Type System`.
    #[must_use]
    pub fn page_title(&self) -> String {
        format!("Ch. {}: {}", self.display_number, self.title)
    }
}

/// A page whose Markdown body is compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandalonePage {
    pub page_id: &'static str,
    pub title: &'static str,
    pub nav_label: &'static str,
    pub body: &'static str,
}

impl StandalonePage {
    #[must_use]
    pub fn output_file(&self) -> String {
        format!("{}.{OUTPUT_EXTENSION}", self.page_id)
    }
}

/// Landing page.
pub const OVERVIEW: StandalonePage = StandalonePage {
    page_id: "index",
    title: "Home",
    nav_label: "Overview",
    body: include_str!("pages/overview.md"),
};

/// White paper page, linking the optional PDF.
pub const WHITE_PAPER: StandalonePage = StandalonePage {
    page_id: "whitepaper",
    title: "White Paper",
    nav_label: "White Paper",
    body: include_str!("pages/whitepaper.md"),
};

const PRAXIS_CHAPTERS: [ChapterEntry; 12] = [
    ChapterEntry::new("01-introduction", "Introduction", "1", 0)
        .with_summary("Motivation and design philosophy"),
    ChapterEntry::new("02-notation", "Notation & Conventions", "2", 0)
        .with_summary("Meta-variables and judgment forms"),
    ChapterEntry::new("03-abstract-syntax", "Abstract Syntax", "3", 0)
        .with_summary("Complete EBNF grammar"),
    ChapterEntry::new("04-type-system", "Type System", "4", 1)
        .with_summary("Kinds, types, subtyping, typing judgments"),
    ChapterEntry::new("05-operational-semantics", "Operational Semantics", "5", 1)
        .with_summary("LTS, structural congruence, reduction rules"),
    ChapterEntry::new("06-petri-net-semantics", "Petri Net Semantics", "6", 1)
        .with_summary("Translation to CGSPNs"),
    ChapterEntry::new("07-queueing-semantics", "Queueing Semantics", "7", 1)
        .with_summary("Network extraction and VUT equation"),
    ChapterEntry::new("08-well-formedness", "Well-Formedness", "8", 2)
        .with_summary("Eight well-formedness conditions"),
    ChapterEntry::new("09-standard-library", "Standard Library", "9", 2)
        .with_summary("Distributions, patterns, functions"),
    ChapterEntry::new("10-examples", "Examples", "10", 2)
        .with_summary("CI/CD pipeline, incident response, Kanban"),
    ChapterEntry::new("appendix-a-proofs", "Appendix A: Proofs", "A", 3)
        .with_summary("Proof sketches"),
    ChapterEntry::new("appendix-b-equivalences", "Appendix B: Equivalences", "B", 3)
        .with_summary("Equivalences and algebraic laws"),
];

/// Ordered chapters plus the standalone pages.
#[derive(Debug, Clone)]
pub struct Registry {
    chapters: Vec<ChapterEntry>,
    overview: StandalonePage,
    whitepaper: StandalonePage,
}

impl Registry {
    /// Build a registry from an arbitrary chapter table.
    ///
    /// Groups must be non-decreasing in chapter order so that every group
    /// occupies a contiguous slice of the sidebar.
    #[must_use]
    pub fn new(
        chapters: Vec<ChapterEntry>,
        overview: StandalonePage,
        whitepaper: StandalonePage,
    ) -> Self {
        debug_assert!(
            chapters.windows(2).all(|w| w[0].group <= w[1].group),
            "chapter groups must be non-decreasing"
        );
        debug_assert!(
            chapters.iter().all(|c| c.group < GROUP_COUNT),
            "chapter group out of range"
        );
        debug_assert!(
            chapters.iter().enumerate().all(|(i, c)| {
                chapters[..i]
                    .iter()
                    .all(|other| other.source_id != c.source_id)
            }),
            "chapter source ids must be unique"
        );
        Self {
            chapters,
            overview,
            whitepaper,
        }
    }

    /// The PRAXIS specification: twelve chapters in four groups.
    #[must_use]
    pub fn praxis() -> Self {
        Self::new(PRAXIS_CHAPTERS.to_vec(), OVERVIEW, WHITE_PAPER)
    }

    #[must_use]
    pub fn chapters(&self) -> &[ChapterEntry] {
        &self.chapters
    }

    #[must_use]
    pub fn chapter(&self, index: usize) -> Option<&ChapterEntry> {
        self.chapters.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    #[must_use]
    pub fn overview(&self) -> &StandalonePage {
        &self.overview
    }

    #[must_use]
    pub fn whitepaper(&self) -> &StandalonePage {
        &self.whitepaper
    }

    /// Registry index of the chapter with the given source id.
    #[must_use]
    pub fn position_of(&self, source_id: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.source_id == source_id)
    }

    /// Chapter index range of each group, in group order.
    ///
    /// The ranges are contiguous and together cover every chapter exactly
    /// once. A group without chapters yields an empty range.
    #[must_use]
    pub fn group_ranges(&self) -> [Range<usize>; GROUP_COUNT] {
        let len = self.chapters.len();
        std::array::from_fn(|group| {
            let start = self
                .chapters
                .iter()
                .position(|c| c.group >= group)
                .unwrap_or(len);
            let end = self
                .chapters
                .iter()
                .position(|c| c.group > group)
                .unwrap_or(len);
            start..end
        })
    }
}
