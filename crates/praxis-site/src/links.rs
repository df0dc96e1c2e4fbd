//! Cross-chapter link rewriting.
//!
//! Chapters link to each other by source name (`[Types](04-type-system.md)`).
//! Before rendering, those targets are pointed at the generated pages.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `[text](NN-name.md)`.
static NUMBERED_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((\d{2}-[^)]+)\.md\)").expect("invalid numbered link regex")
});

/// `[text](appendix-name.md)`.
static APPENDIX_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((appendix-[^)]+)\.md\)").expect("invalid appendix link regex")
});

const REPLACEMENT: &str = "[$1]($2.html)";

/// Rewrite `.md` link targets of chapter files to `.html`.
///
/// Only Markdown links whose target starts directly with a two-digit chapter
/// prefix or `appendix-` are touched. Everything else, including absolute
/// URLs that happen to end in `.md`, is returned unchanged.
///
/// # Examples
///
/// ```
/// use praxis_site::rewrite_links;
///
/// assert_eq!(
///     rewrite_links("see [Types](04-type-system.md)"),
///     "see [Types](04-type-system.html)"
/// );
/// ```
pub fn rewrite_links(text: &str) -> Cow<'_, str> {
    let numbered = NUMBERED_LINK.replace_all(text, REPLACEMENT);
    if !APPENDIX_LINK.is_match(&numbered) {
        return numbered;
    }
    Cow::Owned(APPENDIX_LINK.replace_all(&numbered, REPLACEMENT).into_owned())
}
