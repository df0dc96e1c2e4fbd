//! Heading anchor ids.

use std::collections::HashSet;

/// Fallback id for headings whose text yields an empty slug.
const EMPTY_SLUG: &str = "section";

/// Convert heading text into a URL fragment.
///
/// Word characters are lowercased and kept, runs of whitespace and hyphens
/// become a single `-`, everything else is dropped.
///
/// # Examples
///
/// ```
/// use praxis_renderer::slugify;
///
/// assert_eq!(slugify("Notation & Conventions"), "notation-conventions");
/// assert_eq!(slugify("Appendix A: Proofs"), "appendix-a-proofs");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}

/// Ids already handed out within the current document.
#[derive(Debug, Default)]
pub struct AnchorIds {
    used: HashSet<String>,
}

impl AnchorIds {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id derived from `base`, suffixing `-1`, `-2`, … on collision.
    pub fn claim(&mut self, base: &str) -> String {
        let base = if base.is_empty() { EMPTY_SLUG } else { base };
        if self.used.insert(base.to_owned()) {
            return base.to_owned();
        }

        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Forget every id handed out so far.
    pub fn clear(&mut self) {
        self.used.clear();
    }

    /// Number of ids handed out since the last [`clear`](Self::clear).
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Whether no id has been handed out since the last [`clear`](Self::clear).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Section Title"), "section-title");
        assert_eq!(slugify("  Padded  "), "padded");
        assert_eq!(slugify("snake_case name"), "snake_case-name");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("What is PRAXIS?"), "what-is-praxis");
        assert_eq!(slugify("L = λW"), "l-λw");
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_claim_deduplicates() {
        let mut ids = AnchorIds::new();
        assert_eq!(ids.claim("faq"), "faq");
        assert_eq!(ids.claim("faq"), "faq-1");
        assert_eq!(ids.claim("faq"), "faq-2");
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_claim_skips_taken_suffix() {
        let mut ids = AnchorIds::new();
        assert_eq!(ids.claim("step-1"), "step-1");
        assert_eq!(ids.claim("step"), "step");
        assert_eq!(ids.claim("step"), "step-2");
    }

    #[test]
    fn test_claim_empty_base() {
        let mut ids = AnchorIds::new();
        assert_eq!(ids.claim(""), "section");
        assert_eq!(ids.claim(""), "section-1");
    }

    #[test]
    fn test_clear_resets() {
        let mut ids = AnchorIds::new();
        ids.claim("intro");
        ids.clear();
        assert!(ids.is_empty());
        assert_eq!(ids.claim("intro"), "intro");
    }
}
