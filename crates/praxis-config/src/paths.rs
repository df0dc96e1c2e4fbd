//! Path comparison helpers.

use std::path::{Component, Path, PathBuf};

/// Absolute, lexically clean form of `path`.
///
/// Relative paths are anchored at the current directory, `.` and `..`
/// components are folded, and the deepest existing ancestor is canonicalized
/// so symlinked prefixes compare equal to their targets. The path itself does
/// not need to exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_owned());
                existing = parent;
            }
            _ => return lexical,
        }
    }
}

/// Whether `path` is `dir` itself or lies somewhere below it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use praxis_config::is_within;
///
/// assert!(is_within(Path::new("/site/spec/"), Path::new("/site/./")));
/// assert!(!is_within(Path::new("/site/spec"), Path::new("/site/_site")));
/// ```
pub fn is_within(path: &Path, dir: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            normalize_path(Path::new("/nonexistent/a/./b/../c/")),
            PathBuf::from("/nonexistent/a/c")
        );
    }

    #[test]
    fn test_normalize_relative_is_absolute() {
        assert!(normalize_path(Path::new("spec")).is_absolute());
    }

    #[test]
    fn test_normalize_resolves_existing_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        assert_eq!(
            normalize_path(&dir.path().join("missing/../out")),
            canonical.join("out")
        );
    }

    #[test]
    fn test_is_within() {
        assert!(is_within(Path::new("/p/spec"), Path::new("/p/spec")));
        assert!(is_within(Path::new("/p/spec/01.md"), Path::new("/p")));
        assert!(is_within(Path::new("/p/spec"), Path::new("/p/_site/..")));
        assert!(!is_within(Path::new("/p/spec"), Path::new("/p/spec-out")));
        assert!(!is_within(Path::new("/p"), Path::new("/p/_site")));
    }
}
