//! Path sandboxing for the documents directory.
//!
//! Every path that crosses an API boundary is resolved through
//! [`PathGuard`] before it touches the filesystem or the index. The
//! guard is purely lexical: it never stats or canonicalizes, so checks
//! cannot race with concurrent filesystem changes.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("path is empty")]
    Empty,
    #[error("path escapes the document root: {0}")]
    Escape(String),
}

/// Confines candidate paths to a single root directory.
///
/// The root must be an absolute path; the daemon canonicalizes its
/// docs directory once at startup before constructing the guard.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a candidate path to an absolute path inside the root.
    ///
    /// Relative candidates are joined onto the root; absolute
    /// candidates are accepted only when they already sit under it.
    /// `.` and `..` segments are folded out before the containment
    /// check, so traversal sequences cannot slip past a string prefix.
    pub fn resolve(&self, candidate: &str) -> Result<PathBuf, SandboxError> {
        if candidate.trim().is_empty() {
            return Err(SandboxError::Empty);
        }

        let candidate_path = Path::new(candidate);
        let joined = if candidate_path.is_absolute() {
            candidate_path.to_path_buf()
        } else {
            self.root.join(candidate_path)
        };

        let resolved = lexical_normalize(&joined);
        if resolved == self.root || resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(SandboxError::Escape(candidate.to_string()))
        }
    }

    /// Whether a candidate path stays inside the root.
    pub fn is_safe(&self, candidate: &str) -> bool {
        self.resolve(candidate).is_ok()
    }

    /// Root-relative form of an absolute path, with `/` separators.
    ///
    /// Returns `None` for paths outside the root and for the root
    /// itself (an empty relative path is never a valid index key).
    pub fn relativize(&self, path: &Path) -> Option<String> {
        let resolved = lexical_normalize(path);
        let rel = resolved.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

/// Folds `.` and `..` segments out of a path without touching the
/// filesystem. Excess `..` segments stop at the filesystem root.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> PathGuard {
        PathGuard::new("/srv/docs")
    }

    #[test]
    fn test_plain_relative_paths_are_safe() {
        let guard = guard();
        assert!(guard.is_safe("notes.md"));
        assert!(guard.is_safe("guides/intro.md"));
        assert!(guard.is_safe("./notes.md"));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let guard = guard();
        assert!(!guard.is_safe("../notes.md"));
        assert!(!guard.is_safe("a/../../outside.md"));
        assert!(!guard.is_safe("../../etc/passwd"));
    }

    #[test]
    fn test_internal_parent_segments_are_folded() {
        let guard = guard();
        let resolved = guard.resolve("guides/../notes.md").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/docs/notes.md"));
    }

    #[test]
    fn test_absolute_paths_only_inside_root() {
        let guard = guard();
        assert!(guard.is_safe("/srv/docs/notes.md"));
        assert!(!guard.is_safe("/etc/passwd"));
        // sibling directory sharing a string prefix with the root
        assert!(!guard.is_safe("/srv/docs-backup/notes.md"));
    }

    #[test]
    fn test_empty_candidates_are_rejected() {
        let guard = guard();
        assert!(matches!(guard.resolve(""), Err(SandboxError::Empty)));
        assert!(matches!(guard.resolve("   "), Err(SandboxError::Empty)));
    }

    #[test]
    fn test_root_itself_resolves() {
        let guard = guard();
        assert_eq!(guard.resolve(".").unwrap(), PathBuf::from("/srv/docs"));
    }

    #[test]
    fn test_relativize_uses_forward_slashes() {
        let guard = guard();
        let rel = guard.relativize(Path::new("/srv/docs/guides/intro.md"));
        assert_eq!(rel.as_deref(), Some("guides/intro.md"));
    }

    #[test]
    fn test_relativize_outside_root_is_none() {
        let guard = guard();
        assert_eq!(guard.relativize(Path::new("/etc/passwd")), None);
        assert_eq!(guard.relativize(Path::new("/srv/docs")), None);
    }
}
