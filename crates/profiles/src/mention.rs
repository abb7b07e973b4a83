//! Optional `@mention` expansion seam.
//!
//! The engine never interprets mention syntax itself. When an expander is
//! attached to a loader, bodies that contain mentions get the expanded fragments
//! prepended before the body is folded into the document tree.

use std::collections::HashSet;
use std::path::Path;

/// Expands `@mention` references found in document bodies.
pub trait MentionExpander: Send + Sync {
    /// Whether `text` contains any mention markers.
    fn has_mentions(&self, text: &str) -> bool;

    /// Load the fragments referenced by `text`, in order.
    ///
    /// `relative_to` is the directory of the document being read. Implementations
    /// should consult `dedup` so a fragment pulled in by one layer of a chain is
    /// not repeated by another.
    fn expand(&self, text: &str, relative_to: &Path, dedup: &mut MentionDedup) -> Vec<String>;
}

/// Per-load record of fragments already included.
///
/// One instance lives for a single `load` call and is shared across every
/// layer of the chain.
#[derive(Debug, Default)]
pub struct MentionDedup {
    seen: HashSet<String>,
}

impl MentionDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`, returning `true` the first time it is seen.
    pub fn first_seen(&mut self, key: &str) -> bool {
        self.seen.insert(key.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Prepend expanded fragments to a body, separated by blank lines.
pub(crate) fn prepend_fragments(fragments: &[String], body: &str) -> String {
    if fragments.is_empty() {
        return body.to_string();
    }
    format!("{}\n\n{}", fragments.join("\n\n"), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_reports_first_sighting_only() {
        let mut dedup = MentionDedup::new();
        assert!(dedup.first_seen("@notes.md"));
        assert!(!dedup.first_seen("@notes.md"));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_prepend_fragments() {
        let fragments = vec!["one".to_string(), "two".to_string()];
        assert_eq!(prepend_fragments(&fragments, "body"), "one\n\ntwo\n\nbody");
        assert_eq!(prepend_fragments(&[], "body"), "body");
    }
}
