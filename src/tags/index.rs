//! Tag index: per-tag entry counts across a collection.

use crate::content::Collection;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tag label → number of entries carrying it. Keys are the `#`-prefixed
/// labels produced by [`ContentEntry::tag_labels`], kept sorted for
/// deterministic rendering and serialization.
///
/// [`ContentEntry::tag_labels`]: crate::content::ContentEntry::tag_labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagIndex(BTreeMap<String, usize>);

impl TagIndex {
    pub fn from_collection(collection: &Collection) -> Self {
        let mut counts = BTreeMap::new();
        for entry in collection.entries() {
            // Dedupe per entry: a repeated token still counts one entry.
            let labels: BTreeSet<String> = entry.tag_labels().into_iter().collect();
            for label in labels {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        Self(counts)
    }

    pub fn count(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, &count)| (label.as_str(), count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Collection, ContentEntry};
    use std::path::Path;

    fn entry(slug: &str, tags: &str) -> ContentEntry {
        let src = format!(
            "---\ntitle: {slug}\ndate: '2021-01-01'\npublished: true\ntags: '{tags}'\n---\n"
        );
        ContentEntry::from_source(Path::new(&format!("{slug}.md")), &src).unwrap()
    }

    fn collection(entries: Vec<ContentEntry>) -> Collection {
        Collection::from_entries("notes", entries)
    }

    #[test]
    fn test_counts_across_entries() {
        let index = TagIndex::from_collection(&collection(vec![
            entry("a", "rust,web"),
            entry("b", "rust"),
            entry("c", "web,css"),
        ]));

        assert_eq!(index.count("#rust"), 2);
        assert_eq!(index.count("#web"), 2);
        assert_eq!(index.count("#css"), 1);
        assert_eq!(index.count("#missing"), 0);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_whitespace_variants_are_distinct_keys() {
        let index = TagIndex::from_collection(&collection(vec![
            entry("a", "rust, web"),
            entry("b", "rust,web"),
        ]));

        // "# web" and "#web" are different labels.
        assert_eq!(index.count("#rust"), 2);
        assert_eq!(index.count("#web"), 1);
        assert_eq!(index.count("# web"), 1);
    }

    #[test]
    fn test_repeated_token_counts_entry_once() {
        let index = TagIndex::from_collection(&collection(vec![
            entry("a", "rust,rust"),
            entry("b", "rust"),
        ]));

        // Two entries carry "#rust", however often each repeats it.
        assert_eq!(index.count("#rust"), 2);
    }

    #[test]
    fn test_empty_tags_contribute_nothing() {
        let index = TagIndex::from_collection(&collection(vec![entry("a", "")]));
        assert!(index.is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let index = TagIndex::from_collection(&collection(vec![entry("a", "zebra,apple,mid")]));
        let labels: Vec<_> = index.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["#apple", "#mid", "#zebra"]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let index = TagIndex::from_collection(&collection(vec![entry("a", "rust")]));
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r##"{"#rust":1}"##);
    }
}
