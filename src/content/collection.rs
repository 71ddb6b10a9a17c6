//! Collection loading: discover content files, extract entries, keep the
//! published ones sorted by date descending.

use crate::content::date::EntryDate;
use crate::content::entry::ContentEntry;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// All published entries for one content area, date-descending.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Collection name, e.g. "posts". Doubles as the listing route segment.
    pub name: String,
    entries: Vec<ContentEntry>,
}

impl Collection {
    /// Load a collection from `dir`. Walks the tree recursively, extracts
    /// every `.md`/`.mdx` file, drops unpublished entries and sorts the
    /// rest by date descending.
    ///
    /// A missing directory yields an empty collection; a file that fails
    /// extraction fails the whole load.
    pub fn load(name: &str, dir: &Path) -> Result<Self> {
        if !dir.exists() {
            return Ok(Self {
                name: name.to_string(),
                entries: Vec::new(),
            });
        }

        // Sorted discovery so filesystem iteration order never leaks into
        // the output.
        let mut paths = discover(dir);
        paths.sort();

        let mut entries = paths
            .par_iter()
            .map(|path| {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                ContentEntry::from_source(path, &source)
                    .with_context(|| format!("invalid metadata in {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?;

        entries.retain(|entry| entry.published);

        // Stable sort: undated entries go last, keeping their relative
        // (path) order.
        entries.sort_by_key(|entry| match entry.date {
            Some(date) => (0u8, Reverse(date)),
            None => (1u8, Reverse(EntryDate::from_ymd(0, 1, 1))),
        });

        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    pub fn from_entries(name: &str, mut entries: Vec<ContentEntry>) -> Self {
        entries.retain(|entry| entry.published);
        entries.sort_by_key(|entry| match entry.date {
            Some(date) => (0u8, Reverse(date)),
            None => (1u8, Reverse(EntryDate::from_ymd(0, 1, 1))),
        });
        Self {
            name: name.to_string(),
            entries,
        }
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a published entry by slug.
    pub fn find(&self, slug: &str) -> Option<&ContentEntry> {
        self.entries.iter().find(|entry| entry.slug == slug)
    }
}

fn discover(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
        })
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_entry(dir: &Path, name: &str, date: &str, published: bool, tags: &str) {
        let content = format!(
            "---\ntitle: {name}\ndate: '{date}'\npublished: {published}\ntags: '{tags}'\n---\nbody of {name}\n"
        );
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let collection = Collection::load("posts", Path::new("/nonexistent/posts")).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.name, "posts");
    }

    #[test]
    fn test_load_sorts_date_descending() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "old.md", "2020-01-01", true, "");
        write_entry(dir.path(), "new.md", "2024-06-15", true, "");
        write_entry(dir.path(), "mid.mdx", "2022-03-03", true, "");

        let collection = Collection::load("posts", dir.path()).unwrap();
        let slugs: Vec<_> = collection.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["new", "mid", "old"]);
    }

    #[test]
    fn test_load_filters_unpublished() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "draft.md", "2024-01-01", false, "");
        write_entry(dir.path(), "live.md", "2023-01-01", true, "");

        let collection = Collection::load("posts", dir.path()).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.entries()[0].slug, "live");
        assert!(collection.find("draft").is_none());
    }

    #[test]
    fn test_load_recurses_and_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("2021");
        fs::create_dir(&nested).unwrap();
        write_entry(&nested, "nested.mdx", "2021-05-05", true, "");
        fs::write(dir.path().join("notes.txt"), "not content").unwrap();
        fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();

        let collection = Collection::load("notes", dir.path()).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.entries()[0].slug, "nested");
    }

    #[test]
    fn test_load_undated_entries_sort_last() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "a-undated.md", "not a date", true, "");
        write_entry(dir.path(), "dated.md", "2021-01-01", true, "");
        write_entry(dir.path(), "z-undated.md", "someday", true, "");

        let collection = Collection::load("posts", dir.path()).unwrap();
        let slugs: Vec<_> = collection.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["dated", "a-undated", "z-undated"]);
    }

    #[test]
    fn test_load_fails_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "good.md", "2021-01-01", true, "");
        fs::write(dir.path().join("bad.md"), "---\ntitle: only a title\n---\n").unwrap();

        let result = Collection::load("posts", dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_find() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "hello.md", "2021-01-01", true, "a,b");

        let collection = Collection::load("posts", dir.path()).unwrap();
        assert!(collection.find("hello").is_some());
        assert!(collection.find("missing").is_none());
    }
}
