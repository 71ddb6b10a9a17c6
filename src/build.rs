//! Site build orchestration.
//!
//! For each configured collection: load entries, write the listing page,
//! the per-entry page shells and the tag index, then the RSS feed for
//! the configured feed collection.

use crate::{
    config::SiteConfig,
    content::Collection,
    generator::{RssFeed, page},
    log,
    tags::{FilteredView, TagIndex, TagSelection},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, time::Instant};

pub fn build_site(config: &SiteConfig) -> Result<()> {
    let start = Instant::now();

    if config.build.clean && config.build.output.exists() {
        log!("build"; "cleaning {}", config.build.output.display());
        fs::remove_dir_all(&config.build.output)
            .with_context(|| format!("cannot clean {}", config.build.output.display()))?;
    }
    fs::create_dir_all(&config.build.output)
        .with_context(|| format!("cannot create {}", config.build.output.display()))?;

    for name in &config.build.collections {
        let collection = Collection::load(name, &config.collection_dir(name))
            .with_context(|| format!("loading collection `{name}`"))?;

        build_collection(config, &collection)?;

        if config.build.rss.enable && *name == config.build.rss.collection {
            RssFeed::new(config, &collection).write_to_file(config)?;
        }
    }

    log!("build"; "site built in {:.2?}", start.elapsed());
    Ok(())
}

fn build_collection(config: &SiteConfig, collection: &Collection) -> Result<()> {
    let out_dir = config.collection_output_dir(&collection.name);
    fs::create_dir_all(&out_dir)?;

    // Listing page, unfiltered; filtered variants are served on demand.
    let view = FilteredView::build(collection, TagSelection::new());
    fs::write(
        out_dir.join("index.html"),
        page::render_listing(config, &collection.name, &view),
    )?;

    // Machine-readable tag index alongside the listing.
    let index = TagIndex::from_collection(collection);
    fs::write(
        out_dir.join("tags.json"),
        serde_json::to_string_pretty(&index)?,
    )?;

    collection.entries().par_iter().try_for_each(|entry| {
        let entry_dir = out_dir.join(&entry.slug);
        fs::create_dir_all(&entry_dir)?;
        fs::write(
            entry_dir.join("index.html"),
            page::render_entry(config, &collection.name, entry),
        )
        .with_context(|| format!("writing page for `{}`", entry.slug))
    })?;

    log!(
        "build";
        "`{}`: {} entries, {} tags",
        collection.name,
        collection.len(),
        index.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_entry(dir: &Path, name: &str, date: &str, published: bool, tags: &str) {
        let content = format!(
            "---\ntitle: {name}\ndate: '{date}'\npublished: {published}\ntags: '{tags}'\n---\nbody\n"
        );
        fs::write(dir.join(name), content).unwrap();
    }

    fn site_config(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Test".into();
        config.base.description = "Test".into();
        config.base.url = Some("https://example.com".into());
        config.build.content = root.join("content");
        config.build.output = root.join("public");
        config
    }

    #[test]
    fn test_build_site_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = site_config(dir.path());

        for collection in ["posts", "notes"] {
            fs::create_dir_all(config.build.content.join(collection)).unwrap();
        }
        write_entry(
            &config.build.content.join("posts"),
            "hello.mdx",
            "2024-01-15",
            true,
            "rust",
        );
        write_entry(
            &config.build.content.join("posts"),
            "draft.md",
            "2024-02-01",
            false,
            "",
        );
        write_entry(
            &config.build.content.join("notes"),
            "note.md",
            "2023-05-05",
            true,
            "web, css",
        );

        build_site(&config).unwrap();

        let output = &config.build.output;
        assert!(output.join("posts/index.html").exists());
        assert!(output.join("posts/hello/index.html").exists());
        assert!(!output.join("posts/draft").exists());
        assert!(output.join("posts/tags.json").exists());
        assert!(output.join("notes/note/index.html").exists());
        assert!(output.join("feed.xml").exists());

        let listing = fs::read_to_string(output.join("posts/index.html")).unwrap();
        assert!(listing.contains("hello"));
        assert!(!listing.contains("draft"));

        let tags = fs::read_to_string(output.join("notes/tags.json")).unwrap();
        assert!(tags.contains("#web"));
        assert!(tags.contains("# css"));

        let feed = fs::read_to_string(output.join("feed.xml")).unwrap();
        assert!(feed.contains("https://example.com/posts/hello/"));
    }

    #[test]
    fn test_build_clean_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site_config(dir.path());
        config.build.clean = true;
        config.build.rss.enable = false;

        fs::create_dir_all(config.build.content.join("posts")).unwrap();
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("stale.html"), "old").unwrap();

        build_site(&config).unwrap();
        assert!(!config.build.output.join("stale.html").exists());
    }

    #[test]
    fn test_build_fails_on_malformed_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site_config(dir.path());
        config.build.rss.enable = false;

        fs::create_dir_all(config.build.content.join("posts")).unwrap();
        fs::write(
            config.build.content.join("posts/bad.md"),
            "---\ntitle: only a title\n---\n",
        )
        .unwrap();

        assert!(build_site(&config).is_err());
    }
}
