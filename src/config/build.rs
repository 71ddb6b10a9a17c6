//! `[build]` section configuration.
//!
//! Contains build settings: content/output paths, collections and rss.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in hazel.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"            # Source directory
/// output = "public"              # Output directory
/// collections = ["posts", "notes"]
///
/// [build.rss]
/// enable = true
/// path = "feed.xml"
/// collection = "posts"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory, holding one subdirectory per collection.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Collection names; each maps to `<content>/<name>` and a `/<name>/`
    /// listing route.
    #[serde(default = "defaults::build::collections")]
    #[educe(Default = defaults::build::collections())]
    pub collections: Vec<String>,

    /// Clean output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// RSS feed generation settings.
    #[serde(default)]
    pub rss: RssConfig,
}

/// `[build.rss]` section - syndication feed settings.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct RssConfig {
    /// Generate a feed on every build.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Feed output path, relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,

    /// Which collection feeds the feed.
    #[serde(default = "defaults::build::rss::collection")]
    #[educe(Default = defaults::build::rss::collection())]
    pub collection: String,
}
