//! Hazel - a static site generator for markdown-based personal blogs.
//!
//! The pipeline, leaves first:
//!
//! ```text
//! content::entry      frontmatter extraction -> ContentEntry
//! content::collection discovery + publish filter + date sort -> Collection
//! tags::index         tag -> occurrence count over a Collection
//! tags::selection     immutable snapshots of the active filter set
//! tags::view          selection x collection -> year-grouped visible subset
//! generator           listing/entry pages, tag data, rss feed
//! build / serve       orchestration and the development server
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod content;
pub mod generator;
pub mod serve;
pub mod tags;
pub mod utils;
