//! Output generation: HTML pages and the RSS feed.

pub mod page;
pub mod rss;

pub use rss::RssFeed;
