//! Content pipeline: frontmatter extraction, dates and collections.

pub mod collection;
pub mod date;
pub mod entry;

pub use collection::Collection;
pub use date::EntryDate;
pub use entry::{ContentEntry, MetaError};
