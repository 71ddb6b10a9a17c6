//! Tag indexing and multi-tag filtering.

pub mod index;
pub mod selection;
pub mod view;

pub use index::TagIndex;
pub use selection::TagSelection;
pub use view::{FilteredView, ListState, YearGroup};
