//! Filtered, year-grouped view of a collection.

use crate::content::{Collection, ContentEntry};
use crate::tags::index::TagIndex;
use crate::tags::selection::TagSelection;
use std::collections::BTreeSet;

/// What a listing should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// No active tags, everything visible.
    Unfiltered,
    /// Active tags with at least one match.
    Filtered,
    /// Active tags but nothing matches: render the tag summary and a
    /// reset control, no entries.
    FilteredEmpty,
}

/// Entries sharing a year, in collection (date-descending) order.
/// `year: None` collects entries with unparseable dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup<'a> {
    pub year: Option<u16>,
    pub entries: Vec<&'a ContentEntry>,
}

/// A collection filtered through a tag selection, grouped by year.
///
/// Rebuilt fresh for every render; borrows the collection it was built
/// from. The tag index always reflects the unfiltered collection, so the
/// summary keeps its counts while filtering.
#[derive(Debug)]
pub struct FilteredView<'a> {
    pub selection: TagSelection,
    pub index: TagIndex,
    groups: Vec<YearGroup<'a>>,
    visible: usize,
}

impl<'a> FilteredView<'a> {
    pub fn build(collection: &'a Collection, selection: TagSelection) -> Self {
        let index = TagIndex::from_collection(collection);

        let visible_entries: Vec<&ContentEntry> = collection
            .entries()
            .iter()
            .filter(|entry| matches(entry, &selection))
            .collect();
        let visible = visible_entries.len();

        Self {
            selection,
            index,
            groups: group_by_year(visible_entries),
            visible,
        }
    }

    /// Year groups in descending year order, undated last.
    pub fn groups(&self) -> &[YearGroup<'a>] {
        &self.groups
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn state(&self) -> ListState {
        match (self.selection.is_empty(), self.visible) {
            (true, _) => ListState::Unfiltered,
            (false, 0) => ListState::FilteredEmpty,
            (false, _) => ListState::Filtered,
        }
    }
}

/// An entry is visible when its tag labels cover every selected label.
fn matches(entry: &ContentEntry, selection: &TagSelection) -> bool {
    if selection.is_empty() {
        return true;
    }
    let labels: BTreeSet<String> = entry.tag_labels().into_iter().collect();
    selection.iter().all(|label| labels.contains(label))
}

fn group_by_year(entries: Vec<&ContentEntry>) -> Vec<YearGroup<'_>> {
    let mut groups: Vec<YearGroup> = Vec::new();
    for entry in entries {
        let year = entry.year();
        match groups.iter_mut().find(|group| group.year == year) {
            Some(group) => group.entries.push(entry),
            None => groups.push(YearGroup {
                year,
                entries: vec![entry],
            }),
        }
    }
    // Descending years, undated (None) at the end.
    groups.sort_by_key(|group| match group.year {
        Some(year) => (0u8, std::cmp::Reverse(year)),
        None => (1u8, std::cmp::Reverse(0)),
    });
    groups
}
