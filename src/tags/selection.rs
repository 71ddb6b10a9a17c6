//! Active tag selection, as immutable snapshots.
//!
//! Every mutation returns a new snapshot, so a selection can be shared
//! with whatever built it without coordination.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    active: BTreeSet<String>,
}

impl TagSelection {
    /// The empty selection (everything visible).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of labels into a selection by toggling each in
    /// turn. Duplicate labels cancel out.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .fold(Self::new(), |selection, label| selection.toggle(label.as_ref()))
    }

    /// Add the label if absent, remove it if present.
    pub fn toggle(&self, label: &str) -> Self {
        let mut active = self.active.clone();
        if !active.remove(label) {
            active.insert(label.to_string());
        }
        Self { active }
    }

    /// Clear the selection by toggling every active label off.
    pub fn reset(&self) -> Self {
        self.active
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .iter()
            .fold(self.clone(), |selection, label| selection.toggle(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.active.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }
}
