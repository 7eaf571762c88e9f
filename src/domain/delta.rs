//! Tag set difference between two versions of a note.

use super::{NoteAttribute, Tag};
use std::collections::BTreeSet;

/// Tags gained and lost by a note across one write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    added: BTreeSet<Tag>,
    removed: BTreeSet<Tag>,
}

impl TagDelta {
    /// Computes the delta from `previous` (absent for a first write) to `current`.
    pub fn between(previous: Option<&NoteAttribute>, current: &NoteAttribute) -> Self {
        let empty = BTreeSet::new();
        let prev_tags = previous.map(NoteAttribute::tags).unwrap_or(&empty);
        let new_tags = current.tags();

        Self {
            added: new_tags.difference(prev_tags).cloned().collect(),
            removed: prev_tags.difference(new_tags).cloned().collect(),
        }
    }

    pub fn added(&self) -> &BTreeSet<Tag> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<Tag> {
        &self.removed
    }

    /// Union of added and removed tags.
    pub fn touched(&self) -> BTreeSet<&Tag> {
        self.added.iter().chain(self.removed.iter()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
