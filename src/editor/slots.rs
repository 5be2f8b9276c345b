//! Stable identity for ordered elements.
//!
//! Position is not identity: an element keeps its [`SlotId`] while edits
//! around it change its index. Identifiers are minted when an element is
//! created and mapped to indices only at render time. Lists registered
//! beneath an edited sequence are dropped, since their element paths shift
//! with the edit.

use std::collections::HashMap;
use std::fmt;

use ulid::Ulid;

use crate::data::path::FieldPath;

/// Opaque identifier for one element of an ordered editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Ulid);

impl SlotId {
    fn mint() -> Self {
        SlotId(Ulid::new())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-sequence element identities, keyed by the sequence's path.
#[derive(Debug, Default)]
pub struct SlotRegistry {
    lists: HashMap<FieldPath, Vec<SlotId>>,
}

impl SlotRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the list at `path` to `len`, minting identifiers for new tail
    /// slots and dropping surplus ones.
    pub fn sync(&mut self, path: &FieldPath, len: usize) -> &[SlotId] {
        let list = self.lists.entry(path.clone()).or_default();
        if list.len() > len {
            list.truncate(len);
        }
        while list.len() < len {
            list.push(SlotId::mint());
        }
        list
    }

    /// Mint an identifier for a freshly appended element.
    pub fn push(&mut self, path: &FieldPath) -> SlotId {
        let id = SlotId::mint();
        self.lists.entry(path.clone()).or_default().push(id);
        id
    }

    /// Drop the identifier at `index`, shifting later ones down.
    pub fn remove(&mut self, path: &FieldPath, index: usize) {
        if let Some(list) = self.lists.get_mut(path) {
            if index < list.len() {
                list.remove(index);
            }
        }
    }

    /// Move an identifier between indices, mirroring the value move.
    pub fn move_item(&mut self, path: &FieldPath, from: usize, to: usize) {
        if let Some(list) = self.lists.get_mut(path) {
            if from != to && from < list.len() && to < list.len() {
                let id = list.remove(from);
                list.insert(to, id);
            }
        }
    }

    /// Drop every list registered strictly beneath `path`.
    pub fn invalidate_under(&mut self, path: &FieldPath) {
        self.lists
            .retain(|registered, _| registered == path || !registered.starts_with(path));
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.lists.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_mints_and_trims_to_length() {
        let mut slots = SlotRegistry::new();
        let path = FieldPath::parse("xs");
        let first = slots.sync(&path, 3).to_vec();
        assert_eq!(first.len(), 3);
        // Growing keeps the existing prefix.
        let grown = slots.sync(&path, 4).to_vec();
        assert_eq!(&grown[..3], &first[..]);
        // Shrinking drops the tail only.
        let shrunk = slots.sync(&path, 2).to_vec();
        assert_eq!(&shrunk[..], &first[..2]);
    }

    #[test]
    fn identity_follows_moves_and_removals() {
        let mut slots = SlotRegistry::new();
        let path = FieldPath::parse("xs");
        let ids = slots.sync(&path, 3).to_vec();
        slots.move_item(&path, 0, 2);
        assert_eq!(slots.sync(&path, 3), &[ids[1], ids[2], ids[0]]);
        slots.remove(&path, 1);
        assert_eq!(slots.sync(&path, 2), &[ids[1], ids[0]]);
    }

    #[test]
    fn invalidation_spares_the_edited_list_itself() {
        let mut slots = SlotRegistry::new();
        let outer = FieldPath::parse("rules");
        let inner = FieldPath::parse("rules.0.tags");
        let sibling = FieldPath::parse("other");
        let outer_ids = slots.sync(&outer, 2).to_vec();
        slots.sync(&inner, 1);
        let sibling_ids = slots.sync(&sibling, 1).to_vec();

        slots.invalidate_under(&outer);
        assert_eq!(slots.sync(&outer, 2), &outer_ids[..]);
        assert_eq!(slots.sync(&sibling, 1), &sibling_ids[..]);
        // The nested list was re-minted.
        assert_eq!(slots.sync(&inner, 1).len(), 1);
    }
}
