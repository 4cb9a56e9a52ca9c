// src/filesystem/actions.rs
use super::{Entry, EntryKind};

/// Per-item actions offered next to a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Rename,
    Copy,
    Cut,
    Delete,
}

impl ItemAction {
    pub const ALL: [ItemAction; 4] =
        [ItemAction::Delete, ItemAction::Cut, ItemAction::Copy, ItemAction::Rename];

    pub fn sequence(&self) -> u32 {
        match self {
            ItemAction::Rename => 10,
            ItemAction::Copy => 30,
            ItemAction::Cut => 50,
            ItemAction::Delete => 99,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemAction::Rename => "Rename",
            ItemAction::Copy => "Copy",
            ItemAction::Cut => "Cut",
            ItemAction::Delete => "Delete",
        }
    }

    pub fn key(&self) -> char {
        match self {
            ItemAction::Rename => 'r',
            ItemAction::Copy => 'c',
            ItemAction::Cut => 'x',
            ItemAction::Delete => 'd',
        }
    }

    pub fn applies_to(&self, kind: EntryKind) -> bool {
        matches!(kind, EntryKind::Directory | EntryKind::File)
    }

    /// Applicable actions ordered by sequence. Entries without a kind get none.
    pub fn for_entry(entry: &Entry) -> Vec<ItemAction> {
        let Some(kind) = entry.kind else {
            return Vec::new();
        };
        let mut actions: Vec<_> = Self::ALL.into_iter().filter(|a| a.applies_to(kind)).collect();
        actions.sort_by_key(|a| a.sequence());
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_ordered_by_sequence() {
        let actions = ItemAction::for_entry(&Entry::file("a.txt"));
        assert_eq!(
            actions,
            vec![ItemAction::Rename, ItemAction::Copy, ItemAction::Cut, ItemAction::Delete]
        );
        assert_eq!(ItemAction::for_entry(&Entry::directory("docs")).len(), 4);
    }

    #[test]
    fn test_untyped_entry_has_no_actions() {
        assert!(ItemAction::for_entry(&Entry::new("odd", None)).is_empty());
    }
}
