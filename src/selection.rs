//! Delete Selection State
//!
//! Tracks which todos are marked for deletion and how far along each one is.
//! Every selectable todo moves through an explicit three-stage machine:
//! Unselected -> Armed (marked, reversible) -> Confirmed (delete in flight).

use std::collections::HashMap;

/// Deletion stage of a single todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStage {
    /// Not marked for deletion.
    Unselected,
    /// Marked, awaiting a confirming click. Reversible.
    Armed,
    /// Delete request issued to the store. Cannot be cancelled.
    Confirmed,
}

/// Selection over the todo collection.
///
/// Only Armed and Confirmed entries are stored; absence means Unselected.
/// Invariant upheld by the controller: every stored id refers to a todo
/// currently in the collection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: HashMap<String, DeleteStage>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_of(&self, id: &str) -> DeleteStage {
        self.entries
            .get(id)
            .copied()
            .unwrap_or(DeleteStage::Unselected)
    }

    /// Number of todos currently Armed or Confirmed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mark a todo for deletion. Only valid from Unselected.
    pub fn arm(&mut self, id: &str) {
        self.entries.insert(id.to_string(), DeleteStage::Armed);
    }

    /// Promote an Armed entry to Confirmed. Returns false when the entry
    /// was not Armed, in which case nothing changes.
    pub fn confirm(&mut self, id: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(stage @ DeleteStage::Armed) => {
                *stage = DeleteStage::Confirmed;
                true
            }
            _ => false,
        }
    }

    /// Drop a Confirmed entry back to Armed after a failed delete so the
    /// user can retry.
    pub fn rearm(&mut self, id: &str) {
        if let Some(stage) = self.entries.get_mut(id) {
            *stage = DeleteStage::Armed;
        }
    }

    /// Forget an entry entirely (successful delete, or the todo is gone).
    pub fn remove(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Ids currently Armed, i.e. the targets of a bulk delete. Entries
    /// already Confirmed are in flight from an earlier request and excluded.
    pub fn armed_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, stage)| **stage == DeleteStage::Armed)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_id_is_unselected() {
        let selection = Selection::new();
        assert_eq!(selection.stage_of("a"), DeleteStage::Unselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn arm_then_confirm_walks_the_stages() {
        let mut selection = Selection::new();
        selection.arm("a");
        assert_eq!(selection.stage_of("a"), DeleteStage::Armed);
        assert!(selection.confirm("a"));
        assert_eq!(selection.stage_of("a"), DeleteStage::Confirmed);
    }

    #[test]
    fn confirm_needs_a_prior_arm() {
        let mut selection = Selection::new();
        assert!(!selection.confirm("a"));
        assert_eq!(selection.stage_of("a"), DeleteStage::Unselected);

        selection.arm("a");
        selection.confirm("a");
        // Already Confirmed: a second confirm is a no-op.
        assert!(!selection.confirm("a"));
        assert_eq!(selection.stage_of("a"), DeleteStage::Confirmed);
    }

    #[test]
    fn rearm_reverts_an_in_flight_entry() {
        let mut selection = Selection::new();
        selection.arm("a");
        selection.confirm("a");
        selection.rearm("a");
        assert_eq!(selection.stage_of("a"), DeleteStage::Armed);
    }

    #[test]
    fn armed_ids_excludes_confirmed_entries() {
        let mut selection = Selection::new();
        selection.arm("a");
        selection.arm("b");
        selection.arm("c");
        selection.confirm("b");

        let mut armed = selection.armed_ids();
        armed.sort();
        assert_eq!(armed, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn remove_and_clear_forget_entries() {
        let mut selection = Selection::new();
        selection.arm("a");
        selection.arm("b");
        selection.remove("a");
        assert_eq!(selection.stage_of("a"), DeleteStage::Unselected);
        assert_eq!(selection.len(), 1);

        selection.clear();
        assert!(selection.is_empty());
    }
}
