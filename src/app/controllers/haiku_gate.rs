//! Deletion behind a haiku.
//!
//! Asking to delete a saved note opens the gate with a prompt haiku. The user
//! writes three lines; only when they satisfy the configured [`HaikuRule`]
//! can the deletion be submitted, which removes the file and closes its tab.
//!
//! ```text
//! Idle --request--> Collecting --submit(valid, file removed)--> Completed
//!  ^                    |                                          |
//!  +------cancel--------+                                          |
//!  +---------------------------dismiss-----------------------------+
//! ```

use tracing::{debug, info};

use super::document_set::DocumentSet;
use crate::app::domain::document::{Document, DocumentId};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::haiku::{Haiku, HaikuBank, HaikuRule};
use crate::app::services::notes::NoteStore;

/// Shown instead of a prompt when there are no haikus to hand out.
pub const NO_PROMPT: &str = "Write a haiku to let this note go.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Collecting { lines: [String; 3], prompt: String },
    Completed { haiku: Haiku },
}

/// The note a running deletion will remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: DocumentId,
    pub filename: String,
}

pub struct HaikuGate {
    state: GateState,
    target: Option<DeleteTarget>,
    rule: HaikuRule,
}

impl HaikuGate {
    pub fn new(rule: HaikuRule) -> Self {
        Self {
            state: GateState::Idle,
            target: None,
            rule,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        self.target.as_ref()
    }

    pub fn rule(&self) -> HaikuRule {
        self.rule
    }

    /// Open the gate for `doc`. Untitled notes have no file to delete, so
    /// asking for one does nothing and returns `Ok(false)`.
    pub fn request_delete(&mut self, doc: &Document, bank: &mut HaikuBank) -> Result<bool> {
        if self.state != GateState::Idle {
            return Err(AppError::InvalidState("a deletion is already in progress"));
        }
        let Some(filename) = doc.filename() else {
            return Ok(false);
        };

        let prompt = bank
            .next()
            .map(|h| h.join("\n"))
            .unwrap_or_else(|| NO_PROMPT.to_string());
        self.target = Some(DeleteTarget {
            id: doc.id,
            filename: filename.to_string(),
        });
        self.state = GateState::Collecting {
            lines: Default::default(),
            prompt,
        };
        debug!(filename, "Deletion requested");
        Ok(true)
    }

    /// Replace line `index` (0..3) of the haiku being written. Returns
    /// whether the haiku may now be submitted.
    pub fn edit_line(&mut self, index: usize, text: &str) -> Result<bool> {
        let GateState::Collecting { lines, .. } = &mut self.state else {
            return Err(AppError::InvalidState("no haiku is being written"));
        };
        let line = lines
            .get_mut(index)
            .ok_or(AppError::InvalidState("a haiku has three lines"))?;
        *line = text.to_string();
        Ok(self.submit_enabled())
    }

    pub fn submit_enabled(&self) -> bool {
        match &self.state {
            GateState::Collecting { lines, .. } => self.rule.is_valid(lines),
            _ => false,
        }
    }

    /// Check the haiku and, if it holds, delete the target's file and close
    /// its tab.
    ///
    /// The file removed is the one the note is saved under now, not when the
    /// deletion was requested. If the note has been closed in the meantime
    /// the gate returns to idle without touching the disk.
    ///
    /// An invalid haiku or a failed file removal leaves the gate collecting
    /// so the user can fix it or cancel.
    pub fn submit(&mut self, docs: &mut DocumentSet, notes: &NoteStore) -> Result<()> {
        let GateState::Collecting { lines, .. } = &self.state else {
            return Err(AppError::InvalidState("no haiku is being written"));
        };
        if !self.rule.is_valid(lines) {
            return Err(AppError::InvalidHaiku {
                counts: self.rule.measure(lines),
            });
        }
        let id = self
            .target
            .as_ref()
            .map(|t| t.id)
            .ok_or(AppError::InvalidState("nothing to delete"))?;
        let Some(filename) = docs.doc_by_id(id).and_then(|d| d.filename()).map(str::to_string) else {
            self.state = GateState::Idle;
            self.target = None;
            return Err(AppError::InvalidState("the note is no longer open"));
        };

        notes.remove(&filename)?;
        docs.remove(id);
        info!(%filename, "Note deleted");

        let GateState::Collecting { lines: haiku, .. } = std::mem::replace(&mut self.state, GateState::Idle) else {
            return Err(AppError::InvalidState("no haiku is being written"));
        };
        self.state = GateState::Completed { haiku };
        self.target = None;
        Ok(())
    }

    /// Forget a pending deletion of note `id`, e.g. because its tab closed.
    /// Returns true if the gate was waiting on that note.
    pub fn abandon(&mut self, id: DocumentId) -> bool {
        if self.target.as_ref().map(|t| t.id) != Some(id) {
            return false;
        }
        self.state = GateState::Idle;
        self.target = None;
        true
    }

    pub fn cancel(&mut self) -> Result<()> {
        if !matches!(self.state, GateState::Collecting { .. }) {
            return Err(AppError::InvalidState("no deletion to cancel"));
        }
        self.state = GateState::Idle;
        self.target = None;
        Ok(())
    }

    pub fn dismiss(&mut self) -> Result<()> {
        if !matches!(self.state, GateState::Completed { .. }) {
            return Err(AppError::InvalidState("no result to dismiss"));
        }
        self.state = GateState::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Fixture {
        _tmp: tempfile::TempDir,
        notes: NoteStore,
        docs: DocumentSet,
        bank: HaikuBank,
        gate: HaikuGate,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let notes = NoteStore::new(tmp.path());
        notes.write("x.txt", "doomed").unwrap();
        let mut docs = DocumentSet::new();
        docs.new_document(Some("keep.md".into()), Some("stay"));
        docs.new_document(Some("x.txt".into()), Some("doomed"));
        Fixture {
            _tmp: tmp,
            notes,
            docs,
            bank: HaikuBank::from_text("old\npond\nfrog"),
            gate: HaikuGate::new(HaikuRule::WordRanges),
        }
    }

    fn open_gate(f: &mut Fixture) {
        let doc = f.docs.active_document().unwrap().clone();
        assert!(f.gate.request_delete(&doc, &mut f.bank).unwrap());
    }

    fn write(f: &mut Fixture, lines: [&str; 3]) -> bool {
        let mut enabled = false;
        for (i, line) in lines.iter().enumerate() {
            enabled = f.gate.edit_line(i, line).unwrap();
        }
        enabled
    }

    #[test]
    fn test_valid_haiku_deletes_note() {
        let mut f = fixture();
        open_gate(&mut f);
        assert_eq!(
            f.gate.state(),
            &GateState::Collecting {
                lines: Default::default(),
                prompt: "old\npond\nfrog".to_string()
            }
        );
        assert!(write(&mut f, ["a b c", "d e f g", "g h i"]));

        f.gate.submit(&mut f.docs, &f.notes).unwrap();
        assert!(matches!(f.gate.state(), GateState::Completed { haiku } if haiku[1] == "d e f g"));
        assert!(!f.notes.exists("x.txt"));
        assert_eq!(f.docs.snapshot_filenames(), vec!["keep.md"]);
        assert!(f.gate.target().is_none());

        f.gate.dismiss().unwrap();
        assert_eq!(f.gate.state(), &GateState::Idle);
    }

    #[test]
    fn test_invalid_haiku_keeps_collecting() {
        let mut f = fixture();
        open_gate(&mut f);
        assert!(!write(&mut f, ["a b", "d e f g", "g h i"]));
        let err = f.gate.submit(&mut f.docs, &f.notes).unwrap_err();
        assert!(matches!(err, AppError::InvalidHaiku { counts: [2, 4, 3] }));
        assert!(matches!(f.gate.state(), GateState::Collecting { .. }));
        assert!(f.notes.exists("x.txt"));
        assert_eq!(f.docs.count(), 2);
    }

    #[test]
    fn test_missing_file_keeps_document() {
        let mut f = fixture();
        open_gate(&mut f);
        f.notes.remove("x.txt").unwrap();
        write(&mut f, ["a b c", "d e f g", "g h i"]);
        let err = f.gate.submit(&mut f.docs, &f.notes).unwrap_err();
        assert!(matches!(err, AppError::DeleteFailed { .. }));
        assert!(matches!(f.gate.state(), GateState::Collecting { .. }));
        assert_eq!(f.docs.count(), 2);

        f.gate.cancel().unwrap();
        assert_eq!(f.gate.state(), &GateState::Idle);
        assert!(f.gate.target().is_none());
    }

    #[test]
    fn test_deletes_the_name_the_note_has_now() {
        let mut f = fixture();
        open_gate(&mut f);
        f.notes.write("y.txt", "doomed").unwrap();
        f.docs.active_document_mut().unwrap().mark_saved("y.txt".into());
        write(&mut f, ["a b c", "d e f g", "g h i"]);

        f.gate.submit(&mut f.docs, &f.notes).unwrap();
        assert!(!f.notes.exists("y.txt"));
        assert!(f.notes.exists("x.txt"));
        assert_eq!(f.docs.snapshot_filenames(), vec!["keep.md"]);
    }

    #[test]
    fn test_closed_target_is_not_deleted() {
        let mut f = fixture();
        open_gate(&mut f);
        write(&mut f, ["a b c", "d e f g", "g h i"]);
        f.docs.close_active();

        let err = f.gate.submit(&mut f.docs, &f.notes).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert_eq!(f.gate.state(), &GateState::Idle);
        assert!(f.gate.target().is_none());
        assert!(f.notes.exists("x.txt"));
        assert_eq!(f.docs.count(), 1);
    }

    #[test]
    fn test_abandon_only_matches_target() {
        let mut f = fixture();
        let keep = f.docs.documents()[0].id;
        let doomed = f.docs.documents()[1].id;
        open_gate(&mut f);
        assert!(!f.gate.abandon(keep));
        assert!(matches!(f.gate.state(), GateState::Collecting { .. }));
        assert!(f.gate.abandon(doomed));
        assert_eq!(f.gate.state(), &GateState::Idle);
        assert!(!f.gate.abandon(doomed));
    }

    #[test]
    fn test_untitled_cannot_be_targeted() {
        let mut f = fixture();
        f.docs.new_document(None, None);
        let doc = f.docs.active_document().unwrap().clone();
        assert!(!f.gate.request_delete(&doc, &mut f.bank).unwrap());
        assert_eq!(f.gate.state(), &GateState::Idle);
    }

    #[test]
    fn test_out_of_sequence_actions_are_rejected() {
        let mut f = fixture();
        assert!(matches!(f.gate.submit(&mut f.docs, &f.notes), Err(AppError::InvalidState(_))));
        assert!(matches!(f.gate.cancel(), Err(AppError::InvalidState(_))));
        assert!(matches!(f.gate.dismiss(), Err(AppError::InvalidState(_))));
        assert!(matches!(f.gate.edit_line(0, "x"), Err(AppError::InvalidState(_))));
        assert_eq!(f.gate.state(), &GateState::Idle);

        open_gate(&mut f);
        assert!(matches!(f.gate.edit_line(3, "x"), Err(AppError::InvalidState(_))));
        assert!(matches!(f.gate.dismiss(), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn test_empty_bank_uses_placeholder() {
        let mut f = fixture();
        f.bank = HaikuBank::default();
        open_gate(&mut f);
        assert!(matches!(f.gate.state(), GateState::Collecting { prompt, .. } if prompt == NO_PROMPT));
    }

    fn words(n: usize) -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,6}", n).prop_map(|w| w.join(" "))
    }

    fn in_range() -> impl Strategy<Value = (String, String, String)> {
        (
            (3usize..=5).prop_flat_map(words),
            (4usize..=7).prop_flat_map(words),
            (3usize..=5).prop_flat_map(words),
        )
    }

    fn bad_short() -> impl Strategy<Value = usize> {
        prop_oneof![0usize..=2, 6usize..=9]
    }

    fn bad_long() -> impl Strategy<Value = usize> {
        prop_oneof![0usize..=3, 8usize..=11]
    }

    fn out_of_range() -> impl Strategy<Value = (String, String, String)> {
        prop_oneof![
            (bad_short().prop_flat_map(words), (4usize..=7).prop_flat_map(words), (3usize..=5).prop_flat_map(words)),
            ((3usize..=5).prop_flat_map(words), bad_long().prop_flat_map(words), (3usize..=5).prop_flat_map(words)),
            ((3usize..=5).prop_flat_map(words), (4usize..=7).prop_flat_map(words), bad_short().prop_flat_map(words)),
        ]
    }

    proptest! {
        #[test]
        fn prop_in_range_haiku_completes((a, b, c) in in_range()) {
            let mut f = fixture();
            open_gate(&mut f);
            prop_assert!(write(&mut f, [a.as_str(), b.as_str(), c.as_str()]));
            prop_assert!(f.gate.submit(&mut f.docs, &f.notes).is_ok());
            prop_assert!(matches!(f.gate.state(), GateState::Completed { .. }), "not completed");
        }

        #[test]
        fn prop_out_of_range_haiku_rejected((a, b, c) in out_of_range()) {
            let mut f = fixture();
            open_gate(&mut f);
            prop_assert!(!write(&mut f, [a.as_str(), b.as_str(), c.as_str()]));
            let rejected = matches!(f.gate.submit(&mut f.docs, &f.notes), Err(AppError::InvalidHaiku { .. }));
            prop_assert!(rejected);
            prop_assert!(matches!(f.gate.state(), GateState::Collecting { .. }), "left collecting");
        }
    }
}
