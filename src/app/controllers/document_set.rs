use crate::app::domain::document::{Document, DocumentId};
use crate::app::infrastructure::error::{AppError, Result};

/// The open notes, in tab order, with at most one active.
///
/// `active`, when set, always indexes into `documents`. The set itself may
/// become empty (e.g. after closing the last tab); callers that render it
/// restore the one-document invariant with [`DocumentSet::ensure_one`].
pub struct DocumentSet {
    documents: Vec<Document>,
    active: Option<usize>,
    next_id: u64,
}

impl Default for DocumentSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSet {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active: None,
            next_id: 1,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a note and make it active. Returns its index.
    ///
    /// With a filename and content the note is treated as loaded from disk
    /// (clean); anything else starts dirty.
    pub fn new_document(&mut self, filename: Option<String>, content: Option<&str>) -> usize {
        let id = self.next_document_id();
        let doc = match (filename, content) {
            (Some(name), Some(text)) => Document::new_from_file(id, name, text),
            (None, None) => Document::new_untitled(id),
            (name, text) => Document::new_unsaved(id, name, text.unwrap_or("")),
        };
        self.documents.push(doc);
        let idx = self.documents.len() - 1;
        self.active = Some(idx);
        idx
    }

    /// Add a blank note if the set is empty. Returns true if one was added.
    pub fn ensure_one(&mut self) -> bool {
        if self.documents.is_empty() {
            self.new_document(None, None);
            true
        } else {
            false
        }
    }

    /// Remove the active note and activate its nearest neighbour.
    pub fn close_active(&mut self) -> Option<Document> {
        let idx = self.active?;
        Some(self.remove_at(idx))
    }

    /// Remove a note by id, wherever it sits.
    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        let idx = self.position(id)?;
        Some(self.remove_at(idx))
    }

    fn remove_at(&mut self, idx: usize) -> Document {
        let doc = self.documents.remove(idx);
        self.active = match self.active {
            _ if self.documents.is_empty() => None,
            Some(active) if active > idx => Some(active - 1),
            Some(active) if active == idx => Some(idx.min(self.documents.len() - 1)),
            other => other,
        };
        doc
    }

    /// Move the active index by `delta`, wrapping at both ends.
    pub fn activate_offset(&mut self, delta: isize) {
        let len = self.documents.len();
        if len == 0 {
            return;
        }
        let current = self.active.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.active = Some(next);
    }

    pub fn set_active(&mut self, id: DocumentId) {
        if let Some(idx) = self.position(id) {
            self.active = Some(idx);
        }
    }

    pub fn active_document(&self) -> Result<&Document> {
        self.active
            .and_then(|idx| self.documents.get(idx))
            .ok_or(AppError::NoActiveDocument)
    }

    pub fn active_document_mut(&mut self) -> Result<&mut Document> {
        self.active
            .and_then(|idx| self.documents.get_mut(idx))
            .ok_or(AppError::NoActiveDocument)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active_document().ok().map(|d| d.id)
    }

    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    pub fn doc_by_id(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn doc_by_id_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Filenames of every saved note, in tab order. Untitled notes are not
    /// part of the session and are lost on restart.
    pub fn snapshot_filenames(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter_map(|d| d.filename().map(str::to_string))
            .collect()
    }
}
