#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Editing keys the view asks about before letting them reach the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    BackSpace,
    Delete,
    Left,
    Other,
}

/// One open note.
///
/// `dirty` is true iff `text` differs from what was last loaded or saved.
/// A note that has never been saved has nothing to compare against and is
/// always dirty.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    filename: Option<String>,
    text: String,
    saved_text: Option<String>,
    dirty: bool,
    hemingway: bool,
}

impl Document {
    pub fn new_untitled(id: DocumentId) -> Self {
        Self {
            id,
            filename: None,
            text: String::new(),
            saved_text: None,
            dirty: true,
            hemingway: false,
        }
    }

    pub fn new_from_file(id: DocumentId, filename: String, content: &str) -> Self {
        Self {
            id,
            filename: Some(filename),
            text: content.to_string(),
            saved_text: Some(content.to_string()),
            dirty: false,
            hemingway: false,
        }
    }

    /// A named note whose content did not come from disk (e.g. created by
    /// the caller before the first save) starts dirty.
    pub fn new_unsaved(id: DocumentId, filename: Option<String>, content: &str) -> Self {
        Self {
            text: content.to_string(),
            filename,
            ..Self::new_untitled(id)
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn hemingway(&self) -> bool {
        self.hemingway
    }

    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.dirty = self.saved_text.as_deref() != Some(text);
    }

    pub fn mark_saved(&mut self, filename: String) {
        self.filename = Some(filename);
        self.saved_text = Some(self.text.clone());
        self.dirty = false;
    }

    pub fn set_hemingway(&mut self, enabled: bool) {
        self.hemingway = enabled;
    }

    /// Name shown on the tab: the filename, or "Untitled", with a trailing
    /// `*` while there are unsaved changes.
    pub fn title(&self) -> String {
        let name = self.filename.as_deref().unwrap_or("Untitled");
        if self.dirty {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Hemingway mode only goes forward: no deleting and no stepping back.
    pub fn is_key_allowed(&self, key: EditKey) -> bool {
        !(self.hemingway && matches!(key, EditKey::BackSpace | EditKey::Delete | EditKey::Left))
    }
}
