use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{debug, info, warn};

use super::controllers::document_set::DocumentSet;
use super::controllers::haiku_gate::{GateState, HaikuGate};
use super::controllers::timer::{TickScheduler, TickToken, TimerEvent, TimerService};
use super::domain::document::{Document, DocumentId, EditKey};
use super::domain::settings::{AppPaths, AppSettings};
use super::infrastructure::error::{AppError, Result};
use super::services::haiku::HaikuBank;
use super::services::notes::NoteStore;
use super::services::quotes::QuoteBank;
use super::services::session::SessionStore;
use super::services::text_ops::{default_note_name, extract_filename};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(String),
    /// The note has never been saved; ask for a name and call
    /// [`AppState::save_active_as`].
    NeedsFilename,
}

/// One tab as the view draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: DocumentId,
    pub title: String,
    pub is_active: bool,
}

/// Everything the app knows, independent of any widget toolkit.
///
/// The view calls the command methods in response to input and re-renders
/// from the query methods afterwards. All state is owned here and mutated on
/// the UI thread only.
pub struct AppState {
    documents: DocumentSet,
    gate: HaikuGate,
    timer: TimerService,
    quotes: QuoteBank,
    haikus: HaikuBank,
    notes: NoteStore,
    session: SessionStore,
    settings: AppSettings,
    paths: AppPaths,
    status: String,
    tabs_visible: bool,
}

impl AppState {
    pub fn new(settings: AppSettings, paths: AppPaths, scheduler: Box<dyn TickScheduler>) -> Self {
        let quotes = QuoteBank::load(&paths.quotes_file);
        let haikus = HaikuBank::load(&paths.haiku_file);
        info!(
            data_dir = %paths.data_dir.display(),
            quotes = quotes.len(),
            haikus = haikus.len(),
            "Starting"
        );

        Self {
            documents: DocumentSet::new(),
            gate: HaikuGate::new(settings.haiku_rule),
            timer: TimerService::new(scheduler),
            quotes,
            haikus,
            notes: NoteStore::new(&paths.data_dir),
            session: SessionStore::new(&paths.state_file),
            tabs_visible: settings.tabs_visible,
            settings,
            paths,
            status: String::new(),
        }
    }

    // --- Startup / shutdown ---

    /// Reopen the notes that were open at the last shutdown, leaving the last
    /// one active. Names that are no longer on disk are skipped. Always leaves
    /// at least one tab open.
    pub fn restore_session(&mut self) -> usize {
        let mut restored = 0;
        for filename in self.session.load() {
            match self.notes.read(&filename) {
                Ok(content) => {
                    self.documents.new_document(Some(filename), Some(&content));
                    restored += 1;
                }
                Err(e) => warn!(%filename, "Skipping note from last session: {}", e),
            }
        }
        self.documents.ensure_one();
        info!(restored, "Session restored");
        restored
    }

    /// Persist the names of the open notes. Unsaved edits are not written.
    pub fn shutdown(&mut self) -> Result<()> {
        self.timer.reset();
        let names = self.documents.snapshot_filenames();
        self.session.save(&names)?;
        info!(notes = names.len(), "Session saved");
        Ok(())
    }

    // --- Queries ---

    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    pub fn active_document(&self) -> Result<&Document> {
        self.documents.active_document()
    }

    pub fn tabs(&self) -> Vec<TabInfo> {
        let active = self.documents.active_id();
        self.documents
            .documents()
            .iter()
            .map(|d| TabInfo {
                id: d.id,
                title: d.title(),
                is_active: Some(d.id) == active,
            })
            .collect()
    }

    pub fn window_title(&self) -> String {
        match self.documents.active_document() {
            Ok(doc) => format!("{} - Notator", doc.title()),
            Err(_) => "Notator".to_string(),
        }
    }

    pub fn gate_state(&self) -> &GateState {
        self.gate.state()
    }

    pub fn submit_enabled(&self) -> bool {
        self.gate.submit_enabled()
    }

    /// What the haiku panel asks for while a deletion is pending.
    pub fn delete_hint(&self) -> Option<String> {
        let target = self.gate.target()?;
        let filename = self
            .documents
            .doc_by_id(target.id)
            .and_then(|d| d.filename())
            .unwrap_or(target.filename.as_str());
        Some(format!(
            "Delete {}? Answer with a haiku of {}.",
            filename,
            self.gate.rule().display_name()
        ))
    }

    pub fn timer_display(&self) -> String {
        self.timer.display()
    }

    pub fn timer(&self) -> &TimerService {
        &self.timer
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn tabs_visible(&self) -> bool {
        self.tabs_visible
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Name the Save As dialog starts with.
    pub fn suggested_filename(&self) -> String {
        self.documents
            .active_document()
            .ok()
            .and_then(|d| d.filename().map(str::to_string))
            .unwrap_or_else(|| default_note_name(Local::now().naive_local(), &self.settings.default_extension))
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        debug!(status = %self.status, "Status");
    }

    // --- Tabs and files ---

    pub fn file_new(&mut self) -> DocumentId {
        let idx = self.documents.new_document(None, None);
        self.documents.documents()[idx].id
    }

    /// Open the file at `path` in a new tab. The tab keeps only the file's
    /// name; later saves go to the data directory.
    pub fn open_path(&mut self, path: &Path) -> Result<DocumentId> {
        let filename = extract_filename(&path.to_string_lossy())
            .ok_or_else(|| AppError::InvalidFilename(path.display().to_string()))?;
        let content = fs::read_to_string(path)?;
        let idx = self.documents.new_document(Some(filename.clone()), Some(&content));
        info!(%filename, "Opened note");
        self.set_status(format!("Opened {}", filename));
        Ok(self.documents.documents()[idx].id)
    }

    pub fn save_active(&mut self) -> Result<SaveOutcome> {
        let doc = self.documents.active_document()?;
        let Some(filename) = doc.filename().map(str::to_string) else {
            return Ok(SaveOutcome::NeedsFilename);
        };
        self.write_active(filename).map(SaveOutcome::Saved)
    }

    /// Save the active note under `name`. A path is reduced to its file name;
    /// the note is always written into the data directory.
    pub fn save_active_as(&mut self, name: &str) -> Result<String> {
        let filename = extract_filename(name).ok_or_else(|| AppError::InvalidFilename(name.to_string()))?;
        self.write_active(filename)
    }

    fn write_active(&mut self, filename: String) -> Result<String> {
        let text = self.documents.active_document()?.text().to_string();
        if let Err(e) = self.notes.write(&filename, &text) {
            self.set_status(format!("Could not save {}: {}", filename, e));
            return Err(e);
        }
        self.documents.active_document_mut()?.mark_saved(filename.clone());
        info!(%filename, bytes = text.len(), "Saved note");
        self.set_status(format!("Saved {}", filename));
        Ok(filename)
    }

    /// Close the active tab. Unsaved changes are dropped, and a deletion
    /// waiting on this note is called off. A fresh blank note replaces the
    /// last tab.
    pub fn close_active(&mut self) {
        if let Some(doc) = self.documents.close_active() {
            debug!(title = %doc.title(), "Closed tab");
            if self.gate.abandon(doc.id) {
                info!(title = %doc.title(), "Deletion called off, note closed");
            }
        }
        self.documents.ensure_one();
    }

    pub fn next_tab(&mut self) {
        self.documents.activate_offset(1);
    }

    pub fn prev_tab(&mut self) {
        self.documents.activate_offset(-1);
    }

    pub fn select_tab(&mut self, id: DocumentId) {
        self.documents.set_active(id);
    }

    pub fn toggle_tabs_visible(&mut self) -> bool {
        self.tabs_visible = !self.tabs_visible;
        self.tabs_visible
    }

    // --- Editing ---

    /// Mirror the editor's buffer into the note it belongs to.
    pub fn set_document_text(&mut self, id: DocumentId, text: &str) {
        if let Some(doc) = self.documents.doc_by_id_mut(id) {
            doc.set_text(text);
        }
    }

    /// Whether the editor may pass `key` through to the active note.
    pub fn is_key_allowed(&self, key: EditKey) -> bool {
        self.documents
            .active_document()
            .map_or(true, |doc| doc.is_key_allowed(key))
    }

    /// Flip Hemingway mode on the active note. Returns the new setting.
    pub fn toggle_hemingway(&mut self) -> Result<bool> {
        let doc = self.documents.active_document_mut()?;
        let enabled = !doc.hemingway();
        doc.set_hemingway(enabled);
        self.set_status(format!("Hemingway mode {}", if enabled { "on" } else { "off" }));
        Ok(enabled)
    }

    // --- Timer ---

    pub fn start_timer(&mut self, minutes: u32) -> Result<()> {
        let max = self.settings.max_timer_minutes;
        if minutes == 0 || minutes > max {
            return Err(AppError::InvalidDuration { max });
        }
        self.timer.start(minutes * 60);
        Ok(())
    }

    pub fn timer_tick(&mut self, token: TickToken) -> TimerEvent {
        let event = self.timer.tick(token);
        if event == TimerEvent::Finished {
            self.set_status("Timer finished");
        }
        event
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.set_status("Timer reset");
    }

    // --- Quotes ---

    /// A random quote, or `None` when there are none to show.
    pub fn show_quote(&self) -> Option<String> {
        if self.quotes.is_empty() {
            return None;
        }
        self.quotes.pick_random().ok().map(str::to_string)
    }

    // --- Haiku-gated deletion ---

    /// Start deleting the active note. Returns false when nothing happened
    /// (untitled note, or a deletion already under way).
    pub fn request_delete(&mut self) -> bool {
        let Ok(doc) = self.documents.active_document() else {
            return false;
        };
        match self.gate.request_delete(doc, &mut self.haikus) {
            Ok(started) => started,
            Err(e) => {
                debug!("Ignoring delete request: {}", e);
                false
            }
        }
    }

    /// Returns whether the haiku may now be submitted.
    pub fn edit_haiku_line(&mut self, index: usize, text: &str) -> bool {
        self.gate.edit_line(index, text).unwrap_or_else(|e| {
            debug!("Ignoring haiku edit: {}", e);
            false
        })
    }

    pub fn submit_haiku(&mut self) -> Result<()> {
        match self.gate.submit(&mut self.documents, &self.notes) {
            Ok(()) => {
                self.documents.ensure_one();
                self.set_status("File deleted");
                Ok(())
            }
            Err(AppError::InvalidState(reason)) => {
                debug!("Ignoring haiku submit: {}", reason);
                Ok(())
            }
            Err(e @ AppError::DeleteFailed { .. }) => {
                warn!("{}", e);
                self.set_status(e.to_string());
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Err(e) = self.gate.cancel() {
            debug!("Ignoring cancel: {}", e);
        }
    }

    pub fn dismiss_result(&mut self) {
        if let Err(e) = self.gate.dismiss() {
            debug!("Ignoring dismiss: {}", e);
        }
    }
}
