use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    enums::{Event, Key},
    menu::MenuBar,
    prelude::*,
    text::TextBuffer,
};

use crate::app::domain::document::{DocumentId, EditKey};
use crate::app::domain::messages::Message;
use crate::app::infrastructure::buffer::buffer_text_no_leak;
use crate::app::state::AppState;
use super::haiku_panel::PANEL_HEIGHT;
use super::main_window::MainWidgets;
use super::menu::build_menu;
use super::tab_bar::TAB_BAR_HEIGHT;
use super::theme::apply_theme;

const HEMINGWAY_ITEM: &str = "Write/Hemingway Mode";
const TABS_ITEM: &str = "View/Show Tabs";

/// Translate a key into the editing keys Hemingway mode cares about.
pub fn edit_key(key: Key) -> EditKey {
    match key {
        Key::BackSpace => EditKey::BackSpace,
        Key::Delete => EditKey::Delete,
        Key::Left => EditKey::Left,
        _ => EditKey::Other,
    }
}

/// Whether the editor should swallow `key`. `allowed` is `None` when the
/// state is busy and cannot be asked; backward keys stay blocked then.
fn blocks_key(key: EditKey, allowed: Option<bool>) -> bool {
    match allowed {
        Some(allowed) => !allowed,
        None => key != EditKey::Other,
    }
}

/// Owns the widgets and one FLTK buffer per open note, and redraws them
/// from [`AppState`] after every handled message.
pub struct View {
    widgets: MainWidgets,
    sender: Sender<Message>,
    buffers: HashMap<DocumentId, TextBuffer>,
    bound: Option<DocumentId>,
}

impl View {
    pub fn new(mut widgets: MainWidgets, sender: Sender<Message>, state: Rc<RefCell<AppState>>) -> Self {
        let tabs_visible = state.borrow().tabs_visible();
        build_menu(&mut widgets.menu, &sender, tabs_visible);
        apply_theme(
            &mut widgets.text_editor,
            &mut widgets.wind,
            &mut widgets.menu,
            &mut widgets.timer_label,
            &mut widgets.status,
        );

        // Block backward edits before they reach the buffer. Ctrl chords
        // belong to the menu and pass through.
        widgets.text_editor.handle(move |_, event| {
            if event != Event::KeyDown || app::is_event_ctrl() {
                return false;
            }
            let key = edit_key(app::event_key());
            let allowed = state.try_borrow().ok().map(|st| st.is_key_allowed(key));
            blocks_key(key, allowed)
        });

        widgets.wind.set_callback({
            let s = sender;
            move |_| {
                if app::event() == Event::Close {
                    s.send(Message::WindowClose);
                }
            }
        });

        Self {
            widgets,
            sender,
            buffers: HashMap::new(),
            bound: None,
        }
    }

    pub fn show(&mut self) {
        self.widgets.wind.show();
    }

    /// Current contents of the buffer behind note `id`.
    pub fn buffer_text(&self, id: DocumentId) -> Option<String> {
        self.buffers.get(&id).map(buffer_text_no_leak)
    }

    pub fn render(&mut self, state: &AppState) {
        self.sync_buffers(state);

        let w = &mut self.widgets;
        w.tab_bar.rebuild(state.tabs());
        if state.tabs_visible() {
            w.tab_bar.widget.show();
            w.flex.fixed(&w.tab_bar.widget, TAB_BAR_HEIGHT);
        } else {
            w.tab_bar.widget.hide();
            w.flex.fixed(&w.tab_bar.widget, 0);
        }

        w.wind.set_label(&state.window_title());
        w.timer_label.set_label(&state.timer_display());
        w.status.set_label(&format!("  {}", state.status()));

        let hint = state.delete_hint();
        if w.haiku_panel.render(state.gate_state(), hint.as_deref(), state.submit_enabled()) {
            w.haiku_panel.group.show();
            w.flex.fixed(&w.haiku_panel.group, PANEL_HEIGHT);
        } else {
            w.haiku_panel.group.hide();
            w.flex.fixed(&w.haiku_panel.group, 0);
        }

        let hemingway = state.active_document().map(|d| d.hemingway()).unwrap_or(false);
        update_menu_checkbox(&w.menu, HEMINGWAY_ITEM, hemingway);
        update_menu_checkbox(&w.menu, TABS_ITEM, state.tabs_visible());

        w.wind.redraw();
    }

    /// Give every open note a buffer, drop buffers of closed notes, and put
    /// the active note's buffer in the editor.
    fn sync_buffers(&mut self, state: &AppState) {
        let docs = state.documents();
        self.buffers.retain(|id, _| docs.doc_by_id(*id).is_some());

        for doc in docs.documents() {
            if self.buffers.contains_key(&doc.id) {
                continue;
            }
            let mut buffer = TextBuffer::default();
            buffer.set_text(doc.text());
            let sender = self.sender;
            let id = doc.id;
            buffer.add_modify_callback(move |_pos, inserted, deleted, _restyled, _deleted_text| {
                if inserted > 0 || deleted > 0 {
                    sender.send(Message::BufferModified(id));
                }
            });
            self.buffers.insert(id, buffer);
        }

        let active = docs.active_id();
        if active == self.bound {
            return;
        }
        if let Some(buffer) = active.and_then(|id| self.buffers.get(&id)) {
            let editor = &mut self.widgets.text_editor;
            editor.set_buffer(buffer.clone());
            editor.set_insert_position(buffer.length());
            editor.show_insert_position();
            let _ = editor.take_focus();
        }
        self.bound = active;
    }
}

fn update_menu_checkbox(menu: &MenuBar, path: &str, checked: bool) {
    let idx = menu.find_index(path);
    if idx >= 0 {
        if let Some(mut item) = menu.at(idx) {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }
}
