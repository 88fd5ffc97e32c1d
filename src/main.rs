#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, dialog};
use tracing::{error, info, warn};

use notator::app::{init_logging, AppPaths, AppSettings, AppState, Message, SaveOutcome};
use notator::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use notator::ui::main_window::build_main_window;
use notator::ui::scheduler::FltkTickScheduler;
use notator::ui::view::View;

fn main() {
    init_logging();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let paths = AppPaths::from_settings(&settings);
    let scheduler = Box::new(FltkTickScheduler::new(sender));
    let state = Rc::new(RefCell::new(AppState::new(settings, paths, scheduler)));
    state.borrow_mut().restore_session();

    let widgets = build_main_window(&sender);
    let mut view = View::new(widgets, sender, state.clone());
    view.render(&state.borrow());
    view.show();

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        let mut st = state.borrow_mut();
        if let Message::WindowClose = msg {
            if let Err(e) = st.shutdown() {
                error!("Failed to save session: {}", e);
            }
            info!("Exiting");
            app.quit();
            break;
        }
        dispatch(msg, &mut st, &view);
        view.render(&st);
    }
}

fn dispatch(msg: Message, st: &mut AppState, view: &View) {
    match msg {
        Message::FileNew => {
            st.file_new();
        }
        Message::FileOpen => {
            if let Some(path) = native_open_dialog(&st.paths().data_dir) {
                if let Err(e) = st.open_path(&path) {
                    dialog::alert_default(&format!("Error opening file: {}", e));
                }
            }
        }
        Message::FileSave => match st.save_active() {
            Ok(SaveOutcome::Saved(_)) => {}
            Ok(SaveOutcome::NeedsFilename) => save_as(st),
            Err(e) => dialog::alert_default(&format!("Error saving file: {}", e)),
        },
        Message::FileSaveAs => save_as(st),
        Message::WindowClose => {}

        Message::TabCloseActive => st.close_active(),
        Message::TabNext => st.next_tab(),
        Message::TabPrevious => st.prev_tab(),
        Message::TabSelect(id) => st.select_tab(id),
        Message::ToggleTabs => {
            st.toggle_tabs_visible();
        }

        Message::BufferModified(id) => {
            if let Some(text) = view.buffer_text(id) {
                st.set_document_text(id, &text);
            }
        }
        Message::ToggleHemingway => {
            if let Err(e) = st.toggle_hemingway() {
                warn!("Cannot toggle Hemingway mode: {}", e);
            }
        }

        Message::TimerStart => start_timer(st),
        Message::TimerReset => st.reset_timer(),
        Message::TimerTick(token) => {
            st.timer_tick(token);
        }

        Message::ShowQuote => {
            if let Some(quote) = st.show_quote() {
                dialog::message_title("Inspiration");
                dialog::message_default(&quote);
            }
        }

        Message::RequestDelete => {
            st.request_delete();
        }
        Message::HaikuLineEdited(index, text) => {
            st.edit_haiku_line(index, &text);
        }
        Message::HaikuSubmit => {
            if let Err(e) = st.submit_haiku() {
                dialog::alert_default(&e.to_string());
            }
        }
        Message::HaikuCancel => st.cancel_delete(),
        Message::HaikuDismiss => st.dismiss_result(),
    }
}

fn save_as(st: &mut AppState) {
    let suggested = st.suggested_filename();
    let Some(path) = native_save_dialog(&st.paths().data_dir, &suggested) else {
        return;
    };
    if let Err(e) = st.save_active_as(&path.to_string_lossy()) {
        dialog::alert_default(&format!("Error saving file: {}", e));
    }
}

fn start_timer(st: &mut AppState) {
    let max = st.settings().max_timer_minutes;
    let Some(answer) = dialog::input_default(&format!("Minutes (1-{}):", max), "25") else {
        return;
    };
    let minutes = answer.trim().parse::<u32>().unwrap_or(0);
    if let Err(e) = st.start_timer(minutes) {
        dialog::alert_default(&e.to_string());
    }
}
