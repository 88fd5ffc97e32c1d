use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, tabs_visible: bool) {
    let s = sender;

    // File
    menu.add("File/New", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileNew) });
    menu.add("File/Open...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileOpen) });
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSave) });
    menu.add("File/Save As...", Shortcut::Ctrl | Shortcut::Shift | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSaveAs) });
    menu.add("File/Close Tab", Shortcut::Ctrl | 'w', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::TabCloseActive) });
    menu.add("File/Delete Note...", Shortcut::Ctrl | Key::Delete, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::RequestDelete) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::WindowClose) });

    // View
    menu.add("View/Next Tab", Shortcut::Ctrl | '.', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TabNext) });
    menu.add("View/Previous Tab", Shortcut::Ctrl | ',', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TabPrevious) });
    let tabs_flag = if tabs_visible { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Show Tabs", Shortcut::Ctrl | 'b', tabs_flag, { let s = *s; move |_| s.send(Message::ToggleTabs) });

    // Write
    menu.add("Write/Hemingway Mode", Shortcut::Ctrl | 'g', MenuFlag::Toggle, { let s = *s; move |_| s.send(Message::ToggleHemingway) });
    menu.add("Write/Start Timer...", Shortcut::Ctrl | 't', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TimerStart) });
    menu.add("Write/Reset Timer", Shortcut::Ctrl | 'r', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TimerReset) });
    menu.add("Write/Inspire Me", Shortcut::Ctrl | 'l', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowQuote) });
}
