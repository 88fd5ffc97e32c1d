use fltk::{
    app::Sender,
    enums::{Align, FrameType},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::domain::messages::Message;
use super::haiku_panel::HaikuPanel;
use super::tab_bar::{TabBar, TAB_BAR_HEIGHT};

pub const MENU_HEIGHT: i32 = 30;
pub const TIMER_HEIGHT: i32 = 24;
pub const STATUS_HEIGHT: i32 = 22;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub tab_bar: TabBar,
    pub timer_label: Frame,
    pub text_editor: TextEditor,
    pub haiku_panel: HaikuPanel,
    pub status: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 800, 600, "Notator");
    wind.set_xclass("Notator");

    let mut flex = Flex::new(0, 0, 800, 600, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let tab_bar = TabBar::new(0, MENU_HEIGHT, 800, *sender);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let mut timer_label = Frame::default();
    timer_label.set_frame(FrameType::FlatBox);
    timer_label.set_align(Align::Right | Align::Inside);
    timer_label.set_label_size(16);
    flex.fixed(&timer_label, TIMER_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());
    text_editor.wrap_mode(WrapMode::AtBounds, 0);
    text_editor.set_text_size(15);

    // Collapsed until a deletion starts
    let mut haiku_panel = HaikuPanel::new(sender);
    haiku_panel.group.hide();
    flex.fixed(&haiku_panel.group, 0);

    let mut status = Frame::default();
    status.set_frame(FrameType::FlatBox);
    status.set_align(Align::Left | Align::Inside);
    status.set_label_size(12);
    flex.fixed(&status, STATUS_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        flex,
        menu,
        tab_bar,
        timer_label,
        text_editor,
        haiku_panel,
        status,
    }
}
