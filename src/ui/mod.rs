//! FLTK view layer: widgets, menu, dialogs and the tick scheduler.

pub mod file_dialogs;
pub mod haiku_panel;
pub mod main_window;
pub mod menu;
pub mod scheduler;
pub mod tab_bar;
pub mod theme;
pub mod view;
