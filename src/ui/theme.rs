use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

/// Olive accent used for the cursor, the timer and the active tab.
pub const ACCENT: Color = Color::from_rgb(107, 142, 35);

pub struct Palette {
    pub window_bg: Color,
    pub editor_bg: Color,
    pub panel_bg: Color,
    pub bar_bg: Color,
    pub active_tab_bg: Color,
    pub inactive_tab_bg: Color,
    pub hover_bg: Color,
    pub text: Color,
    pub dim_text: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            window_bg: Color::from_rgb(51, 51, 51),     // gray20
            editor_bg: Color::from_rgb(26, 26, 26),     // gray10
            panel_bg: Color::from_rgb(77, 77, 77),      // gray30
            bar_bg: Color::from_rgb(40, 40, 40),
            active_tab_bg: Color::from_rgb(26, 26, 26),
            inactive_tab_bg: Color::from_rgb(77, 77, 77),
            hover_bg: Color::from_rgb(95, 95, 95),
            text: Color::White,
            dim_text: Color::from_rgb(190, 190, 190),
        }
    }
}

pub fn apply_theme(
    editor: &mut TextEditor,
    window: &mut Window,
    menu: &mut MenuBar,
    timer_label: &mut Frame,
    status: &mut Frame,
) {
    let p = Palette::dark();

    editor.set_color(p.editor_bg);
    editor.set_text_color(p.text);
    editor.set_cursor_color(ACCENT);
    editor.set_selection_color(Color::from_rgb(70, 80, 50));
    window.set_color(p.window_bg);
    window.set_label_color(p.text);
    menu.set_color(p.bar_bg);
    menu.set_text_color(p.text);
    menu.set_selection_color(p.hover_bg);
    timer_label.set_color(p.window_bg);
    timer_label.set_label_color(ACCENT);
    status.set_color(p.window_bg);
    status.set_label_color(p.text);

    editor.redraw();
    window.redraw();
    menu.redraw();
}
