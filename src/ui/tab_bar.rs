use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    draw,
    enums::{Align, Color, Event, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::domain::document::DocumentId;
use crate::app::domain::messages::Message;
use crate::app::state::TabInfo;
use super::theme::{ACCENT, Palette};

pub const TAB_BAR_HEIGHT: i32 = 30;

const MIN_TAB_WIDTH: i32 = 60;
const MAX_TAB_WIDTH: i32 = 200;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 6;
const TAB_H_PADDING: i32 = 10;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 1;
const PLUS_BTN_WIDTH: i32 = 28;
const PLUS_BTN_MARGIN: i32 = 4;

#[derive(Clone, Copy)]
struct TabSlot {
    x: i32,
    width: i32,
}

enum HitResult {
    Tab { index: usize, is_close: bool },
    PlusButton,
    None,
}

struct TabBarState {
    tabs: Vec<TabInfo>,
    slots: Vec<TabSlot>,
    plus_x: i32,
    hover_tab_index: Option<usize>,
    hover_close: bool,
    hover_plus: bool,
    sender: Sender<Message>,
    widget_w: i32,
}

pub struct TabBar {
    pub widget: Widget,
    state: Rc<RefCell<TabBarState>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, sender: Sender<Message>) -> Self {
        let state = Rc::new(RefCell::new(TabBarState {
            tabs: Vec::new(),
            slots: Vec::new(),
            plus_x: PLUS_BTN_MARGIN,
            hover_tab_index: None,
            hover_close: false,
            hover_plus: false,
            sender,
            widget_w: w,
        }));

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let st = draw_state.borrow();
            draw_tab_bar(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_tab_bar(wid, event, &handle_state));

        let resize_state = state.clone();
        widget.resize_callback(move |_, _, _, w, _| {
            let mut st = resize_state.borrow_mut();
            st.widget_w = w;
            compute_layout(&mut st);
        });

        Self { widget, state }
    }

    pub fn rebuild(&mut self, tabs: Vec<TabInfo>) {
        let mut st = self.state.borrow_mut();
        st.widget_w = self.widget.w();
        st.tabs = tabs;
        st.hover_tab_index = None;
        st.hover_close = false;
        compute_layout(&mut st);
        drop(st);
        self.widget.redraw();
    }
}

// --- Layout ---

fn compute_layout(st: &mut TabBarState) {
    st.slots.clear();
    let count = st.tabs.len() as i32;
    if count == 0 {
        st.plus_x = PLUS_BTN_MARGIN;
        return;
    }

    let fixed = PLUS_BTN_WIDTH + PLUS_BTN_MARGIN + TAB_GAP * (count - 1);
    let tab_width = ((st.widget_w - fixed) / count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

    let mut cursor_x = 0;
    for _ in 0..count {
        st.slots.push(TabSlot { x: cursor_x, width: tab_width });
        cursor_x += tab_width + TAB_GAP;
    }
    st.plus_x = cursor_x + PLUS_BTN_MARGIN;
}

fn hit_test(st: &TabBarState, wy: i32, mx: i32, my: i32) -> HitResult {
    if my < wy || my >= wy + TAB_BAR_HEIGHT {
        return HitResult::None;
    }
    for (index, slot) in st.slots.iter().enumerate() {
        if mx >= slot.x && mx < slot.x + slot.width {
            let close_x = slot.x + slot.width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
            let close_y = wy + (TAB_BAR_HEIGHT - CLOSE_BTN_SIZE) / 2;
            let is_close = mx >= close_x
                && mx <= close_x + CLOSE_BTN_SIZE
                && my >= close_y
                && my <= close_y + CLOSE_BTN_SIZE;
            return HitResult::Tab { index, is_close };
        }
    }
    if mx >= st.plus_x && mx < st.plus_x + PLUS_BTN_WIDTH {
        return HitResult::PlusButton;
    }
    HitResult::None
}

// --- Drawing ---

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    if draw::measure(text, true).0 <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect::<String>() + ellipsis;
        if draw::measure(&candidate, true).0 <= max_width {
            return candidate;
        }
    }
    ellipsis.to_string()
}

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
    draw::set_draw_color(color);
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_bar(wid: &Widget, st: &TabBarState) {
    let (wx, wy, ww, wh) = (wid.x(), wid.y(), wid.w(), wid.h());
    let colors = Palette::dark();

    draw::set_draw_color(colors.bar_bg);
    draw::draw_rectf(wx, wy, ww, wh);

    for (index, (tab, slot)) in st.tabs.iter().zip(&st.slots).enumerate() {
        let tx = wx + slot.x;
        if tab.is_active {
            draw_rounded_top_rect(tx, wy, slot.width, wh, CORNER_RADIUS, colors.active_tab_bg);
        } else {
            draw_rounded_top_rect(tx, wy + 2, slot.width, wh - 2, CORNER_RADIUS, colors.inactive_tab_bg);
        }

        let text_color = if tab.is_active { ACCENT } else { colors.dim_text };
        let text_area_width = slot.width - TAB_H_PADDING - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE - TAB_H_PADDING;
        let label = truncate_to_fit(&tab.title, text_area_width);
        draw::set_draw_color(text_color);
        draw::set_font(Font::Helvetica, 12);
        draw::draw_text(&label, tx + TAB_H_PADDING, wy + (wh + 12) / 2);

        let close_x = tx + slot.width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
        let close_y = wy + (wh - CLOSE_BTN_SIZE) / 2;
        let hovered = st.hover_tab_index == Some(index);
        if hovered && st.hover_close {
            draw::set_draw_color(colors.hover_bg);
            draw::draw_rectf(close_x - 2, close_y - 2, CLOSE_BTN_SIZE + 4, CLOSE_BTN_SIZE + 4);
        }
        draw::set_draw_color(if tab.is_active || hovered { colors.text } else { colors.dim_text });
        draw::set_font(Font::HelveticaBold, 20);
        draw::draw_text2("\u{00d7}", close_x, close_y, CLOSE_BTN_SIZE, CLOSE_BTN_SIZE, Align::Center);
    }

    let px = wx + st.plus_x;
    let bg = if st.hover_plus { colors.hover_bg } else { colors.inactive_tab_bg };
    draw_rounded_top_rect(px, wy + 2, PLUS_BTN_WIDTH, wh - 4, CORNER_RADIUS, bg);
    draw::set_draw_color(if st.hover_plus { colors.text } else { colors.dim_text });
    draw::set_font(Font::HelveticaBold, 16);
    draw::draw_text2("+", px, wy + 2, PLUS_BTN_WIDTH, wh - 4, Align::Center);
}

// --- Events ---

fn close_tab(sender: Sender<Message>, id: DocumentId) {
    sender.send(Message::TabSelect(id));
    sender.send(Message::TabCloseActive);
}

fn handle_tab_bar(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabBarState>>) -> bool {
    match event {
        Event::Push => {
            let st = state.borrow();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let button = fltk::app::event_button();
            let sender = st.sender;

            match hit_test(&st, wid.y(), mx, my) {
                HitResult::PlusButton if button == 1 => {
                    sender.send(Message::FileNew);
                    true
                }
                HitResult::Tab { index, is_close } => {
                    let id = st.tabs[index].id;
                    match button {
                        1 if is_close => close_tab(sender, id),
                        1 => sender.send(Message::TabSelect(id)),
                        2 => close_tab(sender, id),
                        _ => {}
                    }
                    true
                }
                _ => false,
            }
        }
        Event::Move | Event::Enter => {
            let mut st = state.borrow_mut();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let (tab, close, plus) = match hit_test(&st, wid.y(), mx, my) {
                HitResult::Tab { index, is_close } => (Some(index), is_close, false),
                HitResult::PlusButton => (None, false, true),
                HitResult::None => (None, false, false),
            };
            if (tab, close, plus) != (st.hover_tab_index, st.hover_close, st.hover_plus) {
                st.hover_tab_index = tab;
                st.hover_close = close;
                st.hover_plus = plus;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Leave => {
            let mut st = state.borrow_mut();
            st.hover_tab_index = None;
            st.hover_close = false;
            st.hover_plus = false;
            drop(st);
            wid.redraw();
            true
        }
        _ => false,
    }
}
