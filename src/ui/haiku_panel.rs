use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, CallbackTrigger, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    prelude::*,
};

use crate::app::controllers::haiku_gate::GateState;
use crate::app::domain::messages::Message;
use super::theme::{ACCENT, Palette};

pub const PANEL_HEIGHT: i32 = 220;

/// The strip under the editor that asks for a haiku before a note is
/// deleted. Hidden while nothing is being deleted.
pub struct HaikuPanel {
    pub group: Flex,
    prompt: Frame,
    inputs: [Input; 3],
    delete_btn: Button,
    cancel_btn: Button,
    close_btn: Button,
}

impl HaikuPanel {
    pub fn new(sender: &Sender<Message>) -> Self {
        let colors = Palette::dark();

        let mut group = Flex::default();
        group.set_type(FlexType::Column);
        group.set_margin(8);
        group.set_pad(4);
        group.set_frame(FrameType::FlatBox);
        group.set_color(colors.panel_bg);

        let mut prompt = Frame::default();
        prompt.set_align(Align::Left | Align::Inside | Align::Wrap);
        prompt.set_label_color(colors.text);
        group.fixed(&prompt, 90);

        let inputs = [0usize, 1, 2].map(|index| {
            let mut input = Input::default();
            input.set_tooltip(&format!("Line {}", index + 1));
            input.set_trigger(CallbackTrigger::Changed);
            input.set_callback({
                let s = *sender;
                move |i| s.send(Message::HaikuLineEdited(index, i.value()))
            });
            group.fixed(&input, 26);
            input
        });

        let mut buttons = Flex::default();
        buttons.set_type(FlexType::Row);
        Frame::default();
        let mut delete_btn = Button::default().with_label("Delete");
        delete_btn.set_color(ACCENT);
        delete_btn.set_label_color(colors.text);
        delete_btn.set_callback({ let s = *sender; move |_| s.send(Message::HaikuSubmit) });
        buttons.fixed(&delete_btn, 90);
        let mut cancel_btn = Button::default().with_label("Cancel");
        cancel_btn.set_callback({ let s = *sender; move |_| s.send(Message::HaikuCancel) });
        buttons.fixed(&cancel_btn, 90);
        let mut close_btn = Button::default().with_label("Close");
        close_btn.set_callback({ let s = *sender; move |_| s.send(Message::HaikuDismiss) });
        buttons.fixed(&close_btn, 90);
        buttons.end();
        group.fixed(&buttons, 28);

        group.end();

        Self { group, prompt, inputs, delete_btn, cancel_btn, close_btn }
    }

    /// Bring the widgets in line with the gate. Returns whether the panel
    /// should be visible.
    pub fn render(&mut self, state: &GateState, hint: Option<&str>, submit_enabled: bool) -> bool {
        match state {
            GateState::Idle => {
                for input in &mut self.inputs {
                    input.set_value("");
                }
                false
            }
            GateState::Collecting { lines, prompt } => {
                let text = match hint {
                    Some(hint) => format!("{}\n\n{}", hint, prompt),
                    None => prompt.clone(),
                };
                self.prompt.set_label(&escape_label(&text));
                for (input, line) in self.inputs.iter_mut().zip(lines) {
                    // set_value moves the cursor, so leave matching inputs alone
                    if input.value() != *line {
                        input.set_value(line);
                    }
                    input.show();
                    input.activate();
                }
                self.delete_btn.show();
                if submit_enabled {
                    self.delete_btn.activate();
                } else {
                    self.delete_btn.deactivate();
                }
                self.cancel_btn.show();
                self.close_btn.hide();
                true
            }
            GateState::Completed { haiku } => {
                self.prompt.set_label(&escape_label(&format!("Deleted. Your haiku:\n{}", haiku.join("\n"))));
                for input in &mut self.inputs {
                    input.hide();
                }
                self.delete_btn.hide();
                self.cancel_btn.hide();
                self.close_btn.show();
                true
            }
        }
    }
}

/// FLTK treats `@` in labels as a symbol escape.
fn escape_label(text: &str) -> String {
    text.replace('@', "@@")
}
