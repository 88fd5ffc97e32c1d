use std::time::Duration;

use fltk::app::{self, Sender, TimeoutHandle};

use crate::app::controllers::timer::{TickScheduler, TickToken};
use crate::app::domain::messages::Message;

/// Turns timer ticks into one-shot FLTK timeouts that post
/// [`Message::TimerTick`] back onto the channel.
pub struct FltkTickScheduler {
    sender: Sender<Message>,
    pending: Option<TimeoutHandle>,
}

impl FltkTickScheduler {
    pub fn new(sender: Sender<Message>) -> Self {
        Self { sender, pending: None }
    }
}

impl TickScheduler for FltkTickScheduler {
    fn schedule(&mut self, token: TickToken, after: Duration) {
        self.cancel();
        let sender = self.sender;
        let handle = app::add_timeout3(after.as_secs_f64(), move |_| {
            sender.send(Message::TimerTick(token));
        });
        self.pending = Some(handle);
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if app::has_timeout3(handle) {
                app::remove_timeout3(handle);
            }
        }
    }
}
