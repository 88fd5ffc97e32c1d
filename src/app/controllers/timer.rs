use std::time::Duration;

use tracing::debug;

use crate::app::services::text_ops::format_countdown;

/// Identifies one scheduled tick. Every start hands out a fresh token, so a
/// tick that was already queued when the timer was reset or restarted is
/// recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(pub u64);

/// Host hook that delivers a one-shot tick after a delay.
///
/// Only one tick is ever outstanding. `cancel` must be safe to call when
/// nothing is scheduled.
pub trait TickScheduler {
    fn schedule(&mut self, token: TickToken, after: Duration);
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { remaining: u32 },
    Finished,
    Reset,
    /// A tick that no longer belongs to the running countdown.
    Stale,
}

const TICK: Duration = Duration::from_secs(1);

/// A single countdown driven by one-second ticks.
pub struct TimerService {
    remaining: u32,
    running: bool,
    visible: bool,
    pending: Option<TickToken>,
    next_token: u64,
    scheduler: Box<dyn TickScheduler>,
}

impl TimerService {
    pub fn new(scheduler: Box<dyn TickScheduler>) -> Self {
        Self {
            remaining: 0,
            running: false,
            visible: false,
            pending: None,
            next_token: 1,
            scheduler,
        }
    }

    /// Start counting down from `total_seconds`, replacing any countdown
    /// already in progress.
    pub fn start(&mut self, total_seconds: u32) {
        self.scheduler.cancel();
        self.remaining = total_seconds;
        self.running = true;
        self.visible = true;
        self.schedule_next();
        debug!(total_seconds, "Timer started");
    }

    pub fn tick(&mut self, token: TickToken) -> TimerEvent {
        if self.pending != Some(token) {
            return TimerEvent::Stale;
        }
        self.pending = None;

        if self.remaining > 0 {
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.running = false;
            debug!("Timer finished");
            return TimerEvent::Finished;
        }

        self.schedule_next();
        TimerEvent::Tick {
            remaining: self.remaining,
        }
    }

    pub fn reset(&mut self) -> TimerEvent {
        self.scheduler.cancel();
        self.pending = None;
        self.remaining = 0;
        self.running = false;
        self.visible = false;
        TimerEvent::Reset
    }

    fn schedule_next(&mut self) {
        let token = TickToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        self.scheduler.schedule(token, TICK);
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `MM:SS` while a countdown is running or has just finished; empty
    /// before the first start and after a reset.
    pub fn display(&self) -> String {
        if self.visible {
            format_countdown(self.remaining)
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scheduler that only remembers what it was asked to do.
    #[derive(Default, Clone)]
    pub(crate) struct RecordingScheduler {
        pub(crate) log: Rc<RefCell<SchedulerLog>>,
    }

    #[derive(Default)]
    pub(crate) struct SchedulerLog {
        pub(crate) scheduled: Vec<TickToken>,
        pub(crate) cancels: usize,
    }

    impl RecordingScheduler {
        pub(crate) fn last(&self) -> Option<TickToken> {
            self.log.borrow().scheduled.last().copied()
        }

        pub(crate) fn scheduled_count(&self) -> usize {
            self.log.borrow().scheduled.len()
        }
    }

    impl TickScheduler for RecordingScheduler {
        fn schedule(&mut self, token: TickToken, _after: Duration) {
            self.log.borrow_mut().scheduled.push(token);
        }

        fn cancel(&mut self) {
            self.log.borrow_mut().cancels += 1;
        }
    }

    fn timer() -> (TimerService, RecordingScheduler) {
        let sched = RecordingScheduler::default();
        (TimerService::new(Box::new(sched.clone())), sched)
    }

    #[test]
    fn test_counts_down_to_finish() {
        let (mut t, sched) = timer();
        t.start(3);
        assert_eq!(t.display(), "00:03");
        assert!(t.is_running());

        let mut finished = 0;
        for _ in 0..3 {
            let token = sched.last().unwrap();
            if t.tick(token) == TimerEvent::Finished {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(t.remaining_seconds(), 0);
        assert!(!t.is_running());
        assert_eq!(t.display(), "00:00");
        // start + two reschedules, nothing after the finish
        assert_eq!(sched.scheduled_count(), 3);

        let last = sched.last().unwrap();
        assert_eq!(t.tick(last), TimerEvent::Stale);
    }

    #[test]
    fn test_tick_reports_remaining() {
        let (mut t, sched) = timer();
        t.start(90);
        assert_eq!(t.tick(sched.last().unwrap()), TimerEvent::Tick { remaining: 89 });
        assert_eq!(t.display(), "01:29");
    }

    #[test]
    fn test_zero_length_finishes_on_first_tick() {
        let (mut t, sched) = timer();
        t.start(0);
        assert_eq!(t.tick(sched.last().unwrap()), TimerEvent::Finished);
        assert!(!t.is_running());
    }

    #[test]
    fn test_reset_cancels_and_is_idempotent() {
        let (mut t, sched) = timer();
        t.start(10);
        let token = sched.last().unwrap();
        assert_eq!(t.reset(), TimerEvent::Reset);
        assert_eq!(t.reset(), TimerEvent::Reset);
        assert_eq!(sched.log.borrow().cancels, 3);
        assert_eq!(t.tick(token), TimerEvent::Stale);
        assert_eq!(t.display(), "");
        assert!(!t.is_running());
    }

    #[test]
    fn test_restart_replaces_previous_countdown() {
        let (mut t, sched) = timer();
        t.start(10);
        let old = sched.last().unwrap();
        t.start(5);
        let new = sched.last().unwrap();
        assert_ne!(old, new);
        assert_eq!(t.tick(old), TimerEvent::Stale);
        assert_eq!(t.tick(new), TimerEvent::Tick { remaining: 4 });
    }
}
