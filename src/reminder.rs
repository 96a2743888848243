use iced::time::Instant;
use iced::Subscription;
use std::time::Duration;
use tracing::info;

/// Periodic "take a selfie" reminder.
///
/// The timer only nags; it never touches the selfie list.
#[derive(Debug, Clone)]
pub struct Reminder {
    interval: Option<Duration>,
    pending: bool,
    fired: u32,
}

impl Reminder {
    /// `None` turns reminders off
    pub fn new(interval: Option<Duration>) -> Self {
        match interval {
            Some(every) => info!("⏰ Reminder set every {}s", every.as_secs()),
            None => info!("Reminders disabled"),
        }

        Self {
            interval,
            pending: false,
            fired: 0,
        }
    }

    /// Timer ticks, or nothing if reminders are off
    pub fn subscription(&self) -> Subscription<Instant> {
        match self.interval {
            Some(every) => iced::time::every(every),
            None => Subscription::none(),
        }
    }

    pub fn fire(&mut self) {
        self.fired += 1;
        self.pending = true;
        info!("Time for a new selfie (reminder #{})", self.fired);
    }

    pub fn dismiss(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }
}
