use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a successful copy stays acknowledged.
pub const ACK_WINDOW: Duration = Duration::from_millis(2000);

/// Transient "copied" flag.
///
/// Every successful copy raises the flag and schedules its own reset
/// `ACK_WINDOW` after it completed. A reset clears the flag no matter how many
/// copies happened in between, so the flag is never held longer than the
/// window of the oldest pending copy. Failures never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyAck {
    acknowledged: bool,
    resets: VecDeque<Instant>,
}

impl CopyAck {
    pub fn arm(&mut self, completed_at: Instant) {
        self.settle(completed_at);
        self.acknowledged = true;
        self.resets.push_back(completed_at + ACK_WINDOW);
    }

    pub fn is_acknowledged(&self, now: Instant) -> bool {
        self.acknowledged && self.resets.front().is_some_and(|reset| now < *reset)
    }

    /// Applies resets that are due. Returns true when the flag flipped to false.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.acknowledged;
        self.settle(now);
        before && !self.acknowledged
    }

    pub(crate) fn has_pending_resets(&self) -> bool {
        !self.resets.is_empty()
    }

    fn settle(&mut self, now: Instant) {
        while self.resets.front().is_some_and(|reset| *reset <= now) {
            self.resets.pop_front();
            self.acknowledged = false;
        }
    }
}
