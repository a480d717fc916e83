use std::time::Duration;

/// Periodic timer driven by an external clock.
///
/// The owner calls [`poll`](IntervalTimer::poll) with the current time and
/// runs its callback once per returned fire. A cancelled timer never fires.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Duration>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts (or restarts) the timer; the first fire is one period after `now`.
    pub fn arm(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Number of periods that elapsed up to and including `now`.
    pub fn poll(&mut self, now: Duration) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        if self.period.is_zero() {
            return 0;
        }

        let mut fires = 0;
        while due <= now {
            fires += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fires
    }
}
