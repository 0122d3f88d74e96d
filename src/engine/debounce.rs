use std::time::Duration;

/// Trailing-edge debounce timer on a caller-supplied clock.
///
/// Every [`schedule`](Debouncer::schedule) restarts the quiet window; the
/// timer fires once when the clock reaches the last deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the timer at `now`. Returns true when a pending deadline was
    /// replaced.
    pub fn schedule(&mut self, now: Duration) -> bool {
        self.deadline.replace(now.saturating_add(self.delay)).is_some()
    }

    /// True exactly once per schedule, when `now` has reached the deadline.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_sub(now))
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_once_after_quiet_window() {
        let mut timer = Debouncer::new(ms(300));
        assert!(!timer.schedule(ms(0)));
        assert!(!timer.fire(ms(299)));
        assert!(timer.fire(ms(300)));
        assert!(!timer.fire(ms(301)));
    }

    #[test]
    fn rescheduling_restarts_the_window() {
        let mut timer = Debouncer::new(ms(300));
        timer.schedule(ms(0));
        assert!(timer.schedule(ms(200)));
        assert!(!timer.fire(ms(300)));
        assert_eq!(timer.remaining(ms(300)), Some(ms(200)));
        assert!(timer.fire(ms(500)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn zero_delay_fires_at_schedule_time() {
        let mut timer = Debouncer::new(Duration::ZERO);
        timer.schedule(ms(10));
        assert!(timer.fire(ms(10)));
    }

    #[test]
    fn schedule_saturates_at_clock_limit() {
        let mut timer = Debouncer::new(ms(300));
        assert!(!timer.schedule(Duration::MAX));
        assert_eq!(timer.remaining(Duration::MAX), Some(Duration::ZERO));
        assert!(timer.fire(Duration::MAX));
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let mut timer = Debouncer::new(ms(50));
        timer.schedule(ms(0));
        timer.cancel();
        assert!(!timer.fire(ms(100)));
        assert_eq!(timer.remaining(ms(100)), None);
    }
}
