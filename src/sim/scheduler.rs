/// Tick scheduler: owns the tick interval and the next due instant.
///
/// Time comes in from the caller, so the scheduler never reads a clock and
/// tests step it with hand-made instants. At most one schedule is armed at
/// a time; `reschedule` cancels the current one and arms a new one.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// A stopped scheduler.
    pub fn new(interval: Duration) -> Self {
        TickScheduler { interval, next_due: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm: the first tick fires one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Cancel the current schedule and re-arm at `interval`.
    pub fn reschedule(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.start(now);
    }

    /// Has a tick come due? Consumes it and arms the next one. Missed ticks
    /// are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn stopped_never_fires() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(200));
        assert!(!s.is_running());
        assert!(!s.poll(t0 + ms(10_000)));
    }

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(200));
        s.start(t0);
        assert!(!s.poll(t0 + ms(199)));
        assert!(s.poll(t0 + ms(200)));
        assert!(!s.poll(t0 + ms(250)));
        assert!(s.poll(t0 + ms(400)));
    }

    #[test]
    fn late_poll_does_not_burst() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(100));
        s.start(t0);
        assert!(s.poll(t0 + ms(1_000)));
        assert!(!s.poll(t0 + ms(1_050)));
        assert!(s.poll(t0 + ms(1_100)));
    }

    #[test]
    fn reschedule_replaces_interval_and_due() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(200));
        s.start(t0);
        s.reschedule(ms(190), t0 + ms(150));
        assert_eq!(s.interval(), ms(190));
        // Old due time (200) no longer applies.
        assert!(!s.poll(t0 + ms(200)));
        assert!(s.poll(t0 + ms(340)));
    }

    #[test]
    fn stop_cancels() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(50));
        s.start(t0);
        s.stop();
        assert!(!s.poll(t0 + ms(500)));
        s.start(t0 + ms(500));
        assert!(s.poll(t0 + ms(550)));
    }
}
