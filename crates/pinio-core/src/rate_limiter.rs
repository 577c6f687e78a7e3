//! Write rate limiting for PWM updates.

use std::time::{Duration, Instant};

/// Global limiter shared by every pin: a write is accepted only if at least
/// `min_interval` has passed since the last accepted one.
#[derive(Debug, Clone)]
pub struct WriteRateLimiter {
    min_interval: Duration,
    last_accepted: Option<Instant>,
    accepted_count: u64,
    rejected_count: u64,
}

impl WriteRateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
            accepted_count: 0,
            rejected_count: 0,
        }
    }

    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    /// Returns true and records `now` if a write may proceed at `now`.
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.min_interval
        {
            self.rejected_count = self.rejected_count.saturating_add(1);
            return false;
        }

        self.last_accepted = Some(now);
        self.accepted_count = self.accepted_count.saturating_add(1);
        true
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_is_accepted() {
        let mut limiter = WriteRateLimiter::new(Duration::from_millis(50));
        assert!(limiter.try_acquire());
    }

    #[test]
    fn test_interval_boundary() {
        let mut limiter = WriteRateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        assert!(limiter.try_acquire_at(start));
        assert!(!limiter.try_acquire_at(start + Duration::from_millis(10)));
        assert!(!limiter.try_acquire_at(start + Duration::from_millis(49)));
        assert!(limiter.try_acquire_at(start + Duration::from_millis(50)));
        assert_eq!(limiter.accepted_count(), 2);
        assert_eq!(limiter.rejected_count(), 2);
    }

    #[test]
    fn test_rejections_do_not_extend_window() {
        let mut limiter = WriteRateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        assert!(limiter.try_acquire_at(start));
        assert!(!limiter.try_acquire_at(start + Duration::from_millis(40)));
        assert!(limiter.try_acquire_at(start + Duration::from_millis(55)));
    }

    #[test]
    fn test_clock_going_backwards_is_rejected() {
        let mut limiter = WriteRateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        assert!(limiter.try_acquire_at(start + Duration::from_millis(100)));
        assert!(!limiter.try_acquire_at(start));
    }
}
