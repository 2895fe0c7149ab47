//! One-shot countdown measured in simulated seconds.

use crate::time::secs_to_us;

#[derive(Debug, Clone, Default)]
pub struct OneShotTimer {
    remaining_us: Option<u64>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `delay_secs`. Returns false and leaves the
    /// running countdown untouched if the timer is already armed.
    pub fn arm(&mut self, delay_secs: f32) -> bool {
        if self.remaining_us.is_some() {
            return false;
        }
        self.remaining_us = Some(secs_to_us(delay_secs));
        true
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_us.is_some()
    }

    /// Advance by `dt` seconds. Returns true on the single call where the
    /// countdown reaches zero; the timer is disarmed afterwards.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining_us else {
            return false;
        };
        let remaining = remaining.saturating_sub(secs_to_us(dt));
        if remaining == 0 {
            self.remaining_us = None;
            true
        } else {
            self.remaining_us = Some(remaining);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut timer = OneShotTimer::new();
        assert!(timer.arm(0.1));
        let dt = 1.0 / 60.0;
        let fired: Vec<bool> = (0..10).map(|_| timer.tick(dt)).collect();
        assert_eq!(fired.iter().filter(|f| **f).count(), 1);
        // 6 * 16_667us covers 100_000us.
        assert!(fired[5]);
        assert!(!timer.is_armed());
    }

    #[test]
    fn never_fires_early() {
        let mut timer = OneShotTimer::new();
        timer.arm(0.1);
        assert!(!timer.tick(0.05));
        assert!(!timer.tick(0.049));
        assert!(timer.tick(0.001));
    }

    #[test]
    fn rearming_while_armed_is_ignored() {
        let mut timer = OneShotTimer::new();
        assert!(timer.arm(0.1));
        timer.tick(0.05);
        assert!(!timer.arm(1.0));
        assert!(timer.tick(0.05));
    }

    #[test]
    fn disarmed_timer_never_fires() {
        let mut timer = OneShotTimer::new();
        assert!(!timer.tick(5.0));
    }
}
