//! Delay policies between readiness attempts

use rand::Rng;
use std::time::Duration;

/// How the delay between two attempts evolves.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Every attempt waits the base interval
    Fixed,
    /// Each delay is the previous one times `multiplier`, capped at `max_delay`
    Exponential {
        multiplier: f64,
        max_delay: Duration,
        /// Add random jitter to each delay (±30%)
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Fixed
    }
}

impl Backoff {
    /// Delay to use after `current`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        match self {
            Backoff::Fixed => current,
            Backoff::Exponential {
                multiplier,
                max_delay,
                ..
            } => Duration::from_millis(
                ((current.as_millis() as f64 * multiplier).min(max_delay.as_millis() as f64))
                    as u64,
            ),
        }
    }

    /// The delay actually slept, with jitter applied when enabled.
    pub fn effective_delay(&self, base: Duration) -> Duration {
        match self {
            Backoff::Exponential { jitter: true, .. } => {
                let mut rng = rand::thread_rng();
                let jitter_factor = 1.0 + rng.gen_range(-0.3..0.3);
                Duration::from_millis((base.as_millis() as f64 * jitter_factor) as u64)
            }
            _ => base,
        }
    }

    /// Sum of the un-jittered delays for `attempts` attempts starting at `interval`.
    pub fn total_budget(&self, interval: Duration, attempts: u32) -> Duration {
        let mut delay = interval;
        let mut total = Duration::ZERO;
        for _ in 0..attempts {
            total += delay;
            delay = self.next_delay(delay);
        }
        total
    }
}
