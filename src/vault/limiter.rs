//! Failed-attempt rate limiter with exponential backoff.
//!
//! Wraps the unlock protocol with a cooldown state machine:
//!
//!   Idle -> Attempting -> (success: Idle)
//!                       | (failure: BackoffAccumulating
//!                            -> [5 failures] -> Blocked(until T) -> Idle)
//!
//! While blocked, attempts are rejected *before* any key derivation
//! happens, so the KDF cost cannot be used as a timing oracle and no
//! CPU is burned on attempts that would be refused anyway.
//!
//! State lives in memory only and resets on process restart.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Failures tolerated before a block cycle starts.
pub const MAX_ATTEMPTS_BEFORE_BLOCK: u32 = 5;

/// First backoff step: 5 seconds.
pub const BASE_DELAY_MS: u64 = 5_000;

/// Backoff ceiling: 5 minutes.
pub const MAX_DELAY_MS: u64 = 5 * 60 * 1000;

/// Mutable attempt-tracking state. Fully reset on any successful unlock.
#[derive(Debug, Default)]
struct AttemptState {
    failure_count: u32,
    last_attempt: Option<Instant>,
    blocked_until: Option<Instant>,
}

/// Gate in front of the unlock protocol.
///
/// An explicitly constructed instance rather than process-global state,
/// so tests (and any future multi-session embedder) get isolated
/// counters.  All transitions run under one mutex, so a double-submit
/// race cannot skip past the 5-strikes threshold.
#[derive(Debug, Default)]
pub struct RateLimiter {
    state: Mutex<AttemptState>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// If a block is active, returns the remaining wait in milliseconds.
    ///
    /// Callers must consult this *before* invoking the real unlock and
    /// reject immediately when it returns `Some`.
    pub fn blocked_wait_ms(&self) -> Option<u64> {
        let state = self.lock();
        match state.blocked_until {
            Some(until) => {
                let now = Instant::now();
                if now < until {
                    Some(duration_ms(until - now))
                } else {
                    None
                }
            }
            None => None,
        }
    }

    /// Record a failed attempt and return the backoff for it.
    ///
    /// Below the threshold the returned wait is informational only; at
    /// the threshold a block cycle starts and the counter resets (one
    /// block cycle consumed).  Errors from the underlying unlock count
    /// the same as a wrong password.
    pub fn record_failure(&self) -> u64 {
        let mut state = self.lock();
        let now = Instant::now();

        state.failure_count += 1;
        state.last_attempt = Some(now);

        let delay_ms = backoff_ms(state.failure_count);
        if state.failure_count >= MAX_ATTEMPTS_BEFORE_BLOCK {
            state.blocked_until = Some(now + Duration::from_millis(delay_ms));
            state.failure_count = 0;
        }

        delay_ms
    }

    /// Reset all attempt state after a successful unlock.
    pub fn record_success(&self) {
        *self.lock() = AttemptState::default();
    }

    fn lock(&self) -> MutexGuard<'_, AttemptState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Exponential backoff: `BASE * 2^(count-1)`, capped at `MAX_DELAY_MS`.
fn backoff_ms(failure_count: u32) -> u64 {
    let exponent = failure_count.saturating_sub(1).min(16);
    BASE_DELAY_MS
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS)
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff_ms(1), 5_000);
        assert_eq!(backoff_ms(2), 10_000);
        assert_eq!(backoff_ms(3), 20_000);
        assert_eq!(backoff_ms(4), 40_000);
        assert_eq!(backoff_ms(5), 80_000);
        // Far past the cap.
        assert_eq!(backoff_ms(12), MAX_DELAY_MS);
        assert_eq!(backoff_ms(100), MAX_DELAY_MS);
    }

    #[test]
    fn not_blocked_initially() {
        let limiter = RateLimiter::new();
        assert_eq!(limiter.blocked_wait_ms(), None);
    }

    #[test]
    fn failures_below_threshold_do_not_block() {
        let limiter = RateLimiter::new();
        for _ in 0..MAX_ATTEMPTS_BEFORE_BLOCK - 1 {
            let wait = limiter.record_failure();
            assert!(wait > 0, "backoff is reported informationally");
            assert_eq!(limiter.blocked_wait_ms(), None);
        }
    }

    #[test]
    fn fifth_failure_starts_a_block() {
        let limiter = RateLimiter::new();
        for _ in 0..MAX_ATTEMPTS_BEFORE_BLOCK {
            limiter.record_failure();
        }

        let wait = limiter.blocked_wait_ms().expect("must be blocked");
        assert!(wait > 0);
        // The fifth failure carries the 5th backoff step (80s), so the
        // remaining wait is close to that.
        assert!(wait <= 80_000);
    }

    #[test]
    fn success_resets_everything() {
        let limiter = RateLimiter::new();
        for _ in 0..MAX_ATTEMPTS_BEFORE_BLOCK {
            limiter.record_failure();
        }
        assert!(limiter.blocked_wait_ms().is_some());

        limiter.record_success();
        assert_eq!(limiter.blocked_wait_ms(), None);

        // Counter restarted from zero: next failure reports the base delay.
        assert_eq!(limiter.record_failure(), BASE_DELAY_MS);
    }

    #[test]
    fn counter_resets_when_block_starts() {
        let limiter = RateLimiter::new();
        for _ in 0..MAX_ATTEMPTS_BEFORE_BLOCK {
            limiter.record_failure();
        }

        // One block cycle consumed the counter; the next failure is
        // counted as the first of a fresh cycle.
        assert_eq!(limiter.record_failure(), BASE_DELAY_MS);
    }

    #[test]
    fn concurrent_failures_all_counted() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new());
        let handles: Vec<_> = (0..MAX_ATTEMPTS_BEFORE_BLOCK)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    limiter.record_failure();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Five racing failures must still trip the threshold.
        assert!(limiter.blocked_wait_ms().is_some());
    }
}
