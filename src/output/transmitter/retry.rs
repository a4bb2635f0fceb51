use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

/// Decides whether a failed attempt gets another try.
pub trait RetryPolicy {
    /// `attempt` is 1 for the first failure. `None` gives up.
    fn next_delay(&self, attempt: u32, err: &Error) -> Option<Duration>;
}

/// Never retries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleAttempt;

impl RetryPolicy for SingleAttempt {
    fn next_delay(&self, _attempt: u32, _err: &Error) -> Option<Duration> {
        None
    }
}

/// Doubles the delay after each recoverable failure, up to `max_delay`,
/// for at most `max_attempts` attempts in total.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl ExponentialBackoff {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
        }
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32, err: &Error) -> Option<Duration> {
        if !err.is_recoverable() || attempt >= self.max_attempts {
            return None;
        }

        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        let delay = self
            .initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay);
        Some(delay.min(self.max_delay))
    }
}

pub fn retry<T, F>(policy: &dyn RetryPolicy, op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    retry_with_sleep(policy, std::thread::sleep, op)
}

pub fn retry_with_sleep<T, F, S>(policy: &dyn RetryPolicy, mut sleep: S, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
    S: FnMut(Duration),
{
    let mut attempt = 1;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(err) => match policy.next_delay(attempt, &err) {
                Some(delay) => {
                    warn!(attempt, ?delay, "attempt failed, retrying: {}", err);
                    sleep(delay);
                    attempt += 1;
                }
                None => return Err(err),
            },
        }
    }
}
