//! Bounded retry policy
//!
//! Used for the roster reload that follows a successful delete. The number
//! of attempts is always capped, and errors the caller deems permanent end
//! the run early.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Spacing between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    #[default]
    Fixed,
    Exponential,
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    #[serde(with = "duration_ms")]
    pub delay: Duration,
    #[serde(default)]
    pub backoff: Backoff,
    /// Ceiling for exponential growth.
    #[serde(with = "duration_ms", default = "default_max_delay")]
    pub max_delay: Duration,
}

fn default_max_delay() -> Duration {
    Duration::from_secs(5)
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_millis(500))
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff: Backoff::Fixed,
            max_delay: default_max_delay(),
        }
    }

    pub fn exponential(max_attempts: u32, delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff: Backoff::Exponential,
            max_delay,
        }
    }

    /// Pause before attempt `attempt` (1-based). The first attempt never waits.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let factor = 2u32.saturating_pow(attempt - 2);
                self.delay.saturating_mul(factor).min(self.max_delay)
            }
        }
    }

    /// Run `op` until it succeeds, the attempts run out, or it fails with an
    /// error `should_retry` rejects. Calls `pause` between attempts and
    /// returns the last error.
    pub async fn run<T, E, Op, OpFut, Retry, Pause, PauseFut>(
        &self,
        mut op: Op,
        should_retry: Retry,
        mut pause: Pause,
    ) -> Result<T, E>
    where
        Op: FnMut(u32) -> OpFut,
        OpFut: Future<Output = Result<T, E>>,
        Retry: Fn(&E) -> bool,
        Pause: FnMut(Duration) -> PauseFut,
        PauseFut: Future<Output = ()>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.max_attempts => return Err(err),
                Err(err) if !should_retry(&err) => {
                    log::warn!("attempt {} failed and will not be retried: {}", attempt, err);
                    return Err(err);
                }
                Err(err) => {
                    log::warn!(
                        "attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        err
                    );
                    attempt += 1;
                    pause(self.delay_before(attempt)).await;
                }
            }
        }
    }
}

pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[test]
    fn test_fixed_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_millis(500));
        assert_eq!(policy.delay_before(3), Duration::from_millis(500));
    }

    #[test]
    fn test_exponential_is_capped() {
        let policy = RetryPolicy::exponential(
            6,
            Duration::from_millis(500),
            Duration::from_millis(3000),
        );
        assert_eq!(policy.delay_before(2), Duration::from_millis(500));
        assert_eq!(policy.delay_before(3), Duration::from_millis(1000));
        assert_eq!(policy.delay_before(4), Duration::from_millis(2000));
        assert_eq!(policy.delay_before(5), Duration::from_millis(3000));
    }

    #[test]
    fn test_run_stops_at_max_attempts() {
        let policy = RetryPolicy::default();
        let calls = RefCell::new(0);
        let pauses = RefCell::new(Vec::new());

        let result: Result<(), String> = block_on(policy.run(
            |_| {
                *calls.borrow_mut() += 1;
                async { Err("roster unavailable".to_string()) }
            },
            |_| true,
            |d| {
                pauses.borrow_mut().push(d);
                async {}
            },
        ));

        assert_eq!(result, Err("roster unavailable".to_string()));
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(*pauses.borrow(), vec![Duration::from_millis(500); 2]);
    }

    #[test]
    fn test_run_returns_first_success() {
        let policy = RetryPolicy::default();
        let result: Result<u32, String> = block_on(policy.run(
            |attempt| async move {
                if attempt < 2 {
                    Err("flaky".to_string())
                } else {
                    Ok(attempt)
                }
            },
            |_| true,
            |_| async {},
        ));
        assert_eq!(result, Ok(2));
    }

    #[test]
    fn test_run_stops_on_permanent_error() {
        let policy = RetryPolicy::default();
        let calls = RefCell::new(0);
        let pauses = RefCell::new(0);

        let result: Result<(), String> = block_on(policy.run(
            |_| {
                *calls.borrow_mut() += 1;
                async { Err("bad request".to_string()) }
            },
            |err: &String| err != "bad request",
            |_| {
                *pauses.borrow_mut() += 1;
                async {}
            },
        ));

        assert_eq!(result, Err("bad request".to_string()));
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(*pauses.borrow(), 0);
    }

    #[test]
    fn test_policy_deserializes_from_millis() {
        let policy: RetryPolicy =
            serde_json::from_str(r#"{"max_attempts":4,"delay":250,"backoff":"exponential"}"#)
                .expect("valid policy");
        assert_eq!(policy.delay, Duration::from_millis(250));
        assert_eq!(policy.backoff, Backoff::Exponential);
        assert_eq!(policy.max_delay, Duration::from_secs(5));
    }
}
