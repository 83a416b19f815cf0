// Bounded fixed-interval polling
//
// The loop shared by the task poller and the artifact fetcher: call a
// check up to `max_attempts` times, sleeping `interval` between attempts,
// and stop at the first ready value. A check can also fail fatally,
// which ends the loop at once.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Retry budget for one poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    /// Waiting for a task to name its result.
    pub const TASK: Self = Self::new(12, Duration::from_secs(2));
    /// Fetching a result that has already been named.
    pub const ARTIFACT: Self = Self::new(6, Duration::from_secs(2));

    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Upper bound on time spent sleeping, excluding request latency.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

/// Outcome of one check.
#[derive(Debug)]
pub enum Check<T> {
    Ready(T),
    /// Not there yet; the string says why.
    Pending(String),
}

/// A value obtained by polling, with the attempt it arrived on.
#[derive(Debug)]
pub struct Polled<T> {
    pub value: T,
    pub attempts: u32,
}

impl<T> Polled<T> {
    /// Sleeps performed before the value arrived.
    pub fn sleeps(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

#[derive(Debug)]
pub enum PollError<E> {
    /// The check failed in a way that retrying cannot fix.
    Fatal(E),
    /// Every attempt came back pending.
    Exhausted { attempts: u32, last_reason: String },
}

/// Run `check` until it is ready, fails fatally, or the budget is spent.
///
/// The check receives the 1-based attempt number. No sleep follows the
/// last attempt.
pub async fn poll_until<T, E, F, Fut>(
    policy: PollPolicy,
    label: &str,
    mut check: F,
) -> Result<Polled<T>, PollError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Check<T>, E>>,
{
    let mut last_reason = String::from("no attempt made");

    for attempt in 1..=policy.max_attempts {
        match check(attempt).await.map_err(PollError::Fatal)? {
            Check::Ready(value) => {
                debug!(label, attempt, "poll resolved");
                return Ok(Polled {
                    value,
                    attempts: attempt,
                });
            }
            Check::Pending(reason) => {
                if attempt < policy.max_attempts {
                    warn!(
                        label,
                        attempt,
                        max_attempts = policy.max_attempts,
                        %reason,
                        "not ready, trying again in {:?}",
                        policy.interval
                    );
                    tokio::time::sleep(policy.interval).await;
                } else {
                    warn!(label, attempt, %reason, "not ready, giving up");
                }
                last_reason = reason;
            }
        }
    }

    Err(PollError::Exhausted {
        attempts: policy.max_attempts,
        last_reason,
    })
}
