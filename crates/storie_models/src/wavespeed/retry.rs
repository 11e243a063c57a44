//! Backoff schedule for rate-limited image requests.

use std::time::Duration;

/// Waits between attempts: `step`, `2 * step`, ... for `max_attempts - 1` waits.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storie_models::linear_backoff;
///
/// let waits: Vec<_> = linear_backoff(3, Duration::from_millis(2000)).collect();
/// assert_eq!(waits, vec![Duration::from_millis(2000), Duration::from_millis(4000)]);
/// ```
pub fn linear_backoff(max_attempts: usize, step: Duration) -> impl Iterator<Item = Duration> {
    (1..max_attempts.max(1)).map(move |n| step.saturating_mul(n as u32))
}
