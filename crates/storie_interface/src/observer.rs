//! Progress observation.

use storie_core::GenerationEvent;

/// Receives generation events as they happen.
///
/// Observers cannot influence the job; `on_event` is called inline, so
/// implementations should return quickly.
pub trait GenerationObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &GenerationEvent);
}
