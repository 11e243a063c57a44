//! Built-in generation observers.

use storie_core::GenerationEvent;
use storie_interface::GenerationObserver;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, error, info, warn};

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_event(&self, _event: &GenerationEvent) {}
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn on_event(&self, event: &GenerationEvent) {
        match event {
            GenerationEvent::PageFailed {
                page_number,
                reason,
            } => warn!(page_number, reason = %reason, "{}", event),
            GenerationEvent::Failed { reason } => error!(reason = %reason, "{}", event),
            GenerationEvent::PageStarted { page_number } => debug!(page_number, "{}", event),
            _ => info!("{}", event),
        }
    }
}

/// Forwards events to a channel; a closed receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UnboundedSender<GenerationEvent>,
}

impl ChannelObserver {
    /// Observer sending into `sender`.
    pub fn new(sender: UnboundedSender<GenerationEvent>) -> Self {
        Self { sender }
    }

    /// Observer plus the receiving half of a fresh channel.
    pub fn channel() -> (Self, UnboundedReceiver<GenerationEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl GenerationObserver for ChannelObserver {
    fn on_event(&self, event: &GenerationEvent) {
        if self.sender.send(event.clone()).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
