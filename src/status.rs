use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const STATUS_MESSAGES: [&str; 6] = [
    "Analyzing fabric texture...",
    "Detecting clothing geometry...",
    "Setting up studio lighting...",
    "Directing the model...",
    "Applying photorealistic render...",
    "Final polishing...",
];

/// Rotates a cosmetic status line while a generation is in flight.
/// Dropping the ticker aborts its task.
pub struct StatusTicker {
    handle: JoinHandle<()>,
}

impl StatusTicker {
    pub fn start(sender: Arc<watch::Sender<&'static str>>, period: Duration) -> Self {
        sender.send_replace(STATUS_MESSAGES[0]);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // first tick completes immediately
            interval.tick().await;
            let mut index = 0;
            loop {
                interval.tick().await;
                index = (index + 1) % STATUS_MESSAGES.len();
                sender.send_replace(STATUS_MESSAGES[index]);
            }
        });

        Self { handle }
    }

    pub fn stop(self) {}
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
