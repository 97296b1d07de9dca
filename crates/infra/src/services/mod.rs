use agenda_scheduler_domain::Event;
use tracing::info;

/// Sink that reminder notifications are delivered through. The reminder loop
/// emits through this seam so delivery stays an external concern.
pub trait INotifier: Send + Sync {
    fn notify(&self, event: &Event, message: &str);
}

/// Notifier that writes reminders to the log.
pub struct LogNotifier {}

impl INotifier for LogNotifier {
    fn notify(&self, event: &Event, message: &str) {
        info!(event_id = %event.id, "{}", message);
    }
}
