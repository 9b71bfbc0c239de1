use super::QueryEvent;
use tokio::sync::mpsc;

/// Non-blocking event emitter for query events.
///
/// Uses a bounded channel and `try_send`: when the consumer falls behind the
/// event is dropped instead of stalling the query path. Logging is best-effort.
#[derive(Clone)]
pub struct QueryEventEmitter {
    /// `None` turns `emit()` into a no-op.
    sender: Option<mpsc::Sender<QueryEvent>>,
}

impl QueryEventEmitter {
    /// Creates a disabled emitter.
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    /// Creates an enabled emitter and the receiver for its consumer task.
    pub fn new_enabled(capacity: usize) -> (Self, mpsc::Receiver<QueryEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { sender: Some(tx) }, rx)
    }

    /// Emits an event, never awaiting. Returns false when the event was dropped.
    pub fn emit(&self, event: QueryEvent) -> bool {
        match self.sender {
            Some(ref tx) => tx.try_send(event).is_ok(),
            None => false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl Default for QueryEventEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for QueryEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEventEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
