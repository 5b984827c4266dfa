//! Background task scheduler.
//!
//! Long-running work (fetch, save, post, reverse) runs on spawned
//! tasks; the result crosses back to the UI loop as a `UiEvent`. A
//! panicking task is converted into a generic `TaskFailed` event, so
//! the UI never crashes with it. Overlapping triggers for the same
//! screen are not coordinated or cancelled; events arrive in
//! completion order.

use std::future::Future;

use crate::event::{EventSender, UiEvent};

/// Spawns background work and routes results onto the event queue.
#[derive(Debug, Clone)]
pub struct TaskScheduler {
    events: EventSender,
}

impl TaskScheduler {
    /// Creates a scheduler that delivers results through `events`.
    #[must_use]
    pub const fn new(events: EventSender) -> Self {
        Self { events }
    }

    /// Runs `task` on the runtime and sends its resulting event to the
    /// UI loop. If the task panics, a `TaskFailed` event is sent
    /// instead.
    pub fn spawn<F>(&self, context: impl Into<String>, task: F)
    where
        F: Future<Output = UiEvent> + Send + 'static,
    {
        let events = self.events.clone();
        let context = context.into();
        tokio::spawn(async move {
            match tokio::spawn(task).await {
                Ok(event) => events.send(event),
                Err(join_error) => {
                    tracing::error!(%context, error = %join_error, "background task failed");
                    events.send(UiEvent::TaskFailed {
                        context,
                        message: "An unexpected error occurred".to_string(),
                    });
                }
            }
        });
    }
}
