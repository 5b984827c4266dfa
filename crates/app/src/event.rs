//! The UI event queue.
//!
//! Background tasks never touch screen state directly. They send a
//! `UiEvent` through the queue and the single consumer loop applies it
//! to the view models, so all mutation happens on the UI side
//! regardless of which task completed the work.

use tokio::sync::mpsc;

use tallybook_core::dashboard::DashboardKpi;
use tallybook_core::journal::TaxCode;
use tallybook_core::listing::ListingRow;
use tallybook_shared::Outcome;

use crate::entry_editor::SaveReport;
use crate::entry_list::BatchPostReport;
use crate::gateway::{AccountOption, EntrySummary};

/// An event delivered to the UI loop.
#[derive(Debug)]
pub enum UiEvent {
    /// The editor reference caches finished loading.
    ReferencesLoaded(Outcome<(Vec<AccountOption>, Vec<TaxCode>)>),
    /// A save (and optional post) completed.
    EntrySaved(SaveReport),
    /// A listing query completed.
    ListingLoaded(Outcome<Vec<ListingRow>>),
    /// A batch post completed.
    BatchPostCompleted(BatchPostReport),
    /// A reversal completed.
    EntryReversed(Outcome<EntrySummary>),
    /// A dashboard snapshot arrived.
    DashboardLoaded(Outcome<DashboardKpi>),
    /// A background task failed in an unexpected way.
    TaskFailed {
        /// What the task was doing, for the log and the error dialog.
        context: String,
        /// Generic user-facing message.
        message: String,
    },
}

/// Sending half of the event queue, cloned into background tasks.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventSender {
    /// Sends an event to the UI loop.
    ///
    /// A closed queue means the UI is shutting down; the event is
    /// dropped and logged rather than treated as an error.
    pub fn send(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("UI event queue closed, dropping event");
        }
    }
}

/// Receiving half of the event queue, owned by the UI loop.
#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl EventQueue {
    /// Creates the queue, returning the producer and consumer halves.
    #[must_use]
    pub fn channel() -> (EventSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSender { tx }, Self { rx })
    }

    /// Waits for the next event; `None` once every sender is dropped.
    pub async fn recv(&mut self) -> Option<UiEvent> {
        self.rx.recv().await
    }

    /// Returns the next event without waiting, if one is queued.
    pub fn try_recv(&mut self) -> Option<UiEvent> {
        self.rx.try_recv().ok()
    }
}
