//! UI-facing application layer.
//!
//! This crate sits between the widgets and the database: background
//! work runs on spawned tasks, results cross back to the single UI
//! loop through the event queue, and the view models own all screen
//! state. No widget code lives here.

pub mod dashboard;
pub mod entry_editor;
pub mod entry_list;
pub mod event;
pub mod gateway;
pub mod tasks;

pub use dashboard::DashboardModel;
pub use entry_editor::{EditorMode, EntryEditorModel, SaveReport};
pub use entry_list::{BatchPostReport, EntryListModel};
pub use event::{EventQueue, EventSender, UiEvent};
pub use gateway::{AccountOption, DashboardGateway, DbGateway, EntrySummary, JournalEntryGateway};
pub use tasks::TaskScheduler;
