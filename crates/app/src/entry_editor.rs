//! View model for the journal entry editor dialog.
//!
//! Owns the grid state and the per-session reference caches. Local
//! validation always runs before the gateway is called; a failed local
//! check never produces a network/database round trip.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use tallybook_core::journal::EntryEditor;
use tallybook_shared::Outcome;

use crate::gateway::{AccountOption, EntrySummary, JournalEntryGateway};

/// What the editor was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Creating a new entry.
    New,
    /// Editing an existing Draft.
    Edit(Uuid),
    /// Viewing an entry read-only.
    View(Uuid),
}

/// Result of a save (and optional post) flow.
///
/// A save-and-post can partially succeed: the draft was persisted but
/// the post step failed. `saved` is set in that case and `errors`
/// carries the post failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// The persisted entry, when the save step succeeded.
    pub saved: Option<EntrySummary>,
    /// Whether the post step succeeded.
    pub posted: bool,
    /// Errors from whichever step failed.
    pub errors: Vec<String>,
}

impl SaveReport {
    /// True when everything requested succeeded.
    #[must_use]
    pub fn is_full_success(&self) -> bool {
        self.saved.is_some() && self.errors.is_empty()
    }
}

/// View model for one editor dialog session.
pub struct EntryEditorModel {
    gateway: Arc<dyn JournalEntryGateway>,
    mode: EditorMode,
    editor: EntryEditor,
    accounts: Vec<AccountOption>,
    read_only: bool,
    user: Uuid,
}

impl EntryEditorModel {
    /// Opens the editor for a new entry dated today.
    ///
    /// Loads the reference caches once; their failure aborts the open.
    pub async fn open_new(
        gateway: Arc<dyn JournalEntryGateway>,
        user: Uuid,
        base_currency: &str,
        today: NaiveDate,
    ) -> Outcome<Self> {
        let (accounts, tax_codes) = match gateway.load_references().await {
            Outcome::Success(caches) => caches,
            Outcome::Failure(errors) => return Outcome::Failure(errors),
        };

        let mut editor = EntryEditor::new(today, base_currency);
        editor.set_tax_codes(tax_codes);
        Outcome::ok(Self {
            gateway,
            mode: EditorMode::New,
            editor,
            accounts,
            read_only: false,
            user,
        })
    }

    /// Opens the editor on an existing entry.
    ///
    /// The editor is read-only when explicitly requested or when the
    /// entry is no longer a draft.
    pub async fn open_existing(
        gateway: Arc<dyn JournalEntryGateway>,
        user: Uuid,
        base_currency: &str,
        id: Uuid,
        view_only: bool,
    ) -> Outcome<Self> {
        let (accounts, tax_codes) = match gateway.load_references().await {
            Outcome::Success(caches) => caches,
            Outcome::Failure(errors) => return Outcome::Failure(errors),
        };
        let entry = match gateway.get_entry(id).await {
            Outcome::Success(entry) => entry,
            Outcome::Failure(errors) => return Outcome::Failure(errors),
        };

        let read_only = view_only || !entry.status.can_edit();
        let mode = if read_only {
            EditorMode::View(id)
        } else {
            EditorMode::Edit(id)
        };
        let mut editor = EntryEditor::from_entry(&entry, base_currency);
        editor.set_tax_codes(tax_codes);
        Outcome::ok(Self {
            gateway,
            mode,
            editor,
            accounts,
            read_only,
            user,
        })
    }

    /// The editor mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Whether every edit control is disabled.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The selectable accounts cache.
    #[must_use]
    pub fn accounts(&self) -> &[AccountOption] {
        &self.accounts
    }

    /// The grid state, for display.
    #[must_use]
    pub const fn editor(&self) -> &EntryEditor {
        &self.editor
    }

    /// The grid state for mutation; `None` when the editor is
    /// read-only, which is how edit handlers are gated.
    pub fn editor_mut(&mut self) -> Option<&mut EntryEditor> {
        if self.read_only {
            None
        } else {
            Some(&mut self.editor)
        }
    }

    /// Saves the entry as a Draft.
    ///
    /// After a successful create the model switches to editing the
    /// persisted entry, so a second save updates instead of creating a
    /// duplicate.
    pub async fn save_draft(&mut self) -> Outcome<EntrySummary> {
        if self.read_only {
            return Outcome::fail("Entry is read-only");
        }
        let input = match self.editor.collect(self.user) {
            Ok(input) => input,
            Err(errors) => return Outcome::fail_all(errors),
        };

        let outcome = match self.mode {
            EditorMode::New => self.gateway.create_entry(input).await,
            EditorMode::Edit(id) => self.gateway.update_entry(id, input).await,
            EditorMode::View(_) => return Outcome::fail("Entry is read-only"),
        };

        if let Outcome::Success(summary) = &outcome {
            self.mode = EditorMode::Edit(summary.id);
        }
        outcome
    }

    /// Saves the entry and posts it.
    ///
    /// When the save succeeds but the post fails, the report carries
    /// the saved draft alongside the post errors so the dialog can say
    /// exactly what happened.
    pub async fn save_and_post(&mut self) -> SaveReport {
        let saved = match self.save_draft().await {
            Outcome::Success(summary) => summary,
            Outcome::Failure(errors) => {
                return SaveReport {
                    saved: None,
                    posted: false,
                    errors,
                }
            }
        };

        match self.gateway.post_entry(saved.id, self.user).await {
            Outcome::Success(posted) => {
                self.read_only = true;
                self.mode = EditorMode::View(posted.id);
                SaveReport {
                    saved: Some(posted),
                    posted: true,
                    errors: Vec::new(),
                }
            }
            Outcome::Failure(errors) => SaveReport {
                saved: Some(saved),
                posted: false,
                errors,
            },
        }
    }
}
