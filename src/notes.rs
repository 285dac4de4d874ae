//! The two journaling collections: hope messages and diary entries.
//!
//! Both prepend on add (most-recent-first) and delete by id. Diary deletion
//! is the destructive one and goes through the confirmation gate; hope
//! deletion is immediate.

use chrono::Local;

use crate::confirm::{ConfirmationGate, ConfirmationPrompt};
use crate::error::{AppError, AppResult};
use crate::models::note::{long_display_date, short_display_date, DiaryEntry, Hope};
use crate::notify::Notifier;
use crate::store::{Store, KEY_DIARY, KEY_HOPES};

pub struct Hopes {
    store: Store,
    items: Vec<Hope>,
}

impl Hopes {
    pub fn load(store: Store) -> AppResult<Self> {
        let items = store.get(KEY_HOPES)?.unwrap_or_default();
        Ok(Self { store, items })
    }

    /// Prepends a new hope. Empty text after trimming is rejected before
    /// anything is written.
    pub fn add(&mut self, text: &str) -> AppResult<&Hope> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Hope text is required".into()));
        }

        let now = Local::now();
        self.items.insert(
            0,
            Hope {
                id: now.timestamp_millis(),
                text: text.to_owned(),
                date: short_display_date(now),
            },
        );
        if let Err(e) = self.store.set(KEY_HOPES, &self.items) {
            self.items.remove(0);
            return Err(e.into());
        }
        Ok(&self.items[0])
    }

    /// Removes the hope with the matching id, if any. No confirmation.
    pub fn delete(&mut self, id: i64) -> AppResult<bool> {
        let Some(pos) = self.items.iter().position(|h| h.id == id) else {
            return Ok(false);
        };
        let removed = self.items.remove(pos);
        if let Err(e) = self.store.set(KEY_HOPES, &self.items) {
            self.items.insert(pos, removed);
            return Err(e.into());
        }
        Ok(true)
    }

    pub fn latest_preview(&self) -> String {
        match self.items.first() {
            Some(hope) => format!("\"{}\"", hope.text),
            None => "Belum ada pesan...".into(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hope> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn reset_persisted(&mut self) -> AppResult<()> {
        self.store.set(KEY_HOPES, &Vec::<Hope>::new())?;
        self.items.clear();
        Ok(())
    }

    pub(crate) fn clear_cached(&mut self) {
        self.items.clear();
    }
}

pub struct Diary {
    store: Store,
    notices: Notifier,
    items: Vec<DiaryEntry>,
}

impl Diary {
    pub fn load(store: Store, notices: Notifier) -> AppResult<Self> {
        let items = store.get(KEY_DIARY)?.unwrap_or_default();
        Ok(Self {
            store,
            notices,
            items,
        })
    }

    /// Prepends a new entry. Both fields are required after trimming.
    pub fn add(&mut self, title: &str, content: &str) -> AppResult<&DiaryEntry> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(AppError::Validation(
                "Diary title and content are required".into(),
            ));
        }

        let now = Local::now();
        self.items.insert(
            0,
            DiaryEntry {
                id: now.timestamp_millis(),
                title: title.to_owned(),
                content: content.to_owned(),
                date: long_display_date(now),
            },
        );
        if let Err(e) = self.store.set(KEY_DIARY, &self.items) {
            self.items.remove(0);
            return Err(e.into());
        }
        Ok(&self.items[0])
    }

    /// Deletes an entry behind the confirmation gate. Cancel leaves the
    /// collection untouched.
    pub async fn delete(&mut self, id: i64, gate: &ConfirmationGate) -> AppResult<bool> {
        let confirmed = gate
            .confirm(ConfirmationPrompt::danger(
                "Delete Entry",
                "Are you sure you want to permanently delete this journal entry?",
                "Delete",
            ))
            .await;
        if !confirmed {
            return Ok(false);
        }

        let Some(pos) = self.items.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let removed = self.items.remove(pos);
        if let Err(e) = self.store.set(KEY_DIARY, &self.items) {
            self.items.insert(pos, removed);
            return Err(e.into());
        }
        self.notices.success("Deleted", "Entry removed successfully");
        Ok(true)
    }

    pub fn latest_preview(&self) -> String {
        match self.items.first() {
            Some(entry) => format!("\"{}: {}\"", entry.title, entry.content),
            None => "Belum ada catatan...".into(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiaryEntry> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn reset_persisted(&mut self) -> AppResult<()> {
        self.store.set(KEY_DIARY, &Vec::<DiaryEntry>::new())?;
        self.items.clear();
        Ok(())
    }

    pub(crate) fn clear_cached(&mut self) {
        self.items.clear();
    }
}
