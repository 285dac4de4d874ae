use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::account::Account;
use crate::models::profile::{Language, Profile};
use crate::store::{Store, KEY_PROFILE};

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 254, message = "Email is required"))]
    pub email: String,

    pub language: Language,
}

/// The active user's display profile. Every successful mutation is
/// persisted before the cache changes.
pub struct ProfileStore {
    store: Store,
    profile: Profile,
}

impl ProfileStore {
    pub fn load(store: Store) -> AppResult<Self> {
        let profile = store.get(KEY_PROFILE)?.unwrap_or_default();
        Ok(Self { store, profile })
    }

    pub fn current(&self) -> &Profile {
        &self.profile
    }

    pub fn update(&mut self, input: ProfileUpdate) -> AppResult<()> {
        let input = ProfileUpdate {
            name: input.name.trim().to_owned(),
            email: input.email.trim().to_owned(),
            language: input.language,
        };
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut next = self.profile.clone();
        next.name = input.name;
        next.email = input.email;
        next.language = input.language;
        self.store.set(KEY_PROFILE, &next)?;
        self.profile = next;
        tracing::info!(email = %self.profile.email, "profile updated");
        Ok(())
    }

    /// Stores uploaded avatar data (a data-URL string from the capture UI).
    pub fn set_photo(&mut self, data: impl Into<String>) -> AppResult<()> {
        let mut next = self.profile.clone();
        next.photo = Some(data.into());
        self.store.set(KEY_PROFILE, &next)?;
        self.profile = next;
        Ok(())
    }

    /// Overwrites the profile wholesale with the account's identity: name
    /// and email copied, photo dropped, language back to default.
    pub(crate) fn reset_for(&mut self, account: &Account) -> AppResult<()> {
        let next = Profile::from(account);
        self.store.set(KEY_PROFILE, &next)?;
        self.profile = next;
        Ok(())
    }

    /// Cache-only reset, used after the session manager has already cleared
    /// the persisted key.
    pub(crate) fn clear_cached(&mut self) {
        self.profile = Profile::default();
    }
}
