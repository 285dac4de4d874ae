//! Account/session lifecycle.
//!
//! The session manager is the only component allowed to touch other
//! components' storage namespaces: it wipes and reinitializes the
//! session-scoped data set on registration, on login as a different
//! identity, and on logout. The account directory survives all of it.

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::config::Config;
use crate::confirm::{ConfirmationGate, ConfirmationPrompt};
use crate::directory::UserDirectory;
use crate::error::{AppError, AppResult};
use crate::ledger::MoodLedger;
use crate::models::account::Account;
use crate::notes::{Diary, Hopes};
use crate::notify::Notifier;
use crate::profile::ProfileStore;
use crate::store::{Store, KEY_ACCOUNTS, KEY_LOGGED_IN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { email: String },
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 254, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Everything scoped to the active identity: exactly one profile, one
/// ledger, one hopes collection, one diary at a time.
pub struct SessionScope {
    pub profile: ProfileStore,
    pub ledger: MoodLedger,
    pub hopes: Hopes,
    pub diary: Diary,
}

impl SessionScope {
    pub fn load(store: &Store, config: Arc<Config>, notices: Notifier) -> AppResult<Self> {
        Ok(Self {
            profile: ProfileStore::load(store.clone())?,
            ledger: MoodLedger::load(store.clone(), config, notices.clone())?,
            hopes: Hopes::load(store.clone())?,
            diary: Diary::load(store.clone(), notices)?,
        })
    }

    /// Rebinds the scope to `account`: profile copied from the account,
    /// every collection persisted empty.
    fn reset_for(&mut self, account: &Account) -> AppResult<()> {
        self.profile.reset_for(account)?;
        self.ledger.reset_persisted()?;
        self.hopes.reset_persisted()?;
        self.diary.reset_persisted()?;
        Ok(())
    }

    /// Cache-only reset, for after the persisted keys are already gone.
    fn clear_cached(&mut self) {
        self.profile.clear_cached();
        self.ledger.clear_cached();
        self.hopes.clear_cached();
        self.diary.clear_cached();
    }
}

pub struct SessionManager {
    store: Store,
    directory: UserDirectory,
    state: SessionState,
}

impl SessionManager {
    /// Derives the session state from storage: the logged-in flag plus the
    /// cached profile identity.
    pub fn load(store: Store, scope: &SessionScope) -> AppResult<Self> {
        let directory = UserDirectory::load(store.clone())?;
        let state = if store.get_flag(KEY_LOGGED_IN) {
            SessionState::LoggedIn {
                email: scope.profile.current().email.clone(),
            }
        } else {
            SessionState::LoggedOut
        };
        Ok(Self {
            store,
            directory,
            state,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Creates the account, scopes the session data to it, and logs in.
    pub fn register(&mut self, scope: &mut SessionScope, input: RegisterInput) -> AppResult<()> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if self.directory.contains(&input.email) {
            return Err(AppError::DuplicateAccount);
        }

        let account = Account {
            name: input.name,
            email: input.email,
            password: input.password,
        };
        self.directory.insert(account.clone())?;
        scope.reset_for(&account)?;
        self.store.set_flag(KEY_LOGGED_IN)?;
        self.state = SessionState::LoggedIn {
            email: account.email.clone(),
        };

        tracing::info!(email = %account.email, "account registered");
        Ok(())
    }

    /// Authenticates against the directory. Logging in as a different
    /// identity than the cached profile wipes every session-scoped
    /// namespace first; re-login as the same identity keeps the data.
    pub fn login(&mut self, scope: &mut SessionScope, input: LoginInput) -> AppResult<()> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let account = self
            .directory
            .find(&input.email)
            .ok_or(AppError::AccountNotFound)?
            .clone();
        if account.password != input.password {
            return Err(AppError::InvalidCredentials);
        }

        if scope.profile.current().email != account.email {
            self.store.clear_except(&[KEY_ACCOUNTS])?;
            scope.clear_cached();
            scope.reset_for(&account)?;
            tracing::info!(email = %account.email, "session data reset for new identity");
        }

        self.store.set_flag(KEY_LOGGED_IN)?;
        self.state = SessionState::LoggedIn {
            email: account.email,
        };
        Ok(())
    }

    /// Ends the session behind the confirmation gate. Confirming clears
    /// every session-scoped namespace; the account directory stays.
    pub async fn logout(
        &mut self,
        scope: &mut SessionScope,
        gate: &ConfirmationGate,
    ) -> AppResult<bool> {
        let confirmed = gate
            .confirm(ConfirmationPrompt::danger(
                "Confirm Logout",
                "Are you sure you want to exit your session? All local data will be cleared for security.",
                "Logout",
            ))
            .await;
        if !confirmed {
            return Ok(false);
        }

        self.store.clear_except(&[KEY_ACCOUNTS])?;
        scope.clear_cached();
        self.state = SessionState::LoggedOut;

        tracing::info!("logged out, session data cleared");
        Ok(true)
    }

    /// Stub recovery flow: no verification path exists, so a non-empty
    /// email always reports success.
    pub fn forgot_password(&self, email: &str) -> AppResult<()> {
        if email.is_empty() {
            return Err(AppError::Validation("Email is required".into()));
        }
        Ok(())
    }
}
