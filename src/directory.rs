use crate::error::{AppError, AppResult};
use crate::models::account::Account;
use crate::store::{Store, KEY_ACCOUNTS};

/// Registry of every registered account, keyed by email. Survives logout
/// and identity switches; nothing ever deletes from it.
pub struct UserDirectory {
    store: Store,
    accounts: Vec<Account>,
}

impl UserDirectory {
    pub fn load(store: Store) -> AppResult<Self> {
        let accounts = store.get(KEY_ACCOUNTS)?.unwrap_or_default();
        Ok(Self { store, accounts })
    }

    pub fn find(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    pub fn insert(&mut self, account: Account) -> AppResult<()> {
        if self.contains(&account.email) {
            return Err(AppError::DuplicateAccount);
        }
        self.accounts.push(account);
        if let Err(e) = self.store.set(KEY_ACCOUNTS, &self.accounts) {
            self.accounts.pop();
            return Err(e.into());
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
