use serde::{Deserialize, Serialize};

use crate::models::account::Account;

/// The active user's display profile. Overwritten wholesale whenever the
/// active identity changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    #[serde(rename = "lang")]
    pub language: Language,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Id,
    En,
}

impl Default for Language {
    fn default() -> Self {
        Self::Id
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Sahabat Mood".into(),
            email: "user@moodapp.com".into(),
            photo: None,
            language: Language::default(),
        }
    }
}

impl From<&Account> for Profile {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            photo: None,
            language: Language::default(),
        }
    }
}
