use serde::{Deserialize, Serialize};

/// Registered account record, keyed by email in the directory. Credentials
/// are stored as entered: this is a local, on-device demo-grade directory
/// with no hashing layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
}
