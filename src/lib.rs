//! # MoodLens
//!
//! Local-first mood-tracking core: on-device accounts, a session-scoped
//! data set (profile, mood ledger, hope and diary collections), and the
//! derived trend metrics behind the dashboard. Presentation concerns —
//! rendering, charting toolkits, camera devices, toasts and modals — sit
//! behind collaborator interfaces (`ChartSurface`, `CameraSource`, the
//! confirmation gate, and the notification channel).
//!
//! All state is derived from a flat key-value store, so reconstructing
//! [`App`] over the same store always reproduces the previous session.

pub mod app;
pub mod breath;
pub mod charts;
pub mod config;
pub mod confirm;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod models;
pub mod notes;
pub mod notify;
pub mod profile;
pub mod scanner;
pub mod session;
pub mod store;

pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult, MediaAccessError};
pub use store::Store;

/// Initialize structured logging for embedding shells and integration
/// tests. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodlens=debug".into()),
        )
        .json()
        .init();
}
