//! The application controller: owns the session manager, the
//! session-scoped components, and the presentation-side channels. Every
//! cache it holds is derived from storage, so constructing a fresh `App`
//! over the same store reproduces the exact same state — that is the
//! "full reload" the registration flow relies on.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::broadcast;

use crate::charts::{ChartId, ChartKind, ChartSpec, ChartStyle, ChartSurface};
use crate::config::Config;
use crate::confirm::ConfirmationGate;
use crate::error::{AppError, AppResult};
use crate::ledger::MoodLedger;
use crate::models::mood::MoodDistribution;
use crate::models::profile::Profile;
use crate::notes::{Diary, Hopes};
use crate::notify::{Notification, Notifier};
use crate::profile::ProfileUpdate;
use crate::scanner::{CameraSource, ScanSession};
use crate::session::{LoginInput, RegisterInput, SessionManager, SessionScope, SessionState};
use crate::store::Store;

const DAILY_TIPS: [&str; 5] = [
    "Healing takes time, and asking for help is a superpower.",
    "Your emotions are valid. Give yourself permission to feel.",
    "One small step today is progress for tomorrow.",
    "You are doing better than you think. Keep going.",
    "Self-care is not selfish; it is essential for resilience.",
];

pub struct App {
    config: Arc<Config>,
    session: SessionManager,
    scope: SessionScope,
    notices: Notifier,
    gate: ConfirmationGate,
}

impl App {
    /// Derives every cache from storage.
    pub fn load(config: Config, store: Store, gate: ConfirmationGate) -> AppResult<Self> {
        let config = Arc::new(config);
        let notices = Notifier::new();
        let scope = SessionScope::load(&store, config.clone(), notices.clone())?;
        let session = SessionManager::load(store, &scope)?;
        Ok(Self {
            config,
            session,
            scope,
            notices,
            gate,
        })
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notification> {
        self.notices.subscribe()
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn profile(&self) -> &Profile {
        self.scope.profile.current()
    }

    pub fn ledger(&self) -> &MoodLedger {
        &self.scope.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut MoodLedger {
        &mut self.scope.ledger
    }

    pub fn hopes(&self) -> &Hopes {
        &self.scope.hopes
    }

    pub fn hopes_mut(&mut self) -> &mut Hopes {
        &mut self.scope.hopes
    }

    pub fn diary(&self) -> &Diary {
        &self.scope.diary
    }

    pub fn register(&mut self, input: RegisterInput) -> AppResult<()> {
        let result = self.session.register(&mut self.scope, input);
        if let Err(e) = &result {
            match e {
                AppError::DuplicateAccount => {
                    self.notices.error("Register Failed", &e.to_string());
                }
                AppError::Validation(message) => {
                    self.notices.warning("Validation Error", message);
                }
                _ => {}
            }
        }
        result
    }

    pub fn login(&mut self, input: LoginInput) -> AppResult<()> {
        let result = self.session.login(&mut self.scope, input);
        if let Err(e) = &result {
            if matches!(
                e,
                AppError::AccountNotFound | AppError::InvalidCredentials
            ) {
                self.notices.error("Login Failed", &e.to_string());
            }
        }
        result
    }

    /// Confirms, then clears everything but the account directory.
    pub async fn logout(&mut self) -> AppResult<bool> {
        self.session.logout(&mut self.scope, &self.gate).await
    }

    pub fn forgot_password(&mut self, email: &str) -> AppResult<()> {
        self.session.forgot_password(email)?;
        self.notices
            .success("Email Sent", "Recovery instructions have been sent");
        Ok(())
    }

    pub fn save_profile(&mut self, update: ProfileUpdate) -> AppResult<()> {
        match self.scope.profile.update(update) {
            Ok(()) => {
                self.notices
                    .success("Profile Updated", "Profile saved successfully");
                Ok(())
            }
            Err(e) => {
                if let AppError::Validation(message) = &e {
                    self.notices.warning("Required Fields", message);
                }
                Err(e)
            }
        }
    }

    pub fn set_profile_photo(&mut self, data: impl Into<String>) -> AppResult<()> {
        self.scope.profile.set_photo(data)
    }

    pub async fn open_scan(&self, camera: &impl CameraSource) -> ScanSession {
        ScanSession::begin(camera, &self.config).await
    }

    pub async fn delete_diary_entry(&mut self, id: i64) -> AppResult<bool> {
        self.scope.diary.delete(id, &self.gate).await
    }

    pub fn add_diary_entry(&mut self, title: &str, content: &str) -> AppResult<()> {
        self.scope.diary.add(title, content).map(|_| ())
    }

    /// Issues the four-chart trend set to the visualization surface: score
    /// line, score bars, the all-time distribution pie, and the wave area.
    pub fn refresh_trends(&self, surface: &mut impl ChartSurface) {
        let series = self.scope.ledger.trend_series();

        surface.render(ChartSpec {
            id: ChartId::MoodLine,
            kind: ChartKind::Line,
            labels: series.labels.clone(),
            values: series.values.clone(),
            style: ChartStyle {
                stroke: Some("#3b82f6".into()),
                fills: vec!["rgba(59, 130, 246, 0.05)".into()],
                filled_area: true,
                tension: 0.4,
                ..ChartStyle::default()
            },
        });

        surface.render(ChartSpec {
            id: ChartId::MoodBar,
            kind: ChartKind::Bar,
            labels: series.labels.clone(),
            values: series.values.clone(),
            style: ChartStyle {
                fills: vec!["#3b82f6".into()],
                corner_radius: 8,
                ..ChartStyle::default()
            },
        });

        let buckets = self.scope.ledger.distribution();
        surface.render(ChartSpec {
            id: ChartId::Distribution,
            kind: ChartKind::Pie,
            labels: MoodDistribution::LABELS.map(String::from).to_vec(),
            values: buckets.counts().map(|n| n as f64).to_vec(),
            style: ChartStyle {
                fills: vec!["#ef4444".into(), "#f59e0b".into(), "#10b981".into()],
                ..ChartStyle::default()
            },
        });

        surface.render(ChartSpec {
            id: ChartId::MoodWave,
            kind: ChartKind::Line,
            labels: series.labels,
            values: series.values,
            style: ChartStyle {
                stroke: Some("#0ea5e9".into()),
                fills: vec!["rgba(14, 165, 233, 0.2)".into()],
                filled_area: true,
                tension: 0.5,
                ..ChartStyle::default()
            },
        });
    }

    pub fn daily_tip(&self) -> &'static str {
        DAILY_TIPS[rand::thread_rng().gen_range(0..DAILY_TIPS.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::confirmation_channel;
    use std::collections::HashMap;

    /// Test surface demonstrating the dispose-before-replace contract: a
    /// render for an existing id drops the old chart before storing the new.
    #[derive(Default)]
    struct RecordingSurface {
        charts: HashMap<ChartId, ChartSpec>,
        disposed: usize,
    }

    impl ChartSurface for RecordingSurface {
        fn render(&mut self, spec: ChartSpec) {
            if self.charts.remove(&spec.id).is_some() {
                self.disposed += 1;
            }
            self.charts.insert(spec.id, spec);
        }
    }

    fn app() -> App {
        let (gate, mut host) = confirmation_channel();
        tokio::spawn(async move {
            while let Some(request) = host.next().await {
                request.resolve(true);
            }
        });
        App::load(Config::default(), Store::in_memory(), gate).unwrap()
    }

    fn register_input(name: &str, email: &str) -> RegisterInput {
        RegisterInput {
            name: name.into(),
            email: email.into(),
            password: "password123".into(),
        }
    }

    fn commit_scores(app: &mut App, scores: &[u8]) {
        for &score in scores {
            app.ledger_mut().record_scan_component(score).unwrap();
            app.ledger_mut().record_emoji_component(score).unwrap();
            app.ledger_mut().commit().unwrap();
        }
    }

    #[tokio::test]
    async fn failed_login_surfaces_a_notification() {
        let mut app = app();
        let mut rx = app.subscribe_notices();

        let _ = app.login(LoginInput {
            email: "nobody@example.com".into(),
            password: "password123".into(),
        });

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.title, "Login Failed");
        assert_eq!(notice.message, "Email is not registered");
    }

    #[tokio::test]
    async fn refresh_renders_the_four_chart_set() {
        let mut app = app();
        app.register(register_input("Ayu", "ayu@example.com")).unwrap();
        commit_scores(&mut app, &[90, 50, 30, 71, 40]);

        let mut surface = RecordingSurface::default();
        app.refresh_trends(&mut surface);

        assert_eq!(surface.charts.len(), 4);
        let line = &surface.charts[&ChartId::MoodLine];
        assert_eq!(line.values, vec![90.0, 50.0, 30.0, 71.0, 40.0]);
        assert_eq!(line.labels.len(), 5);

        let pie = &surface.charts[&ChartId::Distribution];
        assert_eq!(pie.values, vec![2.0, 2.0, 1.0]);
        assert_eq!(pie.labels, vec!["High Stress", "Stable", "Positive"]);

        // A second refresh replaces every chart instead of piling up.
        app.refresh_trends(&mut surface);
        assert_eq!(surface.charts.len(), 4);
        assert_eq!(surface.disposed, 4);
    }

    #[tokio::test]
    async fn fresh_load_over_the_same_store_reconstructs_state() {
        let store = Store::in_memory();
        let (gate, _host) = confirmation_channel();
        let mut app = App::load(Config::default(), store.clone(), gate).unwrap();

        app.register(register_input("Ayu", "ayu@example.com")).unwrap();
        commit_scores(&mut app, &[60, 40]);
        app.hopes_mut().add("stay patient").unwrap();
        drop(app);

        let (gate, _host) = confirmation_channel();
        let reloaded = App::load(Config::default(), store, gate).unwrap();
        assert!(reloaded.is_logged_in());
        assert_eq!(reloaded.profile().email, "ayu@example.com");
        assert_eq!(reloaded.ledger().len(), 2);
        assert_eq!(reloaded.hopes().len(), 1);
    }

    #[tokio::test]
    async fn logout_then_login_restores_identity_with_empty_data() {
        let mut app = app();
        app.register(register_input("Ayu", "ayu@example.com")).unwrap();
        commit_scores(&mut app, &[80]);
        app.add_diary_entry("Hari ini", "catatan").unwrap();

        assert!(app.logout().await.unwrap());
        assert!(!app.is_logged_in());

        app.login(LoginInput {
            email: "ayu@example.com".into(),
            password: "password123".into(),
        })
        .unwrap();
        assert!(app.is_logged_in());
        assert_eq!(app.profile().name, "Ayu");
        assert!(app.ledger().is_empty());
        assert!(app.diary().is_empty());
    }

    #[tokio::test]
    async fn daily_tip_draws_from_the_fixed_pool() {
        let app = app();
        for _ in 0..20 {
            assert!(DAILY_TIPS.contains(&app.daily_tip()));
        }
    }
}
