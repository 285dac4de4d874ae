//! Append-only mood ledger and the metrics derived from it.
//!
//! A check-in is two bounded components: the facial-scan reading and the
//! self-reported emoji rating. Recording the emoji component synchronizes
//! the pair into a pending score; `commit` turns the pending score into an
//! immutable ledger entry. Past entries are never edited or deleted —
//! identity switches replace the whole ledger.

use std::sync::Arc;

use chrono::{Local, Utc};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::mood::{DashboardView, MoodDistribution, MoodEntry, MoodStatus, TrendSignal};
use crate::notify::Notifier;
use crate::store::{Store, KEY_MOOD_ENTRIES};

/// Labels and scores for the trend charts, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

pub struct MoodLedger {
    store: Store,
    config: Arc<Config>,
    notices: Notifier,
    entries: Vec<MoodEntry>,
    pending_face: Option<u8>,
    pending_emoji: Option<u8>,
    current_score: Option<f64>,
}

impl MoodLedger {
    pub fn load(store: Store, config: Arc<Config>, notices: Notifier) -> AppResult<Self> {
        let entries = store.get(KEY_MOOD_ENTRIES)?.unwrap_or_default();
        Ok(Self {
            store,
            config,
            notices,
            entries,
            pending_face: None,
            pending_emoji: None,
            current_score: None,
        })
    }

    /// Sets the pending facial component. Nothing persists until the pair
    /// is synced and committed.
    pub fn record_scan_component(&mut self, value: u8) -> AppResult<()> {
        ensure_component(value)?;
        self.pending_face = Some(value);
        Ok(())
    }

    /// Sets the pending emoji component and synchronizes the pair.
    pub fn record_emoji_component(&mut self, value: u8) -> AppResult<f64> {
        ensure_component(value)?;
        self.pending_emoji = Some(value);
        Ok(self.sync())
    }

    /// Recomputes the pending score from the recorded components. A score
    /// above the high-load threshold emits one advisory notice; the ledger
    /// itself is untouched.
    pub fn sync(&mut self) -> f64 {
        let face = self.pending_face.unwrap_or(0);
        let emoji = self.pending_emoji.unwrap_or(0);
        let score = f64::from(face as u16 + emoji as u16) / 2.0;
        self.current_score = Some(score);

        if score > self.config.high_load_threshold {
            self.notices.info(
                "Notification",
                "Warning: High emotional load detected. Breath Art is recommended.",
            );
        }
        score
    }

    /// Appends the synced check-in to the ledger and persists it. Fails if
    /// no score has been synced since load.
    pub fn commit(&mut self) -> AppResult<&MoodEntry> {
        let score = self
            .current_score
            .ok_or_else(|| AppError::Validation("No synced score to save".into()))?;

        self.entries.push(MoodEntry {
            timestamp: Utc::now(),
            score,
            face_component: self.pending_face.unwrap_or(0),
            emoji_component: self.pending_emoji.unwrap_or(0),
        });
        if let Err(e) = self.store.set(KEY_MOOD_ENTRIES, &self.entries) {
            self.entries.pop();
            return Err(e.into());
        }

        tracing::info!(score, total = self.entries.len(), "mood entry committed");
        Ok(self.entries.last().expect("entry just appended"))
    }

    pub fn latest(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    /// Mean of the `window` most recent scores (fewer if the ledger is
    /// shorter); 0 for an empty ledger.
    pub fn moving_average(&self, window: usize) -> f64 {
        if self.entries.is_empty() || window == 0 {
            return 0.0;
        }
        let recent = &self.entries[self.entries.len().saturating_sub(window)..];
        recent.iter().map(|e| e.score).sum::<f64>() / recent.len() as f64
    }

    pub fn trend_signal(&self) -> TrendSignal {
        TrendSignal::for_average(self.moving_average(self.config.trend_window))
    }

    pub fn dashboard(&self) -> DashboardView {
        match self.entries.last() {
            Some(last) => DashboardView {
                latest_score: Some(last.display_score()),
                status: Some(MoodStatus::for_score(last.score)),
                trend: Some(self.trend_signal()),
            },
            None => DashboardView {
                latest_score: None,
                status: None,
                trend: None,
            },
        }
    }

    /// All-time bucket counts. Not windowed, unlike the trend readings.
    pub fn distribution(&self) -> MoodDistribution {
        let mut buckets = MoodDistribution::default();
        for entry in &self.entries {
            match MoodStatus::for_score(entry.score) {
                MoodStatus::CriticalStress => buckets.high_stress += 1,
                MoodStatus::Stable => buckets.stable += 1,
                MoodStatus::PositiveFlow => buckets.positive += 1,
            }
        }
        buckets
    }

    /// The last `n` entries in chronological order. The iterator is lazy
    /// and cloneable, so a consumer can walk it more than once.
    pub fn recent_window(&self, n: usize) -> impl Iterator<Item = &MoodEntry> + Clone {
        self.entries[self.entries.len().saturating_sub(n)..].iter()
    }

    /// Weekday labels and scores for the trend-window entries, feeding
    /// every trend chart.
    pub fn trend_series(&self) -> TrendSeries {
        let window = self.recent_window(self.config.trend_window);
        TrendSeries {
            labels: window
                .clone()
                .map(|e| e.timestamp.with_timezone(&Local).format("%a").to_string())
                .collect(),
            values: window.map(|e| e.score).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persists an empty ledger for a freshly scoped identity.
    pub(crate) fn reset_persisted(&mut self) -> AppResult<()> {
        self.store.set(KEY_MOOD_ENTRIES, &Vec::<MoodEntry>::new())?;
        self.clear_cached();
        Ok(())
    }

    /// Cache-only reset, used after the session manager has already cleared
    /// the persisted key.
    pub(crate) fn clear_cached(&mut self) {
        self.entries.clear();
        self.pending_face = None;
        self.pending_emoji = None;
        self.current_score = None;
    }
}

fn ensure_component(value: u8) -> AppResult<()> {
    if value > 100 {
        return Err(AppError::Validation(
            "Component must be between 0 and 100".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeKind;

    fn ledger() -> (MoodLedger, Notifier) {
        let notices = Notifier::new();
        let ledger = MoodLedger::load(
            Store::in_memory(),
            Arc::new(Config::default()),
            notices.clone(),
        )
        .unwrap();
        (ledger, notices)
    }

    fn commit_scores(ledger: &mut MoodLedger, scores: &[u8]) {
        for &score in scores {
            ledger.record_scan_component(score).unwrap();
            ledger.record_emoji_component(score).unwrap();
            ledger.commit().unwrap();
        }
    }

    #[test]
    fn synced_score_is_the_component_mean() {
        let (mut ledger, _notices) = ledger();
        ledger.record_scan_component(55).unwrap();
        let score = ledger.record_emoji_component(40).unwrap();
        assert_eq!(score, 47.5);

        let entry = ledger.commit().unwrap();
        assert_eq!(entry.face_component, 55);
        assert_eq!(entry.emoji_component, 40);
        assert_eq!(entry.display_score(), 48);
    }

    #[test]
    fn high_load_sync_emits_exactly_one_advisory() {
        let (mut ledger, notices) = ledger();
        let mut rx = notices.subscribe();

        ledger.record_scan_component(80).unwrap();
        ledger.record_emoji_component(80).unwrap();

        let advisory = rx.try_recv().unwrap();
        assert_eq!(advisory.kind, NoticeKind::Info);
        assert!(advisory.message.contains("High emotional load"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn threshold_score_emits_no_advisory() {
        let (mut ledger, notices) = ledger();
        let mut rx = notices.subscribe();

        ledger.record_scan_component(75).unwrap();
        ledger.record_emoji_component(75).unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn component_out_of_range_is_rejected() {
        let (mut ledger, _notices) = ledger();
        let err = ledger.record_scan_component(101).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn commit_without_sync_changes_nothing() {
        let (mut ledger, _notices) = ledger();
        let err = ledger.commit().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn moving_average_over_mixed_week_reads_optimal() {
        let (mut ledger, _notices) = ledger();
        commit_scores(&mut ledger, &[80, 50, 30, 90, 20, 60, 10]);

        let average = ledger.moving_average(7);
        assert!((average - 48.5714).abs() < 0.001);
        assert_eq!(ledger.trend_signal(), TrendSignal::OptimalRange);
    }

    #[test]
    fn sustained_high_scores_read_elevated() {
        let (mut ledger, _notices) = ledger();
        commit_scores(&mut ledger, &[80, 80, 80, 80, 80, 80, 80]);

        assert_eq!(ledger.moving_average(7), 80.0);
        assert_eq!(ledger.trend_signal(), TrendSignal::ElevatedStress);
    }

    #[test]
    fn moving_average_of_empty_ledger_is_zero() {
        let (ledger, _notices) = ledger();
        assert_eq!(ledger.moving_average(7), 0.0);
        assert!(ledger.latest().is_none());
    }

    #[test]
    fn distribution_buckets_respect_boundaries() {
        let (mut ledger, _notices) = ledger();
        commit_scores(&mut ledger, &[90, 50, 30, 71, 40]);

        let buckets = ledger.distribution();
        assert_eq!(buckets.high_stress, 2);
        assert_eq!(buckets.stable, 2);
        assert_eq!(buckets.positive, 1);
    }

    #[test]
    fn empty_dashboard_shows_placeholders() {
        let (ledger, _notices) = ledger();
        let dashboard = ledger.dashboard();
        assert_eq!(dashboard.score_text(), "0");
        assert_eq!(dashboard.pill_text(), "Mood: -");
        assert_eq!(dashboard.status_text(), "No Data Yet");
        assert_eq!(dashboard.trend_text(), "No data recorded");
    }

    #[test]
    fn recent_window_is_chronological_and_restartable() {
        let (mut ledger, _notices) = ledger();
        commit_scores(&mut ledger, &[10, 20, 30, 40]);

        let window = ledger.recent_window(3);
        let twice: (Vec<f64>, Vec<f64>) = (
            window.clone().map(|e| e.score).collect(),
            window.map(|e| e.score).collect(),
        );
        assert_eq!(twice.0, vec![20.0, 30.0, 40.0]);
        assert_eq!(twice.0, twice.1);
    }

    #[test]
    fn committed_entries_survive_reload() {
        let store = Store::in_memory();
        let config = Arc::new(Config::default());
        let mut ledger =
            MoodLedger::load(store.clone(), config.clone(), Notifier::new()).unwrap();
        commit_scores(&mut ledger, &[42]);

        let reloaded = MoodLedger::load(store, config, Notifier::new()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.latest().unwrap().score, 42.0);
    }
}
