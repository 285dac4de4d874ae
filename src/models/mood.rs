use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed check-in. `score` keeps the unrounded mean of the two
/// components; rounding happens at display time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    pub face_component: u8,
    pub emoji_component: u8,
}

impl MoodEntry {
    pub fn display_score(&self) -> i64 {
        self.score.round() as i64
    }
}

/// Per-entry classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MoodStatus {
    CriticalStress,
    Stable,
    PositiveFlow,
}

impl MoodStatus {
    /// >70 critical, (40, 70] stable, ≤40 positive. 40 itself is positive.
    pub fn for_score(score: f64) -> Self {
        if score > 70.0 {
            Self::CriticalStress
        } else if score > 40.0 {
            Self::Stable
        } else {
            Self::PositiveFlow
        }
    }
}

impl std::fmt::Display for MoodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::CriticalStress => "Critical Stress",
            Self::Stable => "Stable",
            Self::PositiveFlow => "Positive Flow",
        })
    }
}

/// Aggregate reading over the trend window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrendSignal {
    ElevatedStress,
    OptimalRange,
}

impl TrendSignal {
    pub fn for_average(average: f64) -> Self {
        if average > 55.0 {
            Self::ElevatedStress
        } else {
            Self::OptimalRange
        }
    }
}

impl std::fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ElevatedStress => "Elevated Stress Trend",
            Self::OptimalRange => "Optimal range",
        })
    }
}

/// All-time bucket counts for the proportional (pie) view. Deliberately not
/// limited to the 7-entry window the other trend readings use.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MoodDistribution {
    pub high_stress: usize,
    pub stable: usize,
    pub positive: usize,
}

impl MoodDistribution {
    pub const LABELS: [&'static str; 3] = ["High Stress", "Stable", "Positive"];

    pub fn counts(&self) -> [usize; 3] {
        [self.high_stress, self.stable, self.positive]
    }
}

/// Everything the dashboard header needs from the ledger in one read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub latest_score: Option<i64>,
    pub status: Option<MoodStatus>,
    pub trend: Option<TrendSignal>,
}

impl DashboardView {
    pub fn score_text(&self) -> String {
        match self.latest_score {
            Some(score) => score.to_string(),
            None => "0".into(),
        }
    }

    pub fn pill_text(&self) -> String {
        match self.latest_score {
            Some(score) => format!("Mood: {score}"),
            None => "Mood: -".into(),
        }
    }

    pub fn status_text(&self) -> String {
        match self.status {
            Some(status) => status.to_string(),
            None => "No Data Yet".into(),
        }
    }

    pub fn trend_text(&self) -> String {
        match self.trend {
            Some(trend) => trend.to_string(),
            None => "No data recorded".into(),
        }
    }
}
