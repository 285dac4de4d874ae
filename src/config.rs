use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the durable key-value file.
    pub data_path: PathBuf,

    /// Window size for the aggregate trend reading.
    pub trend_window: usize,
    /// Synced scores above this emit the high-load advisory.
    pub high_load_threshold: f64,

    /// Simulated facial-scan analysis delay.
    pub scan_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            data_path: env::var("MOODLENS_DATA_PATH")
                .unwrap_or_else(|_| "moodlens-data.json".into())
                .into(),
            trend_window: env::var("MOODLENS_TREND_WINDOW")
                .unwrap_or_else(|_| "7".into())
                .parse()
                .expect("MOODLENS_TREND_WINDOW must be a number"),
            high_load_threshold: env::var("MOODLENS_HIGH_LOAD_THRESHOLD")
                .unwrap_or_else(|_| "75".into())
                .parse()
                .expect("MOODLENS_HIGH_LOAD_THRESHOLD must be a number"),
            scan_delay_ms: env::var("MOODLENS_SCAN_DELAY_MS")
                .unwrap_or_else(|_| "2500".into())
                .parse()
                .expect("MOODLENS_SCAN_DELAY_MS must be a number"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: "moodlens-data.json".into(),
            trend_window: 7,
            high_load_threshold: 75.0,
            scan_delay_ms: 2500,
        }
    }
}
