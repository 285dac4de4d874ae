//! The facial-expression check-in flow.
//!
//! Camera acquisition is a collaborator; denial or an unsupported
//! environment degrades to a simulated visual mode and the flow continues.
//! The "analysis" itself is simulated: after the configured delay it
//! produces a random facial component and records it as the pending half
//! of the next check-in.

use std::time::Duration;

use rand::Rng;

use crate::config::Config;
use crate::error::{AppResult, MediaAccessError};
use crate::ledger::MoodLedger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraStream {
    pub device_label: String,
}

#[allow(async_fn_in_trait)]
pub trait CameraSource {
    async fn acquire(&self) -> Result<CameraStream, MediaAccessError>;
    fn release(&self, stream: CameraStream);
}

#[derive(Debug)]
pub enum ScanMode {
    Live(CameraStream),
    Simulated,
}

pub struct ScanSession {
    mode: ScanMode,
    delay: Duration,
}

impl ScanSession {
    pub async fn begin(camera: &impl CameraSource, config: &Config) -> Self {
        let mode = match camera.acquire().await {
            Ok(stream) => ScanMode::Live(stream),
            Err(e) => {
                tracing::warn!(error = %e, "camera restricted, using simulated scan mode");
                ScanMode::Simulated
            }
        };
        Self {
            mode,
            delay: Duration::from_millis(config.scan_delay_ms),
        }
    }

    pub fn mode(&self) -> &ScanMode {
        &self.mode
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.mode, ScanMode::Simulated)
    }

    /// Waits out the analysis delay, then records a simulated facial
    /// component on the ledger and returns it.
    pub async fn analyze(&self, ledger: &mut MoodLedger) -> AppResult<u8> {
        tokio::time::sleep(self.delay).await;
        let face: u8 = rand::thread_rng().gen_range(0..100);
        ledger.record_scan_component(face)?;
        Ok(face)
    }

    /// Ends the session, handing a live stream back to the camera source.
    pub fn end(self, camera: &impl CameraSource) {
        if let ScanMode::Live(stream) = self.mode {
            camera.release(stream);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::store::Store;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct FakeCamera {
        outcome: Result<(), MediaAccessError>,
        released: Arc<AtomicBool>,
    }

    impl FakeCamera {
        fn working() -> Self {
            Self {
                outcome: Ok(()),
                released: Arc::new(AtomicBool::new(false)),
            }
        }

        fn failing(err: MediaAccessError) -> Self {
            Self {
                outcome: Err(err),
                released: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl CameraSource for FakeCamera {
        async fn acquire(&self) -> Result<CameraStream, MediaAccessError> {
            self.outcome.map(|_| CameraStream {
                device_label: "fake-cam".into(),
            })
        }

        fn release(&self, _stream: CameraStream) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn quick_config() -> Config {
        Config {
            scan_delay_ms: 0,
            ..Config::default()
        }
    }

    fn ledger() -> MoodLedger {
        MoodLedger::load(
            Store::in_memory(),
            Arc::new(quick_config()),
            Notifier::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn denied_camera_falls_back_to_simulated_mode() {
        let camera = FakeCamera::failing(MediaAccessError::PermissionDenied);
        let scan = ScanSession::begin(&camera, &quick_config()).await;
        assert!(scan.is_simulated());

        let camera = FakeCamera::failing(MediaAccessError::Unsupported);
        let scan = ScanSession::begin(&camera, &quick_config()).await;
        assert!(scan.is_simulated());
    }

    #[tokio::test]
    async fn analyze_records_an_in_range_component() {
        let camera = FakeCamera::working();
        let scan = ScanSession::begin(&camera, &quick_config()).await;
        assert!(!scan.is_simulated());

        let mut ledger = ledger();
        let face = scan.analyze(&mut ledger).await.unwrap();
        assert!(face < 100);

        // The pending component flows into the next synced score.
        let score = ledger.record_emoji_component(face).unwrap();
        assert_eq!(score, f64::from(face));
    }

    #[tokio::test]
    async fn ending_a_live_session_releases_the_stream() {
        let camera = FakeCamera::working();
        let released = camera.released.clone();

        let scan = ScanSession::begin(&camera, &quick_config()).await;
        scan.end(&camera);
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn ending_a_simulated_session_releases_nothing() {
        let camera = FakeCamera::failing(MediaAccessError::PermissionDenied);
        let released = camera.released.clone();

        let scan = ScanSession::begin(&camera, &quick_config()).await;
        scan.end(&camera);
        assert!(!released.load(Ordering::SeqCst));
    }
}
