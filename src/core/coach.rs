//! 字母练习 - 选字母、录制手势、提交 `/tutor-check` 判定

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};
use thiserror::Error;
use tokio::sync::watch;

use crate::api::models::backend::SignCheckResult;
use crate::core::backend::{BackendClient, BackendError};
use crate::core::camera::{CameraAcquirer, CameraBackend, CameraError};
use crate::core::config::CoachConfig;
use crate::core::health::ConnectionStatus;
use crate::core::recording::{FrameRecorder, FrameSink};

pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Please select a letter first")]
    NoSelection,
    #[error("Invalid letter: {0:?}")]
    InvalidLetter(String),
    #[error("No reference for \"{0}\". Try another letter.")]
    NoReference(char),
    #[error("No frames captured. Make sure hands are visible!")]
    InsufficientFrames,
    #[error("No hand landmarks detected. Show your hands clearly!")]
    NoHandsDetected,
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl CoachError {
    pub fn kind(&self) -> &'static str {
        match self {
            CoachError::NoSelection => "NoSelection",
            CoachError::InvalidLetter(_) => "InvalidLetter",
            CoachError::NoReference(_) => "NoReference",
            CoachError::InsufficientFrames => "InsufficientFrames",
            CoachError::NoHandsDetected => "NoHandsDetected",
            CoachError::Camera(e) => e.kind(),
            CoachError::Backend(e) => e.kind(),
        }
    }
}

/// `<assets_dir>/<L>.jpg` if the file exists.
pub fn reference_image_path(assets_dir: &Path, letter: char) -> Option<PathBuf> {
    let path = assets_dir.join(format!("{}.jpg", letter.to_ascii_uppercase()));
    path.is_file().then_some(path)
}

fn parse_letter(input: &str) -> Result<char, CoachError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(CoachError::InvalidLetter(input.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachSnapshot {
    pub selected: Option<char>,
    pub reference_image: Option<PathBuf>,
    pub status: String,
    pub result: Option<SignCheckResult>,
    pub is_checking: bool,
    pub is_recording: bool,
}

#[derive(Debug)]
struct CoachState {
    selected: Option<char>,
    reference_image: Option<PathBuf>,
    status: String,
    result: Option<SignCheckResult>,
    is_checking: bool,
}

impl Default for CoachState {
    fn default() -> Self {
        Self {
            selected: None,
            reference_image: None,
            status: "Initializing...".to_string(),
            result: None,
            is_checking: false,
        }
    }
}

/// 只读视图，`check_sign` 执行期间也可读取
#[derive(Clone)]
pub struct CoachView {
    state: Arc<Mutex<CoachState>>,
    sink: FrameSink,
}

impl CoachView {
    fn lock(&self) -> MutexGuard<'_, CoachState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_status(&self, status: impl Into<String>) {
        let status = status.into();
        info!("📝 {}", status);
        self.lock().status = status;
    }

    pub fn status(&self) -> String {
        self.lock().status.clone()
    }

    pub fn snapshot(&self) -> CoachSnapshot {
        let state = self.lock();
        CoachSnapshot {
            selected: state.selected,
            reference_image: state.reference_image.clone(),
            status: state.status.clone(),
            result: state.result.clone(),
            is_checking: state.is_checking,
            is_recording: self.sink.is_recording(),
        }
    }
}

pub struct AlphabetCoach {
    config: CoachConfig,
    client: Arc<BackendClient>,
    camera: CameraAcquirer,
    recorder: FrameRecorder,
    health: Option<watch::Receiver<ConnectionStatus>>,
    view: CoachView,
}

impl AlphabetCoach {
    pub fn new(config: CoachConfig, camera: Arc<dyn CameraBackend>) -> Result<Self, CoachError> {
        let client = Arc::new(BackendClient::new(config.backend.clone())?);
        let recorder = FrameRecorder::with_config(config.recording.clone());
        let view = CoachView {
            state: Arc::new(Mutex::new(CoachState::default())),
            sink: recorder.sink(),
        };

        Ok(Self {
            config,
            client,
            camera: CameraAcquirer::new(camera),
            recorder,
            health: None,
            view,
        })
    }

    pub fn client(&self) -> Arc<BackendClient> {
        Arc::clone(&self.client)
    }

    /// Reference availability is checked against the latest report on this channel.
    pub fn attach_health(&mut self, status: watch::Receiver<ConnectionStatus>) {
        self.health = Some(status);
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.health
            .as_ref()
            .map(|rx| rx.borrow().clone())
            .unwrap_or_default()
    }

    pub fn sink(&self) -> FrameSink {
        self.recorder.sink()
    }

    pub fn view(&self) -> CoachView {
        self.view.clone()
    }

    pub fn snapshot(&self) -> CoachSnapshot {
        self.view.snapshot()
    }

    pub fn camera_active(&self) -> bool {
        self.camera.is_active()
    }

    pub fn select_letter(&mut self, letter: &str) -> Result<char, CoachError> {
        let letter = parse_letter(letter)?;
        self.recorder.reset();

        {
            let mut state = self.view.lock();
            state.selected = Some(letter);
            state.result = None;
            state.reference_image = reference_image_path(&self.config.assets_dir, letter);
        }
        self.view.set_status(format!("Selected: {}", letter));

        self.view.set_status("🎥 Starting camera...");
        match self.camera.acquire(&self.config.camera) {
            Ok(()) => {
                self.view.set_status("✅ Camera started successfully");
                Ok(letter)
            }
            Err(e) => {
                self.view.set_status(format!("❌ {}", e));
                Err(e.into())
            }
        }
    }

    /// Clears the selection and releases the camera.
    pub fn deselect(&mut self) {
        self.recorder.reset();
        self.camera.release();
        let mut state = self.view.lock();
        state.selected = None;
        state.reference_image = None;
        state.result = None;
    }

    /// Records one attempt and asks the backend to judge it.
    pub async fn check_sign(&mut self) -> Result<SignCheckResult, CoachError> {
        let outcome = self.run_check().await;
        self.view.lock().is_checking = false;

        if let Err(e) = &outcome {
            warn!("❌ Sign check failed: {}", e);
            self.view.set_status(format!("❌ {}", e));
        }
        outcome
    }

    async fn run_check(&mut self) -> Result<SignCheckResult, CoachError> {
        let letter = self.view.lock().selected.ok_or(CoachError::NoSelection)?;

        if let Some(health) = self.connection_status().health() {
            if !health.has_reference(&letter.to_string()) {
                return Err(CoachError::NoReference(letter));
            }
        }

        {
            let mut state = self.view.lock();
            state.is_checking = true;
            state.result = None;
        }
        self.view.set_status("🔄 Starting sign check...");
        self.view.set_status("🎥 Recording started... Make your sign now!");

        let recording = self.recorder.record().await;
        let timed_out = recording.timed_out();
        let sequence = recording.sequence;
        if timed_out {
            if sequence.is_empty() {
                self.view.set_status("❌ Timeout: No frames captured");
            } else {
                self.view
                    .set_status(format!("⏰ Timeout: {} frames collected", sequence.len()));
            }
        }

        if sequence.is_empty() {
            return Err(CoachError::InsufficientFrames);
        }
        if sequence.first_frame_blank() {
            return Err(CoachError::NoHandsDetected);
        }

        self.view
            .set_status(format!("📤 Sending {} frames to backend...", sequence.len()));

        let sign = letter.to_string();
        match self.client.tutor_check(&sign, &sequence).await {
            Ok(result) => {
                self.view.set_status(format!(
                    "✅ Check completed: {} ({}% confidence)",
                    result.result,
                    result.confidence_percent()
                ));
                self.view.lock().result = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                self.view.lock().result = Some(SignCheckResult::error());
                Err(e.into())
            }
        }
    }

    pub fn try_again(&mut self) {
        self.recorder.reset();
        self.view.lock().result = None;
        self.view.set_status("🔄 Reset - ready to try again");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::backend::HealthStatus;
    use crate::core::backend::stub::{StubBackend, StubResponse};
    use crate::core::camera::{CameraAvailability, HostCamera};
    use crate::core::config::{BackendConfig, RecordingConfig};
    use crate::core::landmarks::LandmarkFrame;
    use std::time::Duration;

    fn coach_for(url: String, camera: &HostCamera) -> AlphabetCoach {
        coach_with_target(url, camera, 3)
    }

    fn coach_with_target(url: String, camera: &HostCamera, target_frames: usize) -> AlphabetCoach {
        let config = CoachConfig {
            backend: BackendConfig::default().with_base_url(url),
            recording: RecordingConfig {
                target_frames,
                deadline: Duration::from_millis(300),
            },
            ..Default::default()
        };
        AlphabetCoach::new(config, Arc::new(camera.clone())).unwrap()
    }

    fn feed(sink: FrameSink, frame: LandmarkFrame) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while !sink.is_recording() {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            for _ in 0..5 {
                sink.push(frame);
            }
        })
    }

    fn health_with(letters: &[&str]) -> watch::Receiver<ConnectionStatus> {
        let (_tx, rx) = watch::channel(ConnectionStatus::Connected(HealthStatus {
            status: "healthy".into(),
            model_loaded: true,
            reference_data_loaded: true,
            available_letters: letters.iter().map(|l| l.to_string()).collect(),
        }));
        rx
    }

    #[test]
    fn test_parse_letter() {
        assert_eq!(parse_letter("a").unwrap(), 'A');
        assert_eq!(parse_letter(" Q ").unwrap(), 'Q');
        assert!(matches!(parse_letter("AB"), Err(CoachError::InvalidLetter(_))));
        assert!(matches!(parse_letter("7"), Err(CoachError::InvalidLetter(_))));
        assert!(matches!(parse_letter(""), Err(CoachError::InvalidLetter(_))));
    }

    #[test]
    fn test_reference_image_missing_file() {
        assert!(reference_image_path(Path::new("/nonexistent-assets"), 'a').is_none());
        assert_eq!(LETTERS.len(), 26);
    }

    #[tokio::test]
    async fn test_select_letter_starts_camera() {
        let camera = HostCamera::new();
        let mut coach = coach_for(StubBackend::closed_url().await, &camera);

        assert_eq!(coach.select_letter("b").unwrap(), 'B');
        assert!(coach.camera_active());
        assert_eq!(camera.live_tracks(), 1);

        coach.select_letter("C").unwrap();
        assert_eq!(camera.live_tracks(), 1);
        assert_eq!(camera.stopped_tracks(), 1);

        let snapshot = coach.snapshot();
        assert_eq!(snapshot.selected, Some('C'));
        assert_eq!(snapshot.status, "✅ Camera started successfully");

        coach.deselect();
        assert_eq!(camera.live_tracks(), 0);
        assert!(coach.snapshot().selected.is_none());
    }

    #[tokio::test]
    async fn test_select_letter_camera_denied() {
        let camera = HostCamera::new();
        camera.set_availability(CameraAvailability::PermissionDenied);
        let mut coach = coach_for(StubBackend::closed_url().await, &camera);

        let err = coach.select_letter("A").unwrap_err();
        assert_eq!(err.kind(), "PermissionDenied");
        assert!(coach.snapshot().status.starts_with("❌ Camera permission denied"));
    }

    #[tokio::test]
    async fn test_check_requires_selection() {
        let camera = HostCamera::new();
        let mut coach = coach_for(StubBackend::closed_url().await, &camera);

        let err = coach.check_sign().await.unwrap_err();
        assert!(matches!(err, CoachError::NoSelection));
        assert_eq!(coach.snapshot().status, "❌ Please select a letter first");
    }

    #[tokio::test]
    async fn test_check_rejects_letter_without_reference() {
        let stub = StubBackend::start(|_| StubResponse::json(200, "{}")).await;
        let camera = HostCamera::new();
        let mut coach = coach_for(stub.url(), &camera);
        coach.attach_health(health_with(&["A", "B"]));

        coach.select_letter("Q").unwrap();
        let err = coach.check_sign().await.unwrap_err();

        assert!(matches!(err, CoachError::NoReference('Q')));
        assert_eq!(stub.count("/tutor-check"), 0);
    }

    #[tokio::test]
    async fn test_check_with_no_frames() {
        let stub = StubBackend::start(|_| StubResponse::json(200, "{}")).await;
        let camera = HostCamera::new();
        let mut coach = coach_for(stub.url(), &camera);
        coach.select_letter("A").unwrap();

        let err = coach.check_sign().await.unwrap_err();

        assert!(matches!(err, CoachError::InsufficientFrames));
        assert_eq!(err.kind(), "InsufficientFrames");
        assert_eq!(stub.count("/tutor-check"), 0);
        assert!(!coach.snapshot().is_checking);
    }

    #[tokio::test]
    async fn test_blank_first_frame_never_sent() {
        let stub = StubBackend::start(|_| StubResponse::json(200, "{}")).await;
        let camera = HostCamera::new();
        let mut coach = coach_for(stub.url(), &camera);
        coach.select_letter("A").unwrap();

        let producer = feed(coach.sink(), LandmarkFrame::zeros());
        let err = coach.check_sign().await.unwrap_err();
        producer.await.unwrap();

        assert!(matches!(err, CoachError::NoHandsDetected));
        assert_eq!(stub.count("/tutor-check"), 0);
        assert!(coach.snapshot().result.is_none());
    }

    #[tokio::test]
    async fn test_check_success_records_result() {
        let stub = StubBackend::start(|_| {
            StubResponse::json(200, r#"{"result": "CORRECT", "confidence": 0.873}"#)
        })
        .await;
        let camera = HostCamera::new();
        let mut coach = coach_for(stub.url(), &camera);
        coach.attach_health(health_with(&["A"]));
        coach.select_letter("a").unwrap();

        let producer = feed(coach.sink(), LandmarkFrame::fit(&[0.4, 0.6]));
        let result = coach.check_sign().await.unwrap();
        producer.await.unwrap();

        assert_eq!(result.result, "CORRECT");
        let snapshot = coach.snapshot();
        assert_eq!(snapshot.result, Some(result));
        assert_eq!(snapshot.status, "✅ Check completed: CORRECT (87.3% confidence)");
        assert!(!snapshot.is_recording);

        let body: serde_json::Value = serde_json::from_str(&stub.requests()[0].body).unwrap();
        assert_eq!(body["sign"], "A");
        assert_eq!(body["sequence"].as_array().unwrap().len(), 3);

        coach.try_again();
        let snapshot = coach.snapshot();
        assert!(snapshot.result.is_none());
        assert_eq!(snapshot.status, "🔄 Reset - ready to try again");
    }

    #[tokio::test]
    async fn test_partial_recording_after_timeout_is_checked() {
        let stub = StubBackend::start(|_| {
            StubResponse::json(200, r#"{"result": "INCORRECT", "confidence": 0.25}"#)
        })
        .await;
        let camera = HostCamera::new();
        let mut coach = coach_with_target(stub.url(), &camera, 30);
        coach.select_letter("B").unwrap();

        let producer = feed(coach.sink(), LandmarkFrame::fit(&[0.2, 0.7]));
        let result = coach.check_sign().await.unwrap();
        producer.await.unwrap();

        assert_eq!(result.result, "INCORRECT");
        assert_eq!(stub.count("/tutor-check"), 1);
        let body: serde_json::Value = serde_json::from_str(&stub.requests()[0].body).unwrap();
        assert_eq!(body["sequence"].as_array().unwrap().len(), 5);
        assert_eq!(
            coach.snapshot().status,
            "✅ Check completed: INCORRECT (25.0% confidence)"
        );
    }

    #[tokio::test]
    async fn test_backend_error_marks_result() {
        let stub = StubBackend::start(|_| {
            StubResponse::json(400, r#"{"detail": "Sequence too short"}"#)
        })
        .await;
        let camera = HostCamera::new();
        let mut coach = coach_for(stub.url(), &camera);
        coach.select_letter("A").unwrap();

        let producer = feed(coach.sink(), LandmarkFrame::fit(&[0.4]));
        let err = coach.check_sign().await.unwrap_err();
        producer.await.unwrap();

        assert_eq!(err.kind(), "ServerError");
        let snapshot = coach.snapshot();
        assert!(snapshot.result.as_ref().is_some_and(SignCheckResult::is_error));
        assert_eq!(snapshot.status, "❌ Sequence too short");
    }
}
