//! 连续手语识别 - 每 100ms 抓一帧上传 `/predict`，累积识别文本

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error, info, warn};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::api::models::backend::PredictResponse;
use crate::core::backend::{BackendClient, BackendError};
use crate::core::camera::{CameraAcquirer, CameraBackend, CameraError};
use crate::core::config::TranslatorConfig;
use crate::core::frame::{EncodeError, FrameEncoder, VideoFrame};

/// 后端缓冲未满时返回的占位预测
pub const COLLECTING_PLACEHOLDER: &str = "Collecting frames...";

#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// `session_<unix millis>_<9 random chars>`, minted once per translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let random: String = uuid::Uuid::new_v4().simple().to_string().chars().take(9).collect();
        Self(format!("session_{}_{}", millis, random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationSnapshot {
    pub is_recognizing: bool,
    pub recognized_text: String,
    pub buffer_size: u32,
    pub buffer_target: u32,
    pub hands_detected: u32,
    pub confidence: f64,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct TranslationState {
    recognized_text: String,
    buffer_size: u32,
    hands_detected: u32,
    confidence: f64,
    error: Option<String>,
}

impl TranslationState {
    fn apply_prediction(&mut self, response: &PredictResponse) {
        self.buffer_size = response.buffer_size;
        self.hands_detected = response.hands_detected;
        self.confidence = response.confidence;

        let prediction = response
            .prediction
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != COLLECTING_PLACEHOLDER);

        if let Some(prediction) = prediction {
            if !self.recognized_text.is_empty() {
                self.recognized_text.push(' ');
            }
            self.recognized_text.push_str(prediction);
            self.error = None;
        }
    }

    fn clear(&mut self) {
        self.recognized_text.clear();
        self.buffer_size = 0;
        self.confidence = 0.0;
    }
}

/// Read-only handle on a translator's display state; never blocks on a running request.
#[derive(Clone)]
pub struct TranslationView {
    state: Arc<Mutex<TranslationState>>,
    running: Arc<AtomicBool>,
    buffer_target: u32,
}

impl TranslationView {
    fn lock(&self) -> MutexGuard<'_, TranslationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> TranslationSnapshot {
        let state = self.lock();
        TranslationSnapshot {
            is_recognizing: self.running.load(Ordering::Acquire),
            recognized_text: state.recognized_text.clone(),
            buffer_size: state.buffer_size,
            buffer_target: self.buffer_target,
            hands_detected: state.hands_detected,
            confidence: state.confidence,
            error: state.error.clone(),
        }
    }
}

/// Everything one tick needs, cloned into the ticker task.
///
/// Each `start()` hands the ticker a copy bound to a fresh run number and its own
/// in-flight flag; work belonging to an older run is dropped.
#[derive(Clone)]
struct FrameSubmitter {
    session_id: SessionId,
    client: Arc<BackendClient>,
    camera: Arc<Mutex<CameraAcquirer>>,
    encoder: FrameEncoder,
    view: TranslationView,
    in_flight: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
    run: u64,
}

impl FrameSubmitter {
    fn for_run(&self, run: u64) -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
            run,
            ..self.clone()
        }
    }

    fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.run
    }

    /// Starts one capture+predict round unless the previous one is still running.
    fn submit_next(&self) {
        if !self.is_current() {
            return;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("⏭️ Previous frame still in flight, skipping tick");
            return;
        }

        let frame = {
            let camera = self.camera.lock().unwrap_or_else(|e| e.into_inner());
            camera.capture()
        };
        let Some(frame) = frame else {
            self.in_flight.store(false, Ordering::Release);
            return;
        };

        let this = self.clone();
        tokio::spawn(async move {
            this.submit(frame).await;
            this.in_flight.store(false, Ordering::Release);
        });
    }

    async fn submit(&self, frame: VideoFrame) {
        let encoder = self.encoder.clone();
        let payload = match tokio::task::spawn_blocking(move || encoder.encode_base64(&frame)).await {
            Ok(Ok(payload)) => payload,
            Ok(Err(e)) => {
                warn!("⚠️ Frame encoding failed: {}", e);
                return;
            }
            Err(e) => {
                warn!("⚠️ Encoder task failed: {}", e);
                return;
            }
        };

        // stop() may have landed while the frame was being encoded.
        if !self.is_current() {
            return;
        }

        let result = self.client.predict(self.session_id.as_str(), &payload).await;
        self.handle_response(result);
    }

    fn handle_response(&self, result: Result<PredictResponse, BackendError>) {
        if !self.is_current() {
            debug!("🗑️ Dropping prediction from run {}", self.run);
            return;
        }

        let mut state = self.view.lock();
        match result {
            Ok(response) => state.apply_prediction(&response),
            Err(e) => {
                error!("❌ Error sending frame to backend: {}", e);
                state.error = Some(format!(
                    "Failed to connect to backend: {}. Make sure the server is running on {}",
                    e,
                    self.client.base_url()
                ));
            }
        }
    }
}

pub struct SignTranslator {
    config: TranslatorConfig,
    submitter: FrameSubmitter,
    ticker: Option<JoinHandle<()>>,
}

impl SignTranslator {
    pub fn new(
        config: TranslatorConfig,
        camera: Arc<dyn CameraBackend>,
    ) -> Result<Self, TranslatorError> {
        let client = Arc::new(BackendClient::new(config.backend.clone())?);
        let session_id = SessionId::generate();
        info!("🆔 Translator session: {}", session_id);

        let view = TranslationView {
            state: Arc::new(Mutex::new(TranslationState::default())),
            running: Arc::new(AtomicBool::new(false)),
            buffer_target: config.backend_buffer_target,
        };

        let submitter = FrameSubmitter {
            session_id,
            client,
            camera: Arc::new(Mutex::new(CameraAcquirer::new(camera))),
            encoder: FrameEncoder::new(config.jpeg_quality),
            view,
            in_flight: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            run: 0,
        };

        Ok(Self {
            config,
            submitter,
            ticker: None,
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.submitter.session_id
    }

    pub fn view(&self) -> TranslationView {
        self.submitter.view.clone()
    }

    pub fn snapshot(&self) -> TranslationSnapshot {
        self.submitter.view.snapshot()
    }

    pub fn is_recognizing(&self) -> bool {
        self.ticker.is_some()
    }

    /// Acquires the camera and starts the polling ticker. Must run inside a tokio runtime.
    pub fn start(&mut self) -> Result<(), TranslatorError> {
        if self.ticker.is_some() {
            return Ok(());
        }

        let acquired = self
            .submitter
            .camera
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .acquire(&self.config.camera);
        if let Err(e) = acquired {
            self.submitter.view.lock().error = Some(e.to_string());
            return Err(e.into());
        }

        self.submitter.view.lock().error = None;
        self.submitter.view.running.store(true, Ordering::Release);

        let run = self.submitter.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let submitter = self.submitter.for_run(run);
        let period = self.config.poll_interval;
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                submitter.submit_next();
            }
        }));

        info!("▶️ Recognition started ({:?} interval)", period);
        Ok(())
    }

    /// Cancels the ticker and releases the camera. An in-flight request is left to
    /// its own timeout and its answer is discarded. Returns `false` if recognition
    /// was not running.
    pub fn stop(&mut self) -> bool {
        let Some(ticker) = self.ticker.take() else {
            return false;
        };
        self.submitter.generation.fetch_add(1, Ordering::AcqRel);
        ticker.abort();
        self.submitter.view.running.store(false, Ordering::Release);
        self.submitter
            .camera
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .release();
        info!("⏹️ Recognition stopped");
        true
    }

    /// Clears the server-side buffer, then the local text and counters.
    pub async fn reset(&self) {
        match self.submitter.client.reset(self.session_id().as_str()).await {
            Ok(()) | Err(BackendError::Server { .. }) => self.submitter.view.lock().clear(),
            Err(e) => warn!("⚠️ Error resetting buffer: {}", e),
        }
    }

    /// Start when idle; stop and reset when running. Returns the new running state.
    pub async fn toggle(&mut self) -> Result<bool, TranslatorError> {
        if self.stop() {
            self.reset().await;
            Ok(false)
        } else {
            self.start()?;
            Ok(true)
        }
    }
}

impl Drop for SignTranslator {
    fn drop(&mut self) {
        self.stop();
    }
}
