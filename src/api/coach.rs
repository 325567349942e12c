//! 字母练习

use std::path::PathBuf;
use std::sync::Arc;

use flutter_rust_bridge::frb;
use log::info;
use tokio::sync::Mutex;

use crate::api::error::IslApiError;
use crate::api::models::backend::SignCheckResult;
use crate::api::models::tutor::TutorSnapshot;
use crate::api::run;
use crate::core::backend::BackendClient;
use crate::core::camera::{CameraAvailability, HostCamera};
use crate::core::coach::{AlphabetCoach, CoachView, LETTERS};
use crate::core::config::{BackendConfig, CoachConfig, HealthConfig};
use crate::core::health::{check_health, ConnectionStatus, HealthMonitor};
use crate::core::landmarks::{HandTrackingResult, TrackerOptions};
use crate::core::recording::FrameSink;

/// 字母练习会话
///
/// 追踪库每帧回调里调用 `pushLandmarksJson`，只有 `checkSign` 录制期间的帧会被收下。
///
/// ```dart
/// final tutor = AlphabetTutor.create(baseUrl: null, assetsDir: dir.path);
/// await tutor.startHealthMonitor();
/// await tutor.selectLetter(letter: 'A');
/// final result = await tutor.checkSign();
/// ```
#[frb(opaque)]
pub struct AlphabetTutor {
    camera: HostCamera,
    inner: Arc<Mutex<AlphabetCoach>>,
    sink: FrameSink,
    view: CoachView,
    client: Arc<BackendClient>,
    health: HealthConfig,
    monitor: std::sync::Mutex<Option<HealthMonitor>>,
}

impl AlphabetTutor {
    #[frb(sync)]
    pub fn create(base_url: Option<String>, assets_dir: Option<String>) -> Result<Self, IslApiError> {
        let mut config = CoachConfig::default();
        if let Some(url) = base_url {
            config.backend = BackendConfig::default().with_base_url(url);
        }
        if let Some(dir) = assets_dir {
            config.assets_dir = PathBuf::from(dir);
        }

        let health = config.health.clone();
        let camera = HostCamera::new();
        let coach = AlphabetCoach::new(config, Arc::new(camera.clone()))?;
        info!("🔤 AlphabetTutor: created");

        Ok(Self {
            camera,
            sink: coach.sink(),
            view: coach.view(),
            client: coach.client(),
            health,
            inner: Arc::new(Mutex::new(coach)),
            monitor: std::sync::Mutex::new(None),
        })
    }

    /// 立即检查一次后端，之后每 30 秒一次
    #[frb(dart_async)]
    pub async fn start_health_monitor(&self) -> Result<(), IslApiError> {
        let client = Arc::clone(&self.client);
        let inner = Arc::clone(&self.inner);
        let health = self.health.clone();
        let monitor = run(async move {
            let monitor = HealthMonitor::spawn(client, &health);
            inner.lock().await.attach_health(monitor.subscribe());
            Ok(monitor)
        })
        .await?;

        let mut slot = self.monitor.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(monitor) {
            previous.stop();
        }
        Ok(())
    }

    #[frb(sync)]
    pub fn stop_health_monitor(&self) {
        let mut slot = self.monitor.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(monitor) = slot.take() {
            monitor.stop();
        }
    }

    /// 单次健康检查，不影响定时任务
    #[frb(dart_async)]
    pub async fn check_backend(&self) -> Result<ConnectionStatus, IslApiError> {
        let client = Arc::clone(&self.client);
        run(async move { Ok(check_health(&client).await) }).await
    }

    #[frb(sync, getter)]
    pub fn backend_status(&self) -> ConnectionStatus {
        let slot = self.monitor.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(HealthMonitor::status).unwrap_or_default()
    }

    #[frb(sync)]
    pub fn set_camera_availability(&self, availability: CameraAvailability) {
        self.camera.set_availability(availability);
    }

    /// 选择字母并重新打开相机，返回规范化后的大写字母
    #[frb(dart_async)]
    pub async fn select_letter(&self, letter: String) -> Result<String, IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move { Ok(inner.lock().await.select_letter(&letter)?.to_string()) }).await
    }

    #[frb(dart_async)]
    pub async fn deselect(&self) -> Result<(), IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move {
            inner.lock().await.deselect();
            Ok(())
        })
        .await
    }

    /// 追踪库原始 JSON 输出（`{"multiHandLandmarks": [...]}`），返回是否被录制收下
    #[frb(sync)]
    pub fn push_landmarks_json(&self, json: String) -> Result<bool, IslApiError> {
        let result = HandTrackingResult::from_json(&json)?;
        Ok(self.sink.push_result(&result))
    }

    /// 每只手一个扁平坐标数组 `[x0, y0, z0, x1, ...]`
    #[frb(sync)]
    pub fn push_hands(&self, hands: Vec<Vec<f32>>) -> bool {
        self.sink
            .push_result(&HandTrackingResult::from_flat_hands(&hands))
    }

    #[frb(dart_async)]
    pub async fn check_sign(&self) -> Result<SignCheckResult, IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move { Ok(inner.lock().await.check_sign().await?) }).await
    }

    #[frb(dart_async)]
    pub async fn try_again(&self) -> Result<(), IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move {
            inner.lock().await.try_again();
            Ok(())
        })
        .await
    }

    #[frb(sync, getter)]
    pub fn status(&self) -> String {
        self.view.status()
    }

    #[frb(sync, getter)]
    pub fn snapshot(&self) -> TutorSnapshot {
        self.view.snapshot().into()
    }
}

impl Drop for AlphabetTutor {
    fn drop(&mut self) {
        self.stop_health_monitor();
        info!("🗑️ AlphabetTutor: released");
    }
}

/// 宿主初始化手部追踪库用的参数
#[frb(sync)]
pub fn tracker_options() -> TrackerOptions {
    TrackerOptions::default()
}

#[frb(sync)]
pub fn alphabet_letters() -> Vec<String> {
    LETTERS.iter().map(|l| l.to_string()).collect()
}
