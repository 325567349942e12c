use std::path::PathBuf;
use std::time::Duration;

use crate::core::camera::CameraConstraints;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// 推理后端连接配置
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// `/health`、`/predict`、`/reset` 的超时
    pub request_timeout: Duration,
    /// `/tutor-check` 的超时
    pub check_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(5),
            check_timeout: Duration::from_secs(15),
        }
    }
}

impl BackendConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone)]
pub struct RecordingConfig {
    pub target_frames: usize,
    pub deadline: Duration,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            target_frames: 30,
            deadline: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthConfig {
    pub interval: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub backend: BackendConfig,
    pub camera: CameraConstraints,
    pub poll_interval: Duration,
    pub jpeg_quality: u8,
    /// Frames the backend buffers before it predicts; only used for progress display.
    pub backend_buffer_target: u32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            camera: CameraConstraints::for_translator(),
            poll_interval: Duration::from_millis(100),
            jpeg_quality: 80,
            backend_buffer_target: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoachConfig {
    pub backend: BackendConfig,
    pub camera: CameraConstraints,
    pub recording: RecordingConfig,
    pub health: HealthConfig,
    /// 参考手势图片目录（`A.jpg` ... `Z.jpg`）
    pub assets_dir: PathBuf,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            camera: CameraConstraints::for_alphabet(),
            recording: RecordingConfig::default(),
            health: HealthConfig::default(),
            assets_dir: PathBuf::from("assets"),
        }
    }
}
