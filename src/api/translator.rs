//! 连续手语翻译

use std::sync::Arc;

use flutter_rust_bridge::frb;
use log::info;
use tokio::sync::Mutex;

use crate::api::error::IslApiError;
use crate::api::run;
use crate::core::camera::{CameraAvailability, HostCamera};
use crate::core::config::{BackendConfig, TranslatorConfig};
use crate::core::frame::VideoFrame;
use crate::core::translator::{SignTranslator, TranslationSnapshot, TranslationView};

/// 手语翻译会话 - 宿主推送相机帧，Rust 侧按 100ms 节奏上传识别
///
/// ```dart
/// final translator = IslTranslator.create(baseUrl: 'http://10.0.2.2:8000');
/// translator.submitCameraFrame(width: w, height: h, rgba: bytes, timestampMs: ts);
/// await translator.toggle();
/// final text = translator.snapshot.recognizedText;
/// ```
#[frb(opaque)]
pub struct IslTranslator {
    camera: HostCamera,
    inner: Arc<Mutex<SignTranslator>>,
    view: TranslationView,
    session_id: String,
}

impl IslTranslator {
    #[frb(sync)]
    pub fn create(base_url: Option<String>) -> Result<Self, IslApiError> {
        let mut config = TranslatorConfig::default();
        if let Some(url) = base_url {
            config.backend = BackendConfig::default().with_base_url(url);
        }

        let camera = HostCamera::new();
        let translator = SignTranslator::new(config, Arc::new(camera.clone()))?;
        let session_id = translator.session_id().to_string();
        info!("🤟 IslTranslator: created ({})", session_id);

        Ok(Self {
            camera,
            view: translator.view(),
            inner: Arc::new(Mutex::new(translator)),
            session_id,
        })
    }

    /// 宿主上报相机权限/设备状态
    #[frb(sync)]
    pub fn set_camera_availability(&self, availability: CameraAvailability) {
        self.camera.set_availability(availability);
    }

    /// 推送最新一帧 RGBA 画面，未开始识别时直接丢弃
    #[frb(sync)]
    pub fn submit_camera_frame(&self, width: u32, height: u32, rgba: Vec<u8>, timestamp_ms: u64) {
        self.camera
            .submit_frame(VideoFrame::new(width, height, rgba, timestamp_ms));
    }

    #[frb(dart_async)]
    pub async fn start(&self) -> Result<(), IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move { Ok(inner.lock().await.start()?) }).await
    }

    /// 返回 `false` 表示本来就没在识别
    #[frb(dart_async)]
    pub async fn stop(&self) -> Result<bool, IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move { Ok(inner.lock().await.stop()) }).await
    }

    #[frb(dart_async)]
    pub async fn reset(&self) -> Result<(), IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move {
            inner.lock().await.reset().await;
            Ok(())
        })
        .await
    }

    /// 开始/停止识别，返回切换后的状态
    #[frb(dart_async)]
    pub async fn toggle(&self) -> Result<bool, IslApiError> {
        let inner = Arc::clone(&self.inner);
        run(async move { Ok(inner.lock().await.toggle().await?) }).await
    }

    #[frb(sync, getter)]
    pub fn snapshot(&self) -> TranslationSnapshot {
        self.view.snapshot()
    }

    #[frb(sync, getter)]
    pub fn session_id(&self) -> String {
        self.session_id.clone()
    }
}

impl Drop for IslTranslator {
    fn drop(&mut self) {
        info!("🗑️ IslTranslator: released");
    }
}
