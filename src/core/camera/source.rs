use crate::core::camera::CameraError;
use crate::core::frame::VideoFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    User,
    Environment,
}

/// 视频流申请偏好（ideal 值，宿主可以就近满足）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConstraints {
    pub width: u32,
    pub height: u32,
    pub frame_rate: Option<u32>,
    pub facing: Option<FacingMode>,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: None,
            facing: None,
        }
    }
}

impl CameraConstraints {
    /// 连续识别：高分辨率整帧上传
    pub fn for_translator() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: None,
            facing: None,
        }
    }

    /// 字母练习：前置摄像头，交给手部追踪
    pub fn for_alphabet() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: Some(30),
            facing: Some(FacingMode::User),
        }
    }
}

/// Grants video streams. Implemented by whatever owns the physical camera.
pub trait CameraBackend: Send + Sync {
    fn open(&self, constraints: &CameraConstraints) -> Result<Box<dyn VideoStream>, CameraError>;
}

/// A granted stream. Dropping the handle without `stop_tracks` leaks the device lock,
/// so owners must always stop it (see `CameraAcquirer`).
pub trait VideoStream: Send {
    /// Most recent frame, `None` until the device has produced one.
    fn current_frame(&self) -> Option<VideoFrame>;

    fn live_tracks(&self) -> usize;

    fn stop_tracks(&mut self);
}
